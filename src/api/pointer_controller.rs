use tracing::{debug, trace};

use crate::interaction::{PointerButton, PointerEvent, RangeChange, transition};
use crate::render::Renderer;

use super::{ChartWidget, RangeChangeContext};

impl<R: Renderer> ChartWidget<R> {
    /// Feeds one pointer event through the selection state machine.
    ///
    /// Returns the range change sent to listeners, if any. Events are ignored
    /// while no mapping is available (no data or unmeasured surface).
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<RangeChange> {
        let Some(ctx) = self.selection_context() else {
            trace!(?event, "pointer ignored, mapping unavailable");
            return None;
        };

        let outcome = transition(&self.selection, event, &ctx);
        if outcome.changed_from(&self.selection) {
            if outcome.selection.phase() != self.selection.phase() {
                debug!(
                    from = ?self.selection.phase(),
                    to = ?outcome.selection.phase(),
                    "selection phase changed"
                );
            }
            self.selection = outcome.selection;
            self.request_redraw();
        }

        if let Some(change) = outcome.emitted {
            self.notify_range_change(change);
        }
        outcome.emitted
    }

    pub fn pointer_down(&mut self, button: PointerButton, x: f64) -> Option<RangeChange> {
        self.handle_pointer(PointerEvent::Down { button, x })
    }

    pub fn pointer_move(&mut self, button: PointerButton, x: f64) -> Option<RangeChange> {
        self.handle_pointer(PointerEvent::Move { button, x })
    }

    pub fn pointer_up(&mut self, button: PointerButton, x: f64) -> Option<RangeChange> {
        self.handle_pointer(PointerEvent::Up { button, x })
    }

    pub fn pointer_leave(&mut self) -> Option<RangeChange> {
        self.handle_pointer(PointerEvent::Leave)
    }

    fn notify_range_change(&mut self, change: RangeChange) {
        let context = RangeChangeContext {
            now: self.now,
            phase: self.selection.phase(),
            time_range: self.time_range,
        };
        for listener in &mut self.listeners {
            listener.on_range_change(change, context);
        }
    }
}
