use std::time::Duration;

use tracing::{debug, trace};

use crate::core::{TrailingDebouncer, Viewport};
use crate::render::Renderer;

use super::ChartWidget;

/// Debounces surface-size signals into single deferred resizes.
///
/// Signals are only accepted while subscribed. Every accepted signal cancels
/// the pending resize and reschedules it with the newest size.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeCoordinator {
    subscribed: bool,
    debouncer: TrailingDebouncer<Viewport>,
}

impl ResizeCoordinator {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            subscribed: false,
            debouncer: TrailingDebouncer::new(delay),
        }
    }

    pub fn subscribe(&mut self) {
        self.subscribed = true;
    }

    /// Stops accepting signals and drops any pending resize.
    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
        if let Some(size) = self.debouncer.cancel() {
            trace!(?size, "pending resize cancelled");
        }
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Returns `false` when the signal was dropped because nothing is subscribed.
    pub fn on_size_signal(&mut self, size: Viewport, now: Duration) -> bool {
        if !self.subscribed {
            return false;
        }
        self.debouncer.schedule(size, now);
        true
    }

    pub fn poll(&mut self, now: Duration) -> Option<Viewport> {
        self.debouncer.poll(now)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    #[must_use]
    pub fn due_at(&self) -> Option<Duration> {
        self.debouncer.due_at()
    }
}

impl<R: Renderer> ChartWidget<R> {
    /// Attaches the widget to its surface using the size measured at mount time.
    ///
    /// The initial size applies immediately; later sizes go through the debounce.
    pub fn mount(&mut self, initial_size: Viewport) {
        self.resize.subscribe();
        self.apply_surface_size(initial_size);
    }

    /// Detaches from the surface, cancelling any pending resize.
    pub fn teardown(&mut self) {
        self.resize.unsubscribe();
        debug!("widget torn down");
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.resize.is_subscribed()
    }

    /// Records a size signal from the host's resize observer.
    pub fn on_surface_resized(&mut self, size: Viewport, now: Duration) {
        self.now = self.now.max(now);
        if !self.resize.on_size_signal(size, self.now) {
            trace!(?size, "size signal ignored, widget not mounted");
        }
    }

    #[must_use]
    pub fn pending_resize_due_at(&self) -> Option<Duration> {
        self.resize.due_at()
    }

    pub(super) fn apply_due_resize(&mut self) -> bool {
        match self.resize.poll(self.now) {
            Some(size) => {
                self.apply_surface_size(size);
                true
            }
            None => false,
        }
    }

    /// Updates the surface and re-derives selection pixels from its times.
    ///
    /// Never notifies range listeners.
    fn apply_surface_size(&mut self, size: Viewport) {
        debug!(width = size.width, height = size.height, "surface resized");
        self.viewport = size;
        self.reproject_selection();
        self.request_redraw();
    }
}
