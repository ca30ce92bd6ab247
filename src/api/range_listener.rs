use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{TimeRange, Timestamp, TrailingDebouncer};
use crate::interaction::{RangeChange, SelectionPhase};

/// Read-only widget state passed along with every notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeChangeContext {
    /// Host clock as last reported through `ChartWidget::advance_clock`.
    pub now: Duration,
    /// Selection phase after the transition that produced the change.
    pub phase: SelectionPhase,
    pub time_range: Option<TimeRange>,
}

/// Host-side receiver of selection range changes.
pub trait RangeChangeListener {
    fn on_range_change(&mut self, change: RangeChange, context: RangeChangeContext);

    /// Called whenever the widget clock advances.
    fn on_tick(&mut self, _now: Duration) {}
}

/// Adapts a closure into a `RangeChangeListener`.
pub struct RangeChangeFn<F>(pub F);

impl<F> RangeChangeListener for RangeChangeFn<F>
where
    F: FnMut(RangeChange),
{
    fn on_range_change(&mut self, change: RangeChange, _context: RangeChangeContext) {
        (self.0)(change);
    }
}

/// The host's view of the selected range, built by folding range changes.
///
/// `Keep` bounds leave the current value in place, so a change that only
/// carries `from` never wipes an existing `to`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectedRange {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl SelectedRange {
    pub fn apply(&mut self, change: RangeChange) {
        self.from = change.from.apply(self.from);
        self.to = change.to.apply(self.to);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Cloneable handle to a `SelectedRange` kept up to date by the widget.
#[derive(Debug, Clone, Default)]
pub struct SharedSelectedRange(Rc<RefCell<SelectedRange>>);

impl SharedSelectedRange {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self) -> SelectedRange {
        *self.0.borrow()
    }
}

impl RangeChangeListener for SharedSelectedRange {
    fn on_range_change(&mut self, change: RangeChange, _context: RangeChangeContext) {
        self.0.borrow_mut().apply(change);
    }
}

/// Forwards only the last change of a burst, once the burst has settled.
///
/// Each incoming change cancels the pending one and restarts the delay;
/// the inner listener sees the survivor on the first tick past the deadline.
pub struct DebouncedRangeListener<L> {
    inner: L,
    debouncer: TrailingDebouncer<(RangeChange, RangeChangeContext)>,
}

impl<L: RangeChangeListener> DebouncedRangeListener<L> {
    #[must_use]
    pub fn new(inner: L, delay: Duration) -> Self {
        Self {
            inner,
            debouncer: TrailingDebouncer::new(delay),
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    #[must_use]
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: RangeChangeListener> RangeChangeListener for DebouncedRangeListener<L> {
    fn on_range_change(&mut self, change: RangeChange, context: RangeChangeContext) {
        self.debouncer.schedule((change, context), context.now);
    }

    fn on_tick(&mut self, now: Duration) {
        if let Some((change, context)) = self.debouncer.poll(now) {
            trace!(?change, "delivering debounced range change");
            self.inner.on_range_change(change, RangeChangeContext { now, ..context });
        }
        self.inner.on_tick(now);
    }
}
