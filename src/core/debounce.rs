use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
struct PendingFire<T> {
    value: T,
    due_at: Duration,
}

/// Trailing-edge debouncer driven by a host-supplied monotonic clock.
///
/// At most one fire is pending. Scheduling replaces the pending value and
/// pushes the deadline out, so only the last value of a burst is delivered,
/// `delay` after the burst settles.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailingDebouncer<T> {
    delay: Duration,
    pending: Option<PendingFire<T>>,
}

impl<T> TrailingDebouncer<T> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancels any pending fire and schedules `value` for `now + delay`.
    pub fn schedule(&mut self, value: T, now: Duration) {
        self.pending = Some(PendingFire {
            value,
            due_at: now.saturating_add(self.delay),
        });
    }

    /// Returns the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due_at => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drops the pending fire, returning its value.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn due_at(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }
}

#[cfg(test)]
mod tests {
    use super::TrailingDebouncer;
    use std::time::Duration;

    #[test]
    fn only_last_value_of_a_burst_fires() {
        let mut debouncer = TrailingDebouncer::new(Duration::from_millis(100));
        debouncer.schedule(1, Duration::from_millis(0));
        debouncer.schedule(2, Duration::from_millis(60));

        assert_eq!(debouncer.poll(Duration::from_millis(120)), None);
        assert_eq!(debouncer.due_at(), Some(Duration::from_millis(160)));
        assert_eq!(debouncer.poll(Duration::from_millis(160)), Some(2));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(Duration::from_millis(500)), None);
    }

    #[test]
    fn cancel_drops_pending_fire() {
        let mut debouncer = TrailingDebouncer::new(Duration::from_millis(100));
        debouncer.schedule("size", Duration::from_millis(10));
        assert_eq!(debouncer.cancel(), Some("size"));
        assert_eq!(debouncer.poll(Duration::from_secs(10)), None);
    }
}
