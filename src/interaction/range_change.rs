use serde::{Deserialize, Serialize};

use crate::core::Timestamp;

/// How one bound of the host's selected range should change.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum BoundUpdate {
    /// Leave the host's current value untouched.
    #[default]
    Keep,
    Set(Timestamp),
    /// Explicitly reset the bound to "no value".
    Clear,
}

impl BoundUpdate {
    /// Applies the update on top of a current value.
    #[must_use]
    pub fn apply(self, current: Option<Timestamp>) -> Option<Timestamp> {
        match self {
            Self::Keep => current,
            Self::Set(time) => Some(time),
            Self::Clear => None,
        }
    }

    #[must_use]
    pub fn value(self) -> Option<Timestamp> {
        match self {
            Self::Set(time) => Some(time),
            Self::Keep | Self::Clear => None,
        }
    }
}

/// Notification sent to the host whenever a pointer gesture changes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeChange {
    pub from: BoundUpdate,
    pub to: BoundUpdate,
}

impl RangeChange {
    #[must_use]
    pub fn new(from: BoundUpdate, to: BoundUpdate) -> Self {
        Self { from, to }
    }

    /// Both bounds set, ordered ascending.
    #[must_use]
    pub fn span(a: Timestamp, b: Timestamp) -> Self {
        Self::new(BoundUpdate::Set(a.min(b)), BoundUpdate::Set(a.max(b)))
    }

    /// Both bounds explicitly reset.
    #[must_use]
    pub fn cleared() -> Self {
        Self::new(BoundUpdate::Clear, BoundUpdate::Clear)
    }

    #[must_use]
    pub fn is_cleared(self) -> bool {
        self.from == BoundUpdate::Clear && self.to == BoundUpdate::Clear
    }
}
