//! Pointer-driven selection logic.
//!
//! Everything here is a pure function of its inputs: the widget owns the
//! current `Selection` and replaces it with the record each transition returns.

mod range_change;
mod selection;

pub use range_change::{BoundUpdate, RangeChange};
pub use selection::{
    Selection, SelectionContext, SelectionPhase, Transition, transition, translate_within,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// Pointer input in surface coordinates. Only `x` matters to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { button: PointerButton, x: f64 },
    Move { button: PointerButton, x: f64 },
    Up { button: PointerButton, x: f64 },
    Leave,
}

impl PointerEvent {
    #[must_use]
    pub fn down(x: f64) -> Self {
        Self::Down {
            button: PointerButton::Primary,
            x,
        }
    }

    #[must_use]
    pub fn moved(x: f64) -> Self {
        Self::Move {
            button: PointerButton::Primary,
            x,
        }
    }

    #[must_use]
    pub fn up(x: f64) -> Self {
        Self::Up {
            button: PointerButton::Primary,
            x,
        }
    }

    #[must_use]
    pub fn button(self) -> Option<PointerButton> {
        match self {
            Self::Down { button, .. } | Self::Move { button, .. } | Self::Up { button, .. } => {
                Some(button)
            }
            Self::Leave => None,
        }
    }

    #[must_use]
    pub fn x(self) -> Option<f64> {
        match self {
            Self::Down { x, .. } | Self::Move { x, .. } | Self::Up { x, .. } => Some(x),
            Self::Leave => None,
        }
    }
}
