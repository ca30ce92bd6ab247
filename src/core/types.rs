use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Unix time in milliseconds.
///
/// Negative values are legitimate pre-epoch instants; absence is always
/// modeled with `Option<Timestamp>`.
pub type Timestamp = f64;

/// Measured size of the hosting surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Fixed insets between the surface edges and the plotted content.
///
/// `grid_top` is an extra inset below `top` where the grid starts; the
/// selection overlay and the axis use `top` directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPadding {
    pub grid_top: f64,
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Default for CanvasPadding {
    fn default() -> Self {
        Self {
            grid_top: 13.0,
            top: 27.0,
            left: 18.0,
            bottom: 18.0,
            right: 0.0,
        }
    }
}

impl CanvasPadding {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("grid_top", self.grid_top),
            ("top", self.top),
            ("left", self.left),
            ("bottom", self.bottom),
            ("right", self.right),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "padding `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    /// Width available to the time mapping.
    ///
    /// Never negative: a surface narrower than the horizontal padding yields
    /// zero, which callers treat as "mapping unavailable".
    #[must_use]
    pub fn drawable_width(self, viewport: Viewport) -> f64 {
        (f64::from(viewport.width) - self.left - self.right).max(0.0)
    }

    /// Height between the first grid row and the x axis.
    #[must_use]
    pub fn drawable_height(self, viewport: Viewport) -> f64 {
        (f64::from(viewport.height) - self.top - self.bottom - self.grid_top).max(0.0)
    }

    #[must_use]
    pub fn drawable_area(self, viewport: Viewport) -> DrawableArea {
        DrawableArea {
            left: self.left,
            right: (f64::from(viewport.width) - self.right).max(self.left),
        }
    }
}

/// Horizontal pointer bounds inside which gestures are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawableArea {
    pub left: f64,
    pub right: f64,
}

impl DrawableArea {
    #[must_use]
    pub fn new(left: f64, right: f64) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
        }
    }

    #[must_use]
    pub fn contains(self, x: f64) -> bool {
        x.is_finite() && x >= self.left && x <= self.right
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn clamp(self, x: f64) -> f64 {
        x.clamp(self.left, self.right)
    }
}
