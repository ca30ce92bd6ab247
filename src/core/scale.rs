use crate::core::{TimeRange, Timestamp};
use crate::error::{ChartError, ChartResult};

/// Bidirectional mapping between the visible time domain and pixel offsets.
///
/// Pixel offsets are measured from the surface origin and span
/// `[0, drawable_width]`. The mapper is a value type: rebuild it whenever the
/// drawable width or the time range changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMapper {
    range: TimeRange,
    drawable_width: f64,
}

impl TimeMapper {
    pub fn new(range: TimeRange, drawable_width: f64) -> ChartResult<Self> {
        if !drawable_width.is_finite() || drawable_width <= 0.0 {
            return Err(ChartError::MappingUnavailable(format!(
                "drawable width must be finite and > 0, got {drawable_width}"
            )));
        }
        if range.span() <= 0.0 {
            return Err(ChartError::MappingUnavailable(
                "time range span must be > 0".to_owned(),
            ));
        }

        Ok(Self {
            range,
            drawable_width,
        })
    }

    #[must_use]
    pub fn range(self) -> TimeRange {
        self.range
    }

    #[must_use]
    pub fn drawable_width(self) -> f64 {
        self.drawable_width
    }

    /// Time covered by one pixel.
    #[must_use]
    pub fn time_per_pixel(self) -> f64 {
        self.range.span() / self.drawable_width
    }

    /// Projects a time onto a whole pixel offset. Unset times stay unset.
    #[must_use]
    pub fn time_to_pixel(self, time: Option<Timestamp>) -> Option<f64> {
        time.filter(|t| t.is_finite())
            .map(|t| self.time_to_pixel_exact(t).round())
    }

    /// Continuous projection used for bar placement.
    #[must_use]
    pub fn time_to_pixel_exact(self, time: Timestamp) -> f64 {
        (time - self.range.min()) / self.range.span() * self.drawable_width
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> Timestamp {
        self.range.min() + pixel * self.time_per_pixel()
    }
}
