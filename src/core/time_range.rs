use serde::{Deserialize, Serialize};

use crate::core::Timestamp;
use crate::core::primitives::HALF_DAY_MILLIS;
use crate::error::{ChartError, ChartResult};

/// Tuning controls for fitting the visible time domain to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRangeTuning {
    /// Fraction of the data extent added on each side.
    pub padding_ratio: f64,
    /// Absolute pad applied on each side when all samples share one timestamp.
    pub single_point_pad: f64,
}

impl Default for TimeRangeTuning {
    fn default() -> Self {
        Self {
            padding_ratio: 0.05,
            single_point_pad: HALF_DAY_MILLIS,
        }
    }
}

impl TimeRangeTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(ChartError::InvalidConfig(
                "time padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.single_point_pad.is_finite() || self.single_point_pad <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "single point pad must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Visible time domain of the chart. Always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    min: Timestamp,
    max: Timestamp,
}

impl TimeRange {
    pub fn new(min: Timestamp, max: Timestamp) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "time range bounds must be finite".to_owned(),
            ));
        }
        Ok(Self {
            min: min.min(max),
            max: min.max(max),
        })
    }

    /// Fits a padded domain around the extent of `times`.
    ///
    /// Fails with `ChartError::EmptyData` when `times` yields nothing.
    pub fn from_times<I>(times: I, tuning: TimeRangeTuning) -> ChartResult<Self>
    where
        I: IntoIterator<Item = Timestamp>,
    {
        let tuning = tuning.validate()?;

        let mut extent: Option<(Timestamp, Timestamp)> = None;
        for time in times {
            if !time.is_finite() {
                return Err(ChartError::InvalidData(
                    "sample times must be finite".to_owned(),
                ));
            }
            extent = Some(match extent {
                Some((min, max)) => (min.min(time), max.max(time)),
                None => (time, time),
            });
        }

        let (min, max) = extent.ok_or(ChartError::EmptyData)?;
        let delta = max - min;
        if delta > 0.0 {
            let pad = delta * tuning.padding_ratio;
            Self::new(min - pad, max + pad)
        } else {
            Self::new(
                min - tuning.single_point_pad,
                max + tuning.single_point_pad,
            )
        }
    }

    #[must_use]
    pub fn min(self) -> Timestamp {
        self.min
    }

    #[must_use]
    pub fn max(self) -> Timestamp {
        self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, time: Timestamp) -> bool {
        time >= self.min && time <= self.max
    }
}
