use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::primitives::{MILLIS_PER_MINUTE, unix_millis_to_datetime};
use crate::core::{CanvasPadding, TimeMapper, Timestamp, Viewport};
use crate::error::{ChartError, ChartResult};

use super::AxisLabelConfig;

/// Gap between the count labels and the y axis.
const COUNT_LABEL_AXIS_GAP_PX: f64 = 5.0;
/// Gap between the x axis and the top of the time labels.
const TIME_LABEL_AXIS_GAP_PX: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountLabel {
    pub value: u64,
    /// Y of the grid row the label annotates.
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeLabel {
    pub time: Timestamp,
    /// Label center in surface coordinates.
    pub x: f64,
}

/// Y coordinates of the horizontal grid rows, top to bottom.
///
/// Row `grid_lines_count` (one past the drawn lines) coincides with the x axis.
#[must_use]
pub fn grid_row_ys(viewport: Viewport, padding: CanvasPadding, grid_lines_count: usize) -> Vec<f64> {
    if grid_lines_count == 0 {
        return Vec::new();
    }
    let gap = padding.drawable_height(viewport) / grid_lines_count as f64;
    (0..=grid_lines_count)
        .map(|row| padding.top + padding.grid_top + row as f64 * gap)
        .collect()
}

/// Count labels from `max_total` at the top row down to zero at the axis.
#[must_use]
pub fn count_labels(
    max_total: u64,
    viewport: Viewport,
    padding: CanvasPadding,
    grid_lines_count: usize,
) -> Vec<CountLabel> {
    if max_total == 0 || grid_lines_count == 0 {
        return Vec::new();
    }
    let step = max_total as f64 / grid_lines_count as f64;
    grid_row_ys(viewport, padding, grid_lines_count)
        .into_iter()
        .enumerate()
        .map(|(row, y)| CountLabel {
            value: (max_total as f64 - step * row as f64).floor().max(0.0) as u64,
            y,
        })
        .collect()
}

/// Time labels spread evenly across the drawable width.
///
/// As many labels as fit side by side, but never more than one per minute of
/// the visible span. The outermost label centers sit half a label width inside
/// the range. Inner labels round to the nearest minute, the outer ones floor;
/// labels that collapse onto the same minute are dropped. The label row
/// starts at `padding.left`, clear of the count-label gutter.
#[must_use]
pub fn time_labels(
    mapper: TimeMapper,
    labels: &AxisLabelConfig,
    padding: CanvasPadding,
) -> Vec<TimeLabel> {
    let width = mapper.drawable_width();
    let fitting = ((width + labels.time_label_gap_px)
        / (labels.time_label_width_px + labels.time_label_gap_px))
        .floor()
        .max(0.0) as usize;
    let span_minutes = (mapper.range().span() / MILLIS_PER_MINUTE).ceil().max(0.0) as usize;
    let count = fitting.min(span_minutes);
    if count == 0 {
        return Vec::new();
    }

    let half_label_time = labels.time_label_width_px / 2.0 * mapper.time_per_pixel();
    let first = mapper.range().min() + half_label_time;
    let interval = if count > 1 {
        (mapper.range().span() - 2.0 * half_label_time) / (count - 1) as f64
    } else {
        0.0
    };

    let mut result: Vec<TimeLabel> = Vec::with_capacity(count);
    for index in 0..count {
        let raw = first + interval * index as f64;
        let minutes = raw / MILLIS_PER_MINUTE;
        let outer = index == 0 || index + 1 == count;
        let time = if outer { minutes.floor() } else { minutes.round() } * MILLIS_PER_MINUTE;
        if result.iter().any(|label| label.time == time) {
            continue;
        }
        result.push(TimeLabel {
            time,
            x: padding.left + mapper.time_to_pixel_exact(time),
        });
    }
    result
}

/// Formats a timestamp with a `chrono` strftime pattern.
pub fn format_time_label(time: Timestamp, format: &str) -> ChartResult<String> {
    let datetime = unix_millis_to_datetime(time)?;
    let mut text = String::new();
    write!(text, "{}", datetime.format(format))
        .map_err(|_| ChartError::InvalidConfig(format!("invalid time label format `{format}`")))?;
    Ok(text)
}

pub(super) fn count_label_x(padding: CanvasPadding) -> f64 {
    (padding.left - COUNT_LABEL_AXIS_GAP_PX).max(0.0)
}

pub(super) fn time_label_y(viewport: Viewport, padding: CanvasPadding) -> f64 {
    f64::from(viewport.height) - padding.bottom + TIME_LABEL_AXIS_GAP_PX
}
