use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BucketedCounts, CanvasPadding, TimeMapper, Timestamp, Viewport};
use crate::error::{ChartError, ChartResult};

/// One filled segment of a stacked bar in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSegment {
    pub category: String,
    pub count: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Stacked bar for one time bucket, segments ordered bottom-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBar {
    pub time: Timestamp,
    pub x_center: f64,
    pub segments: SmallVec<[BarSegment; 4]>,
}

/// Projects aggregated buckets into stacked bar geometry.
///
/// Bars are x-centered on the bucket's mapped pixel with a fixed
/// `bar_width_px`. Segment offsets come from a running prefix sum over the
/// bucket's category order; zero-count categories produce no segment.
pub fn project_stacked_bars(
    buckets: &BucketedCounts,
    mapper: TimeMapper,
    viewport: Viewport,
    padding: CanvasPadding,
    bar_width_px: f64,
) -> ChartResult<Vec<StackedBar>> {
    if !bar_width_px.is_finite() || bar_width_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "bar width must be finite and > 0".to_owned(),
        ));
    }
    if buckets.is_empty() || buckets.max_total() == 0 {
        return Ok(Vec::new());
    }

    let active_height = padding.drawable_height(viewport);
    let baseline_y = active_height + padding.top + padding.grid_top;
    let px_per_count = active_height / buckets.max_total() as f64;
    let half_width = bar_width_px * 0.5;

    let mut bars = Vec::with_capacity(buckets.len());
    for (time, bucket) in buckets.iter() {
        let x_center = mapper.time_to_pixel_exact(time);
        let mut stacked = 0_u64;
        let mut segments = SmallVec::new();
        for (category, count) in bucket.categories() {
            stacked += count;
            if count == 0 {
                continue;
            }
            segments.push(BarSegment {
                category: category.to_owned(),
                count,
                x: x_center - half_width,
                y: baseline_y - stacked as f64 * px_per_count,
                width: bar_width_px,
                height: count as f64 * px_per_count,
            });
        }
        bars.push(StackedBar {
            time,
            x_center,
            segments,
        });
    }

    Ok(bars)
}
