pub mod aggregation;
pub mod debounce;
pub mod detection;
pub mod primitives;
pub mod scale;
pub mod stacked_bars;
pub mod time_range;
pub mod types;

pub use aggregation::{AggregatedBucket, BucketedCounts, EntityCount, category_of};
pub use debounce::TrailingDebouncer;
pub use detection::{
    Detection, DetectionKind, DetectionRecord, DetectionSummary, entity_counts,
    parse_detection_records, time_range_for_detections,
};
pub use scale::TimeMapper;
pub use stacked_bars::{BarSegment, StackedBar, project_stacked_bars};
pub use time_range::{TimeRange, TimeRangeTuning};
pub use types::{CanvasPadding, DrawableArea, Timestamp, Viewport};
