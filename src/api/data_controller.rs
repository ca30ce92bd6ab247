use tracing::{debug, warn};

use crate::core::{
    BucketedCounts, DetectionRecord, EntityCount, TimeRange, entity_counts,
};
use crate::error::ChartError;
use crate::render::Renderer;

use super::ChartWidget;

impl<R: Renderer> ChartWidget<R> {
    /// Replaces the dataset and refits the visible time range.
    ///
    /// An empty dataset leaves the widget without a range: nothing is
    /// mapped and pointer gestures are ignored until data arrives.
    pub fn set_data(&mut self, records: Vec<EntityCount>) {
        let range = TimeRange::from_times(
            records.iter().map(|record| record.time),
            self.config.time_range_tuning,
        );
        let range = match range {
            Ok(range) => Some(range),
            Err(ChartError::EmptyData) => {
                debug!("empty dataset, time range unset");
                None
            }
            Err(err) => {
                warn!(error = %err, "dataset rejected, time range unset");
                None
            }
        };
        self.replace_data(records, range);
    }

    /// Replaces the dataset while keeping a host-chosen time range.
    pub fn set_data_with_range(&mut self, records: Vec<EntityCount>, range: TimeRange) {
        self.replace_data(records, Some(range));
    }

    /// Converts host detection records and loads them.
    pub fn set_detections(&mut self, records: &[DetectionRecord]) {
        self.set_data(entity_counts(records));
    }

    fn replace_data(&mut self, records: Vec<EntityCount>, range: Option<TimeRange>) {
        self.buckets = BucketedCounts::aggregate(&records, &self.config.seed_categories);
        self.records = records;
        self.time_range = range;
        debug!(
            records = self.records.len(),
            buckets = self.buckets.len(),
            max_total = self.buckets.max_total(),
            "dataset updated"
        );
        self.reproject_selection();
        self.request_redraw();
    }

    #[must_use]
    pub fn records(&self) -> &[EntityCount] {
        &self.records
    }

    #[must_use]
    pub fn buckets(&self) -> &BucketedCounts {
        &self.buckets
    }
}
