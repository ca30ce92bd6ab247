//! Host-facing detection records and their conversion into entity counts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{EntityCount, TimeRange, TimeRangeTuning, Timestamp};
use crate::error::{ChartError, ChartResult};

/// Separator between the category prefix and the detection kind.
pub const CATEGORY_KIND_SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// `"<prefix>/<kind>"`.
    pub category: String,
    pub time: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionKind {
    Anomaly,
    Incident,
}

impl DetectionKind {
    /// Parses the kind suffix of a detection category.
    #[must_use]
    pub fn from_category(category: &str) -> Option<Self> {
        let (_, kind) = category.rsplit_once(CATEGORY_KIND_SEPARATOR)?;
        match kind.trim() {
            "anomaly" => Some(Self::Anomaly),
            "incident" => Some(Self::Incident),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub anomaly: u64,
    pub incident: u64,
}

impl DetectionSummary {
    #[must_use]
    pub fn total(self) -> u64 {
        self.anomaly + self.incident
    }
}

/// One entity with its detections, in the host's input format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub etype: String,
    pub eid: String,
    pub detection: IndexMap<String, Detection>,
}

impl DetectionRecord {
    /// Category used on the chart; `principal` entities are shown as `user`.
    #[must_use]
    pub fn entity_category(&self) -> String {
        let etype = self.etype.trim().to_lowercase();
        if etype == "principal" {
            "user".to_owned()
        } else {
            etype
        }
    }

    /// Time of the first detection, which positions the whole record.
    #[must_use]
    pub fn time(&self) -> Option<Timestamp> {
        self.detection.values().next().map(|detection| detection.time)
    }

    #[must_use]
    pub fn summary(&self) -> DetectionSummary {
        let mut summary = DetectionSummary::default();
        for detection in self.detection.values() {
            match DetectionKind::from_category(&detection.category) {
                Some(DetectionKind::Anomaly) => summary.anomaly += 1,
                Some(DetectionKind::Incident) => summary.incident += 1,
                None => {}
            }
        }
        summary
    }

    /// Returns `None` for records without any detection.
    #[must_use]
    pub fn entity_count(&self) -> Option<EntityCount> {
        let time = self.time()?;
        Some(EntityCount::new(
            time,
            self.summary().total(),
            format!("{}:{}", self.entity_category(), self.eid),
        ))
    }
}

pub fn parse_detection_records(input: &str) -> ChartResult<Vec<DetectionRecord>> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse detection records: {e}")))
}

#[must_use]
pub fn entity_counts(records: &[DetectionRecord]) -> Vec<EntityCount> {
    records
        .iter()
        .filter_map(|record| {
            let count = record.entity_count();
            if count.is_none() {
                debug!(eid = %record.eid, "skipping record without detections");
            }
            count
        })
        .collect()
}

/// Fits the visible domain from the first detection time of every record.
pub fn time_range_for_detections(
    records: &[DetectionRecord],
    tuning: TimeRangeTuning,
) -> ChartResult<TimeRange> {
    TimeRange::from_times(records.iter().filter_map(DetectionRecord::time), tuning)
}
