use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::Timestamp;

/// Separator between the category and the id inside an entity label.
pub const ENTITY_LABEL_SEPARATOR: char = ':';

/// Normalized record consumed by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCount {
    pub time: Timestamp,
    pub count: u64,
    /// `"<category>:<id>"`.
    pub entity: String,
}

impl EntityCount {
    #[must_use]
    pub fn new(time: Timestamp, count: u64, entity: impl Into<String>) -> Self {
        Self {
            time,
            count,
            entity: entity.into(),
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        category_of(&self.entity)
    }
}

/// Returns the part of an entity label before the first separator.
#[must_use]
pub fn category_of(entity: &str) -> &str {
    entity
        .split_once(ENTITY_LABEL_SEPARATOR)
        .map_or(entity, |(category, _)| category)
        .trim()
}

/// Per-category totals for one timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregatedBucket {
    category_counts: IndexMap<String, u64>,
    total: u64,
}

impl AggregatedBucket {
    fn seeded(seed_categories: &[String]) -> Self {
        Self {
            category_counts: seed_categories
                .iter()
                .map(|category| (category.clone(), 0))
                .collect(),
            total: 0,
        }
    }

    fn add(&mut self, category: &str, count: u64) {
        match self.category_counts.get_mut(category) {
            Some(value) => *value += count,
            None => {
                self.category_counts.insert(category.to_owned(), count);
            }
        }
        self.total += count;
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn count(&self, category: &str) -> Option<u64> {
        self.category_counts.get(category).copied()
    }

    /// All categories in stacking order, zero counts included.
    pub fn categories(&self) -> impl Iterator<Item = (&str, u64)> {
        self.category_counts
            .iter()
            .map(|(category, count)| (category.as_str(), *count))
    }
}

/// Buckets keyed by timestamp in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BucketedCounts {
    buckets: IndexMap<OrderedFloat<f64>, AggregatedBucket>,
    max_total: u64,
}

impl BucketedCounts {
    /// Groups records by timestamp and category in a single pass.
    ///
    /// Every bucket starts with `seed_categories` at zero so the stacking
    /// order stays identical across buckets.
    #[must_use]
    pub fn aggregate(records: &[EntityCount], seed_categories: &[String]) -> Self {
        let mut buckets: IndexMap<OrderedFloat<f64>, AggregatedBucket> = IndexMap::new();
        let mut max_total = 0;

        for record in records {
            let bucket = buckets
                .entry(OrderedFloat(record.time))
                .or_insert_with(|| AggregatedBucket::seeded(seed_categories));
            bucket.add(record.category(), record.count);
            max_total = max_total.max(bucket.total);
        }

        Self { buckets, max_total }
    }

    #[must_use]
    pub fn max_total(&self) -> u64 {
        self.max_total
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[must_use]
    pub fn bucket(&self, time: Timestamp) -> Option<&AggregatedBucket> {
        self.buckets.get(&OrderedFloat(time))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, &AggregatedBucket)> {
        self.buckets.iter().map(|(time, bucket)| (time.0, bucket))
    }

    pub fn times(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.buckets.keys().map(|time| time.0)
    }
}
