//! detection-timeline: stacked time-series bar chart with a draggable
//! time-range selection.
//!
//! The crate is split into pure layers (`core` mapping and aggregation,
//! `interaction` selection state machine, `render` draw lists) and a stateful
//! `api::ChartWidget` facade that hosts drive with pointer events, surface
//! sizes and clock ticks.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartWidget, ChartWidgetConfig};
pub use error::{ChartError, ChartResult};
