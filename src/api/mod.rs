//! Widget facade consumed by host applications.

mod axis_labels;
mod data_controller;
mod pointer_controller;
mod range_listener;
mod render_frame_builder;
mod resize_coordinator;
mod widget;
mod widget_config;

pub use axis_labels::{
    CountLabel, TimeLabel, count_labels, format_time_label, grid_row_ys, time_labels,
};
pub use range_listener::{
    DebouncedRangeListener, RangeChangeContext, RangeChangeFn, RangeChangeListener,
    SelectedRange, SharedSelectedRange,
};
pub use resize_coordinator::ResizeCoordinator;
pub use widget::ChartWidget;
pub use widget_config::{
    AxisLabelConfig, ChartStyle, ChartWidgetConfig, DEFAULT_RESIZE_DEBOUNCE_MS,
};
