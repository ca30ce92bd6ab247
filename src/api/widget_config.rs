use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CanvasPadding, TimeRangeTuning, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Colors used by the frame builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub background: Color,
    pub grid_line_color: Color,
    /// Color of the middle grid row.
    pub grid_accent_line_color: Color,
    pub axis_color: Color,
    pub selection_line_color: Color,
    pub selection_fill_color: Color,
    pub count_label_color: Color,
    pub time_label_color: Color,
    /// Bar color per category; unknown categories use `fallback_bar_color`.
    pub category_colors: IndexMap<String, Color>,
    pub fallback_bar_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let category_colors = [
            ("user", Color::rgb8(161, 119, 255)),
            ("resource", Color::rgb8(255, 187, 123)),
            ("cluster", Color::rgb8(114, 224, 240)),
        ]
        .into_iter()
        .map(|(category, color)| (category.to_owned(), color))
        .collect();

        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            grid_line_color: Color::rgb8(0xF5, 0xF5, 0xF5),
            grid_accent_line_color: Color::rgb8(0xD3, 0xD3, 0xD3),
            axis_color: Color::rgb8(0xE5, 0xE5, 0xE5),
            selection_line_color: Color::rgb8(0x97, 0x97, 0x97),
            selection_fill_color: Color::rgba(0.0, 0.0, 0.0, 0.05),
            count_label_color: Color::rgba(0.0, 0.0, 0.0, 0.75),
            time_label_color: Color::rgba(0.0, 0.0, 0.0, 0.45),
            category_colors,
            fallback_bar_color: Color::rgb8(0x97, 0x97, 0x97),
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn bar_color(&self, category: &str) -> Color {
        self.category_colors
            .get(category)
            .copied()
            .unwrap_or(self.fallback_bar_color)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background,
            self.grid_line_color,
            self.grid_accent_line_color,
            self.axis_color,
            self.selection_line_color,
            self.selection_fill_color,
            self.count_label_color,
            self.time_label_color,
            self.fallback_bar_color,
        ]
        .into_iter()
        .chain(self.category_colors.values().copied())
        {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }
        Ok(())
    }
}

/// Metrics for the count (vertical) and time (horizontal) axis labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabelConfig {
    pub visible: bool,
    pub time_label_width_px: f64,
    pub time_label_gap_px: f64,
    pub time_label_font_size_px: f64,
    pub count_label_font_size_px: f64,
    /// `chrono` format string for time labels.
    pub time_format: String,
}

impl Default for AxisLabelConfig {
    fn default() -> Self {
        Self {
            visible: true,
            time_label_width_px: 70.0,
            time_label_gap_px: 25.0,
            time_label_font_size_px: 10.0,
            count_label_font_size_px: 12.0,
            time_format: "%b %d %H:%M".to_owned(),
        }
    }
}

impl AxisLabelConfig {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.time_label_width_px.is_finite() || self.time_label_width_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "time label width must be finite and > 0".to_owned(),
            ));
        }
        if !self.time_label_gap_px.is_finite() || self.time_label_gap_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "time label gap must be finite and >= 0".to_owned(),
            ));
        }
        for (name, size) in [
            ("time", self.time_label_font_size_px),
            ("count", self.count_label_font_size_px),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} label font size must be finite and > 0"
                )));
            }
        }
        if self.time_format.trim().is_empty()
            || StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ChartError::InvalidConfig(format!(
                "time label format `{}` is not a valid strftime pattern",
                self.time_format
            )));
        }
        Ok(())
    }
}

/// Widget bootstrap configuration.
///
/// Serializable so hosts can keep chart setup in their own settings files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartWidgetConfig {
    /// Surface size used until the host reports a measured one.
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub padding: CanvasPadding,
    #[serde(default = "default_grid_lines_count")]
    pub grid_lines_count: usize,
    #[serde(default = "default_bar_width_px")]
    pub bar_width_px: f64,
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
    /// Categories present, in stacking order, in every bucket.
    #[serde(default = "default_seed_categories")]
    pub seed_categories: Vec<String>,
    #[serde(default)]
    pub time_range_tuning: TimeRangeTuning,
    #[serde(default)]
    pub labels: AxisLabelConfig,
    #[serde(default)]
    pub style: ChartStyle,
}

impl Default for ChartWidgetConfig {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl ChartWidgetConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            padding: CanvasPadding::default(),
            grid_lines_count: default_grid_lines_count(),
            bar_width_px: default_bar_width_px(),
            resize_debounce_ms: default_resize_debounce_ms(),
            seed_categories: default_seed_categories(),
            time_range_tuning: TimeRangeTuning::default(),
            labels: AxisLabelConfig::default(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: CanvasPadding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_grid_lines_count(mut self, count: usize) -> Self {
        self.grid_lines_count = count;
        self
    }

    #[must_use]
    pub fn with_bar_width_px(mut self, width: f64) -> Self {
        self.bar_width_px = width;
        self
    }

    #[must_use]
    pub fn with_resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_seed_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seed_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_labels_visible(mut self, visible: bool) -> Self {
        self.labels.visible = visible;
        self
    }

    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.padding.validate()?;
        self.time_range_tuning.validate()?;
        self.labels.validate()?;
        self.style.validate()?;
        if self.grid_lines_count == 0 {
            return Err(ChartError::InvalidConfig(
                "grid line count must be > 0".to_owned(),
            ));
        }
        if !self.bar_width_px.is_finite() || self.bar_width_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "bar width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(category) = self
            .seed_categories
            .iter()
            .find(|category| category.trim().is_empty())
        {
            return Err(ChartError::InvalidConfig(format!(
                "seed category `{category}` must not be blank"
            )));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }
}

fn default_grid_lines_count() -> usize {
    3
}

fn default_bar_width_px() -> f64 {
    5.0
}

fn default_resize_debounce_ms() -> u64 {
    DEFAULT_RESIZE_DEBOUNCE_MS
}

fn default_seed_categories() -> Vec<String> {
    ["user", "resource", "cluster"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}
