use std::time::Duration;

use tracing::debug;

use crate::core::{BucketedCounts, EntityCount, TimeMapper, TimeRange, Viewport};
use crate::error::ChartResult;
use crate::interaction::{Selection, SelectionContext};
use crate::render::Renderer;

use super::{ChartWidgetConfig, RangeChangeListener, ResizeCoordinator};

/// Stacked time-series bar chart with a draggable range selection.
///
/// The widget is the single owner of mutable chart state. Hosts feed it
/// pointer events, surface sizes and clock ticks; it answers with range
/// notifications and render frames.
pub struct ChartWidget<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartWidgetConfig,
    pub(super) viewport: Viewport,
    pub(super) records: Vec<EntityCount>,
    pub(super) buckets: BucketedCounts,
    pub(super) time_range: Option<TimeRange>,
    pub(super) selection: Selection,
    pub(super) resize: ResizeCoordinator,
    pub(super) listeners: Vec<Box<dyn RangeChangeListener>>,
    pub(super) now: Duration,
    pub(super) needs_redraw: bool,
}

impl<R: Renderer> ChartWidget<R> {
    pub fn new(renderer: R, config: ChartWidgetConfig) -> ChartResult<Self> {
        config.validate()?;
        let resize = ResizeCoordinator::new(config.resize_debounce());
        Ok(Self {
            renderer,
            viewport: config.viewport,
            config,
            records: Vec::new(),
            buckets: BucketedCounts::default(),
            time_range: None,
            selection: Selection::idle(),
            resize,
            listeners: Vec::new(),
            now: Duration::ZERO,
            needs_redraw: true,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartWidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn time_range(&self) -> Option<TimeRange> {
        self.time_range
    }

    /// Fresh mapper for the current range and surface width.
    ///
    /// `None` while there is no data or the surface has not been measured.
    #[must_use]
    pub fn mapper(&self) -> Option<TimeMapper> {
        let range = self.time_range?;
        TimeMapper::new(range, self.config.padding.drawable_width(self.viewport)).ok()
    }

    #[must_use]
    pub fn selection_context(&self) -> Option<SelectionContext> {
        self.mapper().map(|mapper| {
            SelectionContext::new(mapper, self.config.padding.drawable_area(self.viewport))
        })
    }

    pub fn add_range_listener(&mut self, listener: Box<dyn RangeChangeListener>) {
        self.listeners.push(listener);
    }

    #[must_use]
    pub fn range_listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Host clock as last reported through `advance_clock`.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Advances the host clock, firing due timers.
    ///
    /// Returns `true` when a debounced resize was applied.
    pub fn advance_clock(&mut self, now: Duration) -> bool {
        self.now = self.now.max(now);
        let resized = self.apply_due_resize();
        for listener in &mut self.listeners {
            listener.on_tick(self.now);
        }
        resized
    }

    /// Keeps selection pixels in sync after the mapper inputs changed.
    pub(super) fn reproject_selection(&mut self) {
        if self.selection.is_idle() {
            return;
        }
        match self.mapper() {
            Some(mapper) => self.selection = self.selection.reprojected(mapper),
            None => debug!("mapping unavailable, selection pixels left stale"),
        }
    }

    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub(super) fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
