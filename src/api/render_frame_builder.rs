use tracing::{debug, trace};

use crate::core::{TimeMapper, project_stacked_bars};
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::ChartWidget;
use super::axis_labels::{
    count_label_x, count_labels, format_time_label, grid_row_ys, time_label_y, time_labels,
};

const STROKE_WIDTH_PX: f64 = 1.0;

impl<R: Renderer> ChartWidget<R> {
    /// Materializes the current state into an ordered draw list.
    ///
    /// Grid, bars, selection and labels need a mapping; without data or with
    /// a surface too narrow for the padding only the axis is drawn.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let mut frame = RenderFrame::new(self.viewport);
        frame.clear(self.config.style.background);

        let mapper = self.mapper().filter(|_| !self.buckets.is_empty());
        if mapper.is_some() {
            self.push_grid(&mut frame);
        }
        self.push_axis(&mut frame);
        if let Some(mapper) = mapper {
            self.push_selection(&mut frame);
            self.push_bars(&mut frame, mapper)?;
            if self.config.labels.visible {
                self.push_labels(&mut frame, mapper)?;
            }
        }

        Ok(frame)
    }

    /// Builds and renders a frame unconditionally.
    ///
    /// An unmeasured surface renders nothing and is not an error.
    pub fn render(&mut self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            debug!(viewport = ?self.viewport, "render skipped, surface not measured");
            return Ok(());
        }
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        self.needs_redraw = false;
        trace!(commands = frame.commands.len(), "frame rendered");
        Ok(())
    }

    /// Renders only when a state change requested a redraw.
    ///
    /// Returns `true` when a frame was rendered.
    pub fn render_if_needed(&mut self) -> ChartResult<bool> {
        if !self.needs_redraw || !self.viewport.is_valid() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    fn push_grid(&self, frame: &mut RenderFrame) {
        let style = &self.config.style;
        let padding = self.config.padding;
        let count = self.config.grid_lines_count;
        let accent_row = count / 2;
        let right = f64::from(self.viewport.width);

        for (row, y) in grid_row_ys(self.viewport, padding, count)
            .into_iter()
            .take(count)
            .enumerate()
        {
            let color = if row == accent_row {
                style.grid_accent_line_color
            } else {
                style.grid_line_color
            };
            frame.line(LinePrimitive::new(
                padding.left,
                y,
                right,
                y,
                STROKE_WIDTH_PX,
                color,
            ));
        }
    }

    fn push_axis(&self, frame: &mut RenderFrame) {
        let padding = self.config.padding;
        let color = self.config.style.axis_color;
        let axis_y = f64::from(self.viewport.height) - padding.bottom;

        frame.line(LinePrimitive::new(
            padding.left,
            padding.top,
            padding.left,
            axis_y,
            STROKE_WIDTH_PX,
            color,
        ));
        frame.line(LinePrimitive::new(
            padding.left,
            axis_y,
            f64::from(self.viewport.width),
            axis_y,
            STROKE_WIDTH_PX,
            color,
        ));
    }

    fn push_selection(&self, frame: &mut RenderFrame) {
        let Some((start, end)) = self.selection.pixel_bounds() else {
            return;
        };
        let style = &self.config.style;
        let padding = self.config.padding;
        let bottom_y = f64::from(self.viewport.height) - padding.bottom;

        // A narrowed time range can project the selection past the plot;
        // only the part inside the drawable area is shown.
        let area = padding.drawable_area(self.viewport);
        if end < area.left || start > area.right {
            trace!(start, end, "selection outside drawable area");
            return;
        }

        for x in [start, end].into_iter().filter(|x| area.contains(*x)) {
            frame.line(LinePrimitive::new(
                x,
                bottom_y,
                x,
                padding.top,
                STROKE_WIDTH_PX,
                style.selection_line_color,
            ));
        }
        let (start, end) = (area.clamp(start), area.clamp(end));
        frame.rect(RectPrimitive::new(
            start,
            padding.top,
            end - start,
            (bottom_y - padding.top).max(0.0),
            style.selection_fill_color,
        ));
    }

    fn push_bars(&self, frame: &mut RenderFrame, mapper: TimeMapper) -> ChartResult<()> {
        let bars = project_stacked_bars(
            &self.buckets,
            mapper,
            self.viewport,
            self.config.padding,
            self.config.bar_width_px,
        )?;
        for segment in bars.iter().flat_map(|bar| bar.segments.iter()) {
            frame.rect(RectPrimitive::new(
                segment.x,
                segment.y,
                segment.width,
                segment.height,
                self.config.style.bar_color(&segment.category),
            ));
        }
        Ok(())
    }

    fn push_labels(&self, frame: &mut RenderFrame, mapper: TimeMapper) -> ChartResult<()> {
        let labels = &self.config.labels;
        let style = &self.config.style;
        let padding = self.config.padding;

        let count_x = count_label_x(padding);
        let half_count_font = labels.count_label_font_size_px / 2.0;
        for label in count_labels(
            self.buckets.max_total(),
            self.viewport,
            padding,
            self.config.grid_lines_count,
        ) {
            frame.text(TextPrimitive::new(
                label.value.to_string(),
                count_x,
                (label.y - half_count_font).max(0.0),
                labels.count_label_font_size_px,
                style.count_label_color,
                TextHAlign::Right,
            ));
        }

        let time_y = time_label_y(self.viewport, padding);
        for label in time_labels(mapper, labels, padding) {
            frame.text(TextPrimitive::new(
                format_time_label(label.time, &labels.time_format)?,
                label.x,
                time_y,
                labels.time_label_font_size_px,
                style.time_label_color,
                TextHAlign::Center,
            ));
        }
        Ok(())
    }
}

#[cfg(feature = "cairo-backend")]
impl<R: Renderer + crate::render::CairoContextRenderer> ChartWidget<R> {
    /// Renders into a Cairo context supplied by the host, e.g. a toolkit draw callback.
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            debug!(viewport = ?self.viewport, "cairo render skipped, surface not measured");
            return Ok(());
        }
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.needs_redraw = false;
        Ok(())
    }
}
