use crate::error::ChartResult;
use crate::render::{DrawCommand, RenderFrame, Renderer};

/// No-op renderer used by tests and headless widget usage.
///
/// Frames are still validated and tallied so tests can inspect what would
/// have been drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let (mut lines, mut rects, mut texts) = (0, 0, 0);
        for command in &frame.commands {
            match command {
                DrawCommand::Line(_) => lines += 1,
                DrawCommand::Rect(_) => rects += 1,
                DrawCommand::Text(_) => texts += 1,
                DrawCommand::Clear(_) => {}
            }
        }
        self.frames_rendered += 1;
        self.last_line_count = lines;
        self.last_rect_count = rects;
        self.last_text_count = texts;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
