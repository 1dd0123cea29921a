use smallvec::SmallVec;

use crate::geometry::{Point, Rect, Size};
use crate::theme::{Color, FontMetrics};

/// Drawing target consumed by the widget tree.
///
/// Coordinates are absolute. `fill` and `border` paint the current clip
/// rect; nested clips intersect with their parent.
pub trait Surface {
    /// Full drawable area.
    fn size(&self) -> Size;

    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);

    /// Fill the current clip rect.
    fn fill(&mut self, color: Color);

    /// Stroke a 1px border just inside the current clip rect.
    fn border(&mut self, color: Color);

    /// Draw a text run with its top-left at `pos`, clipped to the current clip.
    fn text(&mut self, pos: Point, color: Color, font: &FontMetrics, wrap: bool, text: &str);

    fn measure_text(&self, font: &FontMetrics, text: &str) -> Size {
        font.measure(text)
    }
}

/// One recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: Rect,
        color: Color,
    },
    Border {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        pos: Point,
        color: Color,
        /// Clip in effect when the text was issued.
        clip: Rect,
        wrap: bool,
    },
}

/// Surface that records draw commands instead of rasterizing them.
/// Decouples widget logic from whatever renderer the host uses.
pub struct DrawList {
    size: Size,
    clips: SmallVec<[Rect; 8]>,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            clips: SmallVec::new(),
            commands: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.clips.clear();
        self.commands.clear();
    }

    /// Effective clip: the innermost pushed rect, or the whole surface.
    pub fn current_clip(&self) -> Rect {
        self.clips
            .last()
            .copied()
            .unwrap_or(Rect::new(0, 0, self.size.width, self.size.height))
    }

    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    pub fn fills(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> Size {
        self.size
    }

    fn push_clip(&mut self, rect: Rect) {
        let clipped = self.current_clip().intersect(&rect);
        self.clips.push(clipped);
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }

    fn fill(&mut self, color: Color) {
        let rect = self.current_clip();
        if rect.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn border(&mut self, color: Color) {
        let rect = self.current_clip();
        if rect.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Border { rect, color });
    }

    fn text(&mut self, pos: Point, color: Color, _font: &FontMetrics, wrap: bool, text: &str) {
        let clip = self.current_clip();
        if clip.is_empty() || text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            color,
            clip,
            wrap,
        });
    }
}
