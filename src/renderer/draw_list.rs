//! Frame recorder
//!
//! Captures one frame of draw calls so a backend can replay it later, or a
//! test can look at what a screen drew.

use glam::IVec2;

use super::{Font, Pen, Renderer, SpriteRect, TextAlign};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Pen(Pen),
    Sprite {
        rect: SpriteRect,
        at: IVec2,
    },
    Text {
        text: String,
        font: Font,
        at: IVec2,
        align: TextAlign,
        pen: Pen,
    },
    HSpan {
        at: IVec2,
        len: i32,
    },
    VSpan {
        at: IVec2,
        len: i32,
    },
}

/// Recorded frame
#[derive(Debug, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    pen: Pen,
    /// Pen last written to `commands` in this frame
    recorded_pen: Option<Pen>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            pen: Pen::WHITE,
            recorded_pen: None,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text drawn this frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn sprites(&self) -> impl Iterator<Item = (SpriteRect, IVec2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { rect, at } => Some((*rect, *at)),
            _ => None,
        })
    }
}

impl Renderer for DrawList {
    /// Starts a new frame; everything recorded before is overdrawn anyway
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.recorded_pen = None;
    }

    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
        if self.recorded_pen != Some(pen) {
            self.recorded_pen = Some(pen);
            self.commands.push(DrawCommand::Pen(pen));
        }
    }

    fn sprite(&mut self, rect: SpriteRect, at: IVec2) {
        self.commands.push(DrawCommand::Sprite { rect, at });
    }

    fn text(&mut self, text: &str, font: Font, at: IVec2, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            font,
            at,
            align,
            pen: self.pen,
        });
    }

    fn h_span(&mut self, at: IVec2, len: i32) {
        self.commands.push(DrawCommand::HSpan { at, len });
    }

    fn v_span(&mut self, at: IVec2, len: i32) {
        self.commands.push(DrawCommand::VSpan { at, len });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_a_new_frame() {
        let mut list = DrawList::new();
        list.text("old", Font::Message, IVec2::ZERO, TextAlign::TopLeft);
        list.clear();
        list.set_pen(Pen::YELLOW);
        list.text("new", Font::Message, IVec2::ZERO, TextAlign::TopLeft);
        assert!(!list.contains_text("old"));
        assert!(list.contains_text("new"));
        assert_eq!(list.commands()[0], DrawCommand::Clear);
        match &list.commands()[2] {
            DrawCommand::Text { pen, .. } => assert_eq!(*pen, Pen::YELLOW),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_each_frame_records_its_own_pen() {
        let mut list = DrawList::new();
        list.clear();
        list.set_pen(Pen::WHITE);
        list.h_span(IVec2::ZERO, 4);
        list.clear();
        list.set_pen(Pen::WHITE);
        assert_eq!(list.commands(), &[DrawCommand::Clear, DrawCommand::Pen(Pen::WHITE)][..]);
    }

    #[test]
    fn test_repeated_pen_is_recorded_once() {
        let mut list = DrawList::new();
        list.set_pen(Pen::YELLOW);
        list.set_pen(Pen::YELLOW);
        assert_eq!(list.len(), 1);
    }
}
