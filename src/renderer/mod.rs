//! Rendering contract
//!
//! Screens never touch pixels. They describe a frame through the
//! [`Renderer`] trait: sprites cut from an 8px-cell sprite sheet, aligned
//! text, and pen-coloured spans. A device backend implements the trait; the
//! [`DrawList`] recorder implements it for headless runs and tests.

pub mod draw_list;
pub mod scene;

use glam::IVec2;

pub use draw_list::{DrawCommand, DrawList};

/// Sprite sheet cell size (pixels)
pub const SPRITE_CELL: i32 = 8;

/// RGBA drawing colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pen {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pen {
    pub const WHITE: Pen = Pen::rgb(255, 255, 255);
    pub const YELLOW: Pen = Pen::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Region of the sprite sheet, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteRect {
    pub col: i32,
    pub row: i32,
    pub w: i32,
    pub h: i32,
}

impl SpriteRect {
    pub const fn new(col: i32, row: i32, w: i32, h: i32) -> Self {
        Self { col, row, w, h }
    }

    /// Size on screen (pixels)
    pub fn pixel_size(&self) -> IVec2 {
        IVec2::new(self.w, self.h) * SPRITE_CELL
    }
}

/// Font classes the screens use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Prompts and menu text
    Message,
    /// Score lines
    Number,
    /// Large transient messages
    Splash,
}

impl Font {
    /// Fixed glyph cell (pixels)
    pub fn glyph_size(self) -> IVec2 {
        match self {
            Font::Message => IVec2::new(8, 12),
            Font::Number => IVec2::new(6, 8),
            Font::Splash => IVec2::new(16, 24),
        }
    }
}

/// Which point of the text box sits on the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlign {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    CenterCenter,
}

impl TextAlign {
    /// Top-left corner of a box of `size` anchored at `at`
    pub fn origin(self, at: IVec2, size: IVec2) -> IVec2 {
        match self {
            TextAlign::TopLeft => at,
            TextAlign::TopCenter => IVec2::new(at.x - size.x / 2, at.y),
            TextAlign::TopRight => IVec2::new(at.x - size.x, at.y),
            TextAlign::CenterLeft => IVec2::new(at.x, at.y - size.y / 2),
            TextAlign::CenterCenter => at - size / 2,
        }
    }
}

/// Drawing surface
pub trait Renderer {
    fn clear(&mut self);
    fn set_pen(&mut self, pen: Pen);
    fn sprite(&mut self, rect: SpriteRect, at: IVec2);
    fn text(&mut self, text: &str, font: Font, at: IVec2, align: TextAlign);
    /// Fill `len` pixels rightward from `at` with the pen
    fn h_span(&mut self, at: IVec2, len: i32);
    /// Fill `len` pixels downward from `at` with the pen
    fn v_span(&mut self, at: IVec2, len: i32);

    /// Extent of `text` in `font`; fixed-width by default
    fn measure_text(&self, text: &str, font: Font) -> IVec2 {
        let glyph = font.glyph_size();
        IVec2::new(glyph.x * text.chars().count() as i32, glyph.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_alignment() {
        let size = IVec2::new(40, 12);
        let at = IVec2::new(160, 120);
        assert_eq!(TextAlign::TopLeft.origin(at, size), at);
        assert_eq!(TextAlign::TopRight.origin(at, size), IVec2::new(120, 120));
        assert_eq!(TextAlign::CenterCenter.origin(at, size), IVec2::new(140, 114));
    }

    #[test]
    fn test_sprite_pixels() {
        assert_eq!(SpriteRect::new(0, 0, 4, 2).pixel_size(), IVec2::new(32, 16));
    }
}
