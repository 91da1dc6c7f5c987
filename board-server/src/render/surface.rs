//! Drawing boundary used by the layout engine.

use embedded_graphics::geometry::{Point, Size};

/// Built-in typefaces.
///
/// All faces are fixed bitmap fonts, but layout code must still measure
/// text through [`Surface::measure`] rather than assume a glyph width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// 6x10
    Small,
    /// 9x18
    Medium,
    /// 9x18 bold
    Bold,
    /// 10x20
    Large,
}

impl Font {
    /// Height of one line of text, used to reserve vertical space before
    /// anything is drawn.
    pub fn line_height(self) -> u32 {
        match self {
            Font::Small => 10,
            Font::Medium | Font::Bold => 18,
            Font::Large => 20,
        }
    }
}

/// A grayscale drawing surface.
///
/// Intensities are 0 (black) to 255 (white). Coordinates are pixels from
/// the top-left corner; anything drawn outside the surface is clipped.
pub trait Surface {
    /// Paint every pixel with `intensity`.
    fn fill_background(&mut self, intensity: u8);

    /// Size of the bounding box of `text` rendered in `font`.
    fn measure(&self, text: &str, font: Font) -> Size;

    /// Draw `text` with its bounding box's top-left corner at `top_left`.
    fn draw_text(&mut self, text: &str, top_left: Point, font: Font, intensity: u8);

    /// Draw a filled circle inscribed in the square at `top_left`.
    fn fill_circle(&mut self, top_left: Point, diameter: u32, intensity: u8);
}
