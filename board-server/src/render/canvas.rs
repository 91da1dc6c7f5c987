//! Grayscale pixel buffer.
//!
//! [`PixelBuffer`] stores 8-bit luma pixels in an `image::GrayImage` and
//! acts as an `embedded-graphics` draw target, so shapes and bitmap text
//! can be drawn straight into the buffer that gets PNG-encoded.

use std::convert::Infallible;

use embedded_graphics::Drawable;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X18, FONT_9X18_BOLD, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Gray8, GrayColor};
use embedded_graphics::primitives::{Circle, Primitive, PrimitiveStyle};
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Pixel;
use image::{GrayImage, Luma};

use super::surface::{Font, Surface};

/// Fixed-size single-channel raster. 0 is black, 255 is white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: GrayImage,
}

impl PixelBuffer {
    /// Create a buffer filled with `background`.
    pub fn new(width: u32, height: u32, background: u8) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, Luma([background])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Intensity at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.image.get_pixel_checked(x, y).map(|p| p.0[0])
    }

    /// Row-major pixel data.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for PixelBuffer {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.image.dimensions();
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x < width && y < height {
                self.image.put_pixel(x, y, Luma([color.luma()]));
            }
        }
        Ok(())
    }
}

impl Surface for PixelBuffer {
    fn fill_background(&mut self, intensity: u8) {
        for pixel in self.image.pixels_mut() {
            *pixel = Luma([intensity]);
        }
    }

    fn measure(&self, text: &str, font: Font) -> Size {
        MonoTextStyle::new(mono_font(font), Gray8::BLACK)
            .measure_string(text, Point::zero(), Baseline::Top)
            .bounding_box
            .size
    }

    fn draw_text(&mut self, text: &str, top_left: Point, font: Font, intensity: u8) {
        let style = MonoTextStyle::new(mono_font(font), Gray8::new(intensity));
        infallible(Text::with_baseline(text, top_left, style, Baseline::Top).draw(self));
    }

    fn fill_circle(&mut self, top_left: Point, diameter: u32, intensity: u8) {
        let style = PrimitiveStyle::with_fill(Gray8::new(intensity));
        infallible(Circle::new(top_left, diameter).into_styled(style).draw(self));
    }
}

fn mono_font(font: Font) -> &'static MonoFont<'static> {
    match font {
        Font::Small => &FONT_6X10,
        Font::Medium => &FONT_9X18,
        Font::Bold => &FONT_9X18_BOLD,
        Font::Large => &FONT_10X20,
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
