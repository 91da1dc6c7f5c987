//! Error image.
//!
//! When the feed cannot be fetched or decoded the display still gets an
//! image of the usual size, with the error written on it.

use embedded_graphics::geometry::Point;

use super::canvas::PixelBuffer;
use super::layout::LayoutConfig;
use super::surface::Surface;

/// Distance of the message from the top-left corner.
const INSET: i32 = 10;

/// Render a single diagnostic line on a blank canvas.
///
/// The message is cut short with `...` if it would not fit the width.
pub fn render_error(message: &str, layout: &LayoutConfig) -> PixelBuffer {
    let style = &layout.style;
    let mut canvas = PixelBuffer::new(layout.width, layout.height, style.background);

    let line = format!("Error fetching data: {message}");
    let max_width = layout.width.saturating_sub(2 * INSET as u32);
    let line = fit_width(&canvas, &line, max_width, layout);

    canvas.draw_text(&line, Point::new(INSET, INSET), style.error_font, style.text);
    canvas
}

fn fit_width<S: Surface>(surface: &S, line: &str, max_width: u32, layout: &LayoutConfig) -> String {
    let font = layout.style.error_font;
    if surface.measure(line, font).width <= max_width {
        return line.to_string();
    }

    let mut chars: Vec<char> = line.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if surface.measure(&candidate, font).width <= max_width {
            return candidate;
        }
    }
    String::new()
}
