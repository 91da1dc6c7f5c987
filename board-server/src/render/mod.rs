//! Board image rendering.
//!
//! Lays a [`DepartureBoard`](crate::domain::DepartureBoard) out on a fixed
//! grayscale canvas sized for an e-ink display, and encodes the result as
//! PNG. Layout code draws through the [`Surface`] trait; [`PixelBuffer`]
//! is the real implementation.

mod board;
mod canvas;
mod encode;
mod fallback;
mod layout;
mod surface;

pub use board::{draw_board, render};
pub use canvas::PixelBuffer;
pub use encode::{EncodeError, encode_png};
pub use fallback::render_error;
pub use layout::{Column, LayoutConfig, LayoutError, Style};
pub use surface::{Font, Surface};
