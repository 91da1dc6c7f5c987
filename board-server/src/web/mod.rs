//! Web layer for the departure board.
//!
//! Serves the rendered board as a PNG for the e-ink reader, a small
//! auto-refreshing HTML page around it, and the board as JSON.

mod dto;
mod routes;
mod state;
mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::KindleTemplate;
