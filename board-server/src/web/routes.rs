//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::feed::{FeedError, FeedSource};
use crate::normalize::normalize;
use crate::render::{EncodeError, encode_png, render, render_error};

use super::dto::*;
use super::state::AppState;
use super::templates::KindleTemplate;

/// Create the application router.
pub fn create_router<F: FeedSource>(state: AppState<F>) -> Router {
    Router::new()
        .route("/", get(index_page::<F>))
        .route("/health", get(health))
        .route("/kindle.png", get(kindle_image::<F>))
        .route("/departures", get(departures::<F>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Wrapper page that shows the image and reloads itself.
async fn index_page<F: FeedSource>(State(state): State<AppState<F>>) -> Result<Response, AppError> {
    let template = KindleTemplate {
        title: state.layout.title.clone(),
        refresh_secs: state.refresh_secs,
        width: state.layout.width,
        height: state.layout.height,
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html).into_response())
}

/// The board as a PNG.
///
/// Feed failures still produce an image, with the error written on it:
/// the e-ink reader has no way to show an HTTP error.
async fn kindle_image<F: FeedSource>(
    State(state): State<AppState<F>>,
) -> Result<Response, AppError> {
    let now = station_now(&state);

    let image = match state.feed.fetch_updates().await {
        Ok(updates) => {
            let board = normalize(&updates, &state.station, &now);
            render(&board, &state.layout, &now)
        }
        Err(e) => {
            warn!(error = %e, "feed unavailable, rendering error image");
            render_error(&e.to_string(), &state.layout)
        }
    };

    let png = encode_png(&image)?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    )
        .into_response())
}

/// The board as JSON.
async fn departures<F: FeedSource>(
    State(state): State<AppState<F>>,
) -> Result<Json<BoardResponse>, AppError> {
    let now = station_now(&state);
    let updates = state.feed.fetch_updates().await?;
    let board = normalize(&updates, &state.station, &now);

    Ok(Json(BoardResponse::from_board(&board, &state.station, &now)))
}

fn station_now<F>(state: &AppState<F>) -> DateTime<Tz> {
    Utc::now().with_timezone(&state.station.time_zone())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadGateway { message: String },
    Internal { message: String },
}

impl From<FeedError> for AppError {
    fn from(e: FeedError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl From<EncodeError> for AppError {
    fn from(e: EncodeError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
