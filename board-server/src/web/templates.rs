//! Askama templates for the web frontend.

use askama::Template;

/// Page showing the board image, reloading itself periodically.
#[derive(Template)]
#[template(path = "kindle.html")]
pub struct KindleTemplate {
    pub title: String,
    pub refresh_secs: u64,
    pub width: u32,
    pub height: u32,
}
