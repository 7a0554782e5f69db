//! Embedded single-page UI
//!
//! The whole client lives in one static page compiled into the binary;
//! it drives the extract/review/save flow against the JSON API.

use axum::{response::Html, routing::get, Router};

use crate::state::AppState;

/// Create the UI router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
