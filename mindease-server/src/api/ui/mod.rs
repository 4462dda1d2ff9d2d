//! UI Routes - HTML pages for the MindEase web interface
//!
//! Plain HTML/CSS/JS, no frameworks. Three independent pages:
//!
//! - **About** (`about`): static project description and team list
//! - **Medical Chatbot** (`pages::chatbot_page`): conversation with the assistant
//! - **Mood Analyzer** (`pages::mood_page`): text, speech and image signals
//!   fused into an assessment
//!
//! Each interactive page opens its own session on load.

use axum::{response::Redirect, routing::get, Router};
use crate::AppState;

mod about;
mod pages;
mod static_assets;

use about::about_page;
use pages::{chatbot_page, mood_page};
use static_assets::{serve_chatbot_js, serve_mindease_ui_css, serve_mood_js, serve_session_js};

/// Wrap page content in the shared document shell
pub(crate) fn render_page(title: &str, body: &str, scripts: &[&str]) -> String {
    let script_tags: String = scripts
        .iter()
        .map(|src| format!("    <script src=\"{}\"></script>\n", src))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/mindease-ui.css">
</head>
<body>
    <main class="container">
{body}
    </main>
{script_tags}</body>
</html>
"#
    )
}

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        // Page routes
        .route("/", get(|| async { Redirect::to("/about") }))
        .route("/about", get(about_page))
        .route("/chatbot", get(chatbot_page))
        .route("/mood", get(mood_page))
        // Static assets
        .route("/static/mindease-ui.css", get(serve_mindease_ui_css))
        .route("/static/mindease-session.js", get(serve_session_js))
        .route("/static/chatbot.js", get(serve_chatbot_js))
        .route("/static/mood.js", get(serve_mood_js))
}
