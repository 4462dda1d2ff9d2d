//! Static asset handlers for the MindEase UI
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{http::StatusCode, response::{IntoResponse, Response}};

const MINDEASE_UI_CSS: &str = include_str!("../../../../mindease-common/static/mindease-ui.css");
const SESSION_JS: &str = include_str!("../../../static/mindease-session.js");
const CHATBOT_JS: &str = include_str!("../../../static/chatbot.js");
const MOOD_JS: &str = include_str!("../../../static/mood.js");

fn javascript(body: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        body,
    )
        .into_response()
}

/// GET /static/mindease-ui.css
pub async fn serve_mindease_ui_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        MINDEASE_UI_CSS,
    )
        .into_response()
}

/// GET /static/mindease-session.js
pub async fn serve_session_js() -> Response {
    javascript(SESSION_JS)
}

/// GET /static/chatbot.js
pub async fn serve_chatbot_js() -> Response {
    javascript(CHATBOT_JS)
}

/// GET /static/mood.js
pub async fn serve_mood_js() -> Response {
    javascript(MOOD_JS)
}
