//! Interactive page handlers
//!
//! Markup lives in `static/`; behavior in the page scripts.

use axum::response::Html;

use super::render_page;
use crate::services::chatbot::DISCLAIMER;

const CHATBOT_HTML: &str = include_str!("../../../static/chatbot.html");
const MOOD_HTML: &str = include_str!("../../../static/mood.html");

/// GET /chatbot
pub async fn chatbot_page() -> Html<String> {
    let body = CHATBOT_HTML.replace("{{DISCLAIMER}}", DISCLAIMER);
    Html(render_page(
        "AI Medical Assistant",
        &body,
        &["/static/mindease-session.js", "/static/chatbot.js"],
    ))
}

/// GET /mood
pub async fn mood_page() -> Html<String> {
    Html(render_page(
        "AI-Powered Mental Health Analyzer",
        MOOD_HTML,
        &["/static/mindease-session.js", "/static/mood.js"],
    ))
}
