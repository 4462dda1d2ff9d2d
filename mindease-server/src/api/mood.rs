//! Mood analyzer endpoints
//!
//! Each analysis updates one signal of the session on success. A failed
//! analysis returns an error body and leaves the session's signals as they
//! were.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::providers::SUPPORTED_LANGUAGES;
use crate::services::mood_analyzer::{AssessmentResult, ImageAnalysis, SpeechAnalysis, TextAnalysis};
use crate::{ApiResult, AppState};

/// Upper bound for uploaded images and recordings
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Request body for text analysis
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

/// Query string for speech analysis
#[derive(Debug, Deserialize)]
pub struct SpeechQuery {
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    SUPPORTED_LANGUAGES[0].to_string()
}

/// Supported recognition languages
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<&'static str>,
    pub default: &'static str,
}

/// GET /api/mood/languages
pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: SUPPORTED_LANGUAGES.to_vec(),
        default: SUPPORTED_LANGUAGES[0],
    })
}

/// POST /api/sessions/:id/mood/text
///
/// **Request:** `{"text": "..."}`
pub async fn analyze_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TextRequest>,
) -> ApiResult<Json<TextAnalysis>> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;

    let result = state
        .mood
        .analyze_text(&mut session.signals, &request.text)
        .await;
    state.finish(result).await.map(Json)
}

/// POST /api/sessions/:id/mood/speech?language=en-US
///
/// **Request body:** 16 kHz mono PCM WAV recording
pub async fn analyze_speech(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SpeechQuery>,
    body: Bytes,
) -> ApiResult<Json<SpeechAnalysis>> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;

    let result = state
        .mood
        .analyze_speech(&mut session.signals, &body, &query.language)
        .await;
    state.finish(result).await.map(Json)
}

/// POST /api/sessions/:id/mood/image
///
/// **Request body:** raw JPG or PNG bytes
pub async fn analyze_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> ApiResult<Json<ImageAnalysis>> {
    let session = state.session(id).await?;
    let mut session = session.lock().await;

    let result = state.mood.analyze_image(&mut session.signals, &body).await;
    state.finish(result).await.map(Json)
}

/// POST /api/sessions/:id/mood/assessment
///
/// Proceeds whatever the signal states; Unknown signals are ignored by
/// the composed prompt.
pub async fn request_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<AssessmentResult>> {
    let session = state.session(id).await?;
    let session = session.lock().await;

    let result = state.mood.request_assessment(&session.signals).await;
    state.finish(result).await.map(Json)
}

/// Build mood analyzer routes
pub fn mood_routes() -> Router<AppState> {
    Router::new()
        .route("/api/mood/languages", get(list_languages))
        .route("/api/sessions/:id/mood/text", post(analyze_text))
        .route("/api/sessions/:id/mood/speech", post(analyze_speech))
        .route("/api/sessions/:id/mood/image", post(analyze_image))
        .route("/api/sessions/:id/mood/assessment", post(request_assessment))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
