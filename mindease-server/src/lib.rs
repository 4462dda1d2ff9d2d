//! mindease-server library interface
//!
//! Exposes the router, application state, provider traits and services so
//! integration tests can drive the HTTP surface with fake providers.

pub mod api;
pub mod error;
pub mod providers;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::providers::Providers;
use crate::services::{AnalysisError, MedicalChatbot, MoodAnalyzer, Session, SessionStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-page-load sessions
    pub sessions: SessionStore,
    /// Mood analyzer service
    pub mood: Arc<MoodAnalyzer>,
    /// Medical chatbot service
    pub chatbot: Arc<MedicalChatbot>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last provider failure, for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(providers: Providers, session_idle_timeout: Duration) -> Self {
        Self {
            sessions: SessionStore::new(session_idle_timeout),
            chatbot: Arc::new(MedicalChatbot::new(Arc::clone(&providers.text))),
            mood: Arc::new(MoodAnalyzer::new(providers)),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Fetch a session or fail with 404
    pub async fn session(&self, id: Uuid) -> ApiResult<Arc<Mutex<Session>>> {
        self.sessions
            .get(id)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Session {} not found", id)))
    }

    /// Convert a service outcome, remembering provider failures for /health
    pub async fn finish<T>(&self, result: Result<T, AnalysisError>) -> ApiResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                if let AnalysisError::ServiceUnavailable(ref message) = err {
                    *self.last_error.write().await = Some(message.clone());
                }
                Err(ApiError::from(err))
            }
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // API routes
        .merge(api::session_routes())
        .merge(api::mood_routes())
        .merge(api::chat_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
