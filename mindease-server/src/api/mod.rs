//! HTTP API handlers for mindease-server
//!
//! Pages are plain HTML/JS that call the JSON endpoints below. All state
//! lives in the session named in the path.

pub mod buildinfo;
pub mod chat;
pub mod health;
pub mod mood;
pub mod sessions;
pub mod ui;

pub use chat::chat_routes;
pub use health::health_routes;
pub use mood::mood_routes;
pub use sessions::session_routes;
pub use ui::ui_routes;
