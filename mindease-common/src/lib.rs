//! # MindEase Common Library
//!
//! Shared code for the MindEase wellness assistant:
//! - Session signal model and assessment prompt composition
//! - Emotion keyword extraction for the image path
//! - Chat message types shared by the chatbot and provider clients
//! - Configuration loading (TOML + environment)
//! - Common error type

pub mod chat;
pub mod config;
pub mod emotion;
pub mod error;
pub mod signals;

pub use chat::{ChatHistory, ChatMessage, Role};
pub use emotion::{extract_emotion_keyword, Emotion};
pub use error::{Error, Result};
pub use signals::{SessionSignals, Signal, SignalKind, UNKNOWN_MARKER};
