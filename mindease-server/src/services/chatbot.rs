//! Medical assistant chatbot
//!
//! Keeps the conversation in the session's [`ChatHistory`] and sends the
//! fixed system prompt followed by the whole history on every turn.

use mindease_common::{ChatHistory, ChatMessage};
use std::sync::Arc;
use tracing::{info, warn};

use super::AnalysisError;
use crate::providers::TextGenerator;

/// System prompt scoping the assistant to medical topics
pub const MEDICAL_SYSTEM_PROMPT: &str = "You are a professional medical assistant AI. \
You provide medical information about symptoms, medications, first-aid, and common health conditions. \
You do NOT engage in non-medical topics. \
For emergencies, you should recommend seeking immediate medical attention.";

/// Disclaimer shown under the chat
pub const DISCLAIMER: &str = "This AI assistant provides general medical guidance but is not a \
substitute for a licensed medical professional. If you have a medical emergency, seek immediate \
care from a doctor or hospital.";

/// Chatbot service
pub struct MedicalChatbot {
    text: Arc<dyn TextGenerator>,
}

impl MedicalChatbot {
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }

    /// Answer one user turn
    ///
    /// The user message is appended before the call and stays in the
    /// history if the call fails; the assistant reply is appended only on
    /// success.
    pub async fn reply(
        &self,
        history: &mut ChatHistory,
        user_input: &str,
    ) -> Result<String, AnalysisError> {
        if user_input.trim().is_empty() {
            return Err(AnalysisError::InputMissing(
                "Please enter a medical question.".to_string(),
            ));
        }

        history.push(ChatMessage::user(user_input));

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(MEDICAL_SYSTEM_PROMPT));
        messages.extend_from_slice(history.messages());

        let reply = self.text.generate(&messages).await.map_err(|e| {
            warn!("Chatbot completion failed: {}", e);
            AnalysisError::ServiceUnavailable(e.to_string())
        })?;

        history.push(ChatMessage::assistant(reply.clone()));
        info!(turns = history.len(), "Chatbot reply appended");

        Ok(reply)
    }
}
