use std::sync::Arc;

use tracing::debug;

use crate::application::{GenerateAnswerUseCase, InferenceClient};
use crate::domain::{ChatMessage, DomainError, GenerationParams};

pub const CHAT_MAX_TOKENS: u32 = 512;
pub const CHAT_TEMPERATURE: f64 = 0.7;

const NO_CONTEXT: [&str; 0] = [];

/// An interactive session: one inference per submitted message, with the
/// transcript kept for display.
///
/// The history is not sent back to the model; each submission is answered
/// on its own, without context snippets.
pub struct ChatSessionUseCase {
    generate: GenerateAnswerUseCase,
    model_id: String,
    params: GenerationParams,
    history: Vec<ChatMessage>,
}

impl ChatSessionUseCase {
    pub fn new(client: Arc<dyn InferenceClient>, model_id: impl Into<String>) -> Self {
        Self {
            generate: GenerateAnswerUseCase::new(client),
            model_id: model_id.into(),
            params: GenerationParams::new(CHAT_MAX_TOKENS, CHAT_TEMPERATURE),
            history: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Record `input`, ask the model, record and return the reply.
    /// The message is recorded and sent exactly as typed.
    ///
    /// If the inference call fails the user message stays in the history
    /// and no reply is recorded.
    pub async fn submit(&mut self, input: &str) -> Result<&ChatMessage, DomainError> {
        if input.trim().is_empty() {
            return Err(DomainError::invalid_input("message is empty"));
        }

        self.history.push(ChatMessage::user(input));
        debug!("Submitting message {} of session", self.history.len());

        let answer = self
            .generate
            .execute(&self.model_id, input, &NO_CONTEXT, self.params)
            .await?;

        self.history.push(ChatMessage::assistant(answer));
        self.history
            .last()
            .ok_or_else(|| DomainError::internal("history is empty after push"))
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn params(&self) -> GenerationParams {
        self.params
    }
}
