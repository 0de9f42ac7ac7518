use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::InferenceClient;
use crate::domain::{DomainError, ModelFamily};

/// Most recent calls kept by [`MockInferenceClient`]; older ones are dropped.
pub const MAX_RECORDED_INVOCATIONS: usize = 100;

/// A recorded `invoke_model` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    model_id: String,
    body: Value,
}

impl Invocation {
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// The request body as JSON (`Null` if the bytes were not JSON).
    pub fn body(&self) -> &Value {
        &self.body
    }
}

enum Scripted {
    Body(Vec<u8>),
    Failure(String),
}

/// In-process [`InferenceClient`] for tests and offline runs.
///
/// Scripted replies are returned in order. Once they run out, the client
/// echoes the question back in the reply shape of the model's family.
/// Only the last [`MAX_RECORDED_INVOCATIONS`] calls are recorded.
pub struct MockInferenceClient {
    scripted: Mutex<VecDeque<Scripted>>,
    invocations: Mutex<VecDeque<Invocation>>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            invocations: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_json_response(self, payload: Value) -> Self {
        self.with_raw_response(payload.to_string())
    }

    pub fn with_raw_response(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.scripted.get_mut().push_back(Scripted::Body(body.into()));
        self
    }

    /// Queue a transport failure.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.scripted
            .get_mut()
            .push_back(Scripted::Failure(message.into()));
        self
    }

    /// Recorded calls, oldest first.
    pub async fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().await.iter().cloned().collect()
    }

    fn echo_reply(model_id: &str, body: &Value) -> Value {
        let question = Self::question_of(body).unwrap_or_default();
        let reply = format!("Mock reply to: {question}");

        match ModelFamily::classify(model_id) {
            ModelFamily::TextCompletion => json!({ "generation": format!(" {reply}") }),
            ModelFamily::Chat => json!({
                "output": {"message": {"role": "assistant", "content": [{"type": "text", "text": reply}]}}
            }),
        }
    }

    /// Recover the user's question from a formatted request body.
    fn question_of(body: &Value) -> Option<String> {
        if let Some(prompt) = body.get("prompt").and_then(Value::as_str) {
            let (_, rest) = prompt.rsplit_once("Question: ")?;
            return Some(rest.trim_end_matches("\n\nAnswer:").to_string());
        }

        let user = body.get("messages")?.as_array()?.last()?;
        let text: String = user
            .get("content")?
            .as_array()?
            .iter()
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .collect();
        match text.rsplit_once("Question: ") {
            Some((_, question)) => Some(question.to_string()),
            None => Some(text),
        }
    }
}

impl Default for MockInferenceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError> {
        let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        {
            let mut invocations = self.invocations.lock().await;
            if invocations.len() == MAX_RECORDED_INVOCATIONS {
                invocations.pop_front();
            }
            invocations.push_back(Invocation {
                model_id: model_id.to_string(),
                body: body.clone(),
            });
        }

        let next = self.scripted.lock().await.pop_front();
        match next {
            Some(Scripted::Body(bytes)) => {
                debug!("Returning scripted mock response ({} bytes)", bytes.len());
                Ok(bytes)
            }
            Some(Scripted::Failure(message)) => Err(DomainError::transport(message)),
            None => Ok(Self::echo_reply(model_id, &body).to_string().into_bytes()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
