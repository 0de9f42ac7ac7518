use serde::Serialize;

use super::{ModelFamily, Role};
use crate::domain::DomainError;

/// Body for `invoke_model`, shaped for the target [`ModelFamily`].
///
/// Serialized untagged: a text-completion body has a top-level `prompt` and
/// no `messages`, a chat body the reverse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    TextCompletion(TextCompletionBody),
    Chat(ChatBody),
}

impl RequestBody {
    pub fn family(&self) -> ModelFamily {
        match self {
            RequestBody::TextCompletion(_) => ModelFamily::TextCompletion,
            RequestBody::Chat(_) => ModelFamily::Chat,
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        match self {
            RequestBody::TextCompletion(body) => Some(body.prompt()),
            RequestBody::Chat(_) => None,
        }
    }

    pub fn messages(&self) -> Option<&[ChatTurn]> {
        match self {
            RequestBody::TextCompletion(_) => None,
            RequestBody::Chat(body) => Some(body.messages()),
        }
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, DomainError> {
        serde_json::to_vec(self)
            .map_err(|e| DomainError::serialization(format!("failed to encode request body: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextCompletionBody {
    prompt: String,
    max_gen_len: u32,
    temperature: f64,
    top_p: f64,
    stop: Vec<String>,
}

impl TextCompletionBody {
    pub(crate) fn new(
        prompt: String,
        max_gen_len: u32,
        temperature: f64,
        top_p: f64,
        stop: Vec<String>,
    ) -> Self {
        Self {
            prompt,
            max_gen_len,
            temperature,
            top_p,
            stop,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn max_gen_len(&self) -> u32 {
        self.max_gen_len
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn top_p(&self) -> f64 {
        self.top_p
    }

    pub fn stop(&self) -> &[String] {
        &self.stop
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatBody {
    messages: Vec<ChatTurn>,
    max_tokens: u32,
    temperature: f64,
}

impl ChatBody {
    pub(crate) fn new(messages: Vec<ChatTurn>, max_tokens: u32, temperature: f64) -> Self {
        Self {
            messages,
            max_tokens,
            temperature,
        }
    }

    pub fn messages(&self) -> &[ChatTurn] {
        &self.messages
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

/// A single message in a chat body; content is always a list of typed blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatTurn {
    role: Role,
    content: Vec<ContentBlock>,
}

impl ChatTurn {
    /// A turn holding exactly one text block.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![ContentBlock::text(text)],
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &[ContentBlock] {
        &self.content
    }

    /// Concatenated text of all blocks.
    pub fn joined_text(&self) -> String {
        self.content.iter().map(ContentBlock::text_value).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    kind: ContentKind,
    text: String,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            text: text.into(),
        }
    }

    pub fn text_value(&self) -> &str {
        &self.text
    }
}
