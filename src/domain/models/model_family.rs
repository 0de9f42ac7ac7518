use std::fmt;

/// Identifier fragment (matched case-insensitively) that marks a model as a
/// raw text-completion model rather than a structured chat model.
pub const TEXT_COMPLETION_MARKER: &str = "llama";

/// Request/response shape a model identifier maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// Single `prompt` string in, `generation` string out.
    TextCompletion,
    /// System/user message list in, one of several message shapes out.
    Chat,
}

impl ModelFamily {
    /// Classify a model identifier. This is the only place the marker rule
    /// lives; formatter, normalizer and orchestration all call it.
    pub fn classify(model_id: &str) -> Self {
        if model_id
            .to_lowercase()
            .contains(TEXT_COMPLETION_MARKER)
        {
            ModelFamily::TextCompletion
        } else {
            ModelFamily::Chat
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::TextCompletion => "text_completion",
            ModelFamily::Chat => "chat",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llama_identifiers_are_text_completion_in_any_case() {
        for id in [
            "meta.llama3-8b-instruct-v1:0",
            "META.LLAMA3-70B-INSTRUCT-V1:0",
            "us.meta.Llama3-2-1b-instruct-v1:0",
            "llama",
        ] {
            assert_eq!(ModelFamily::classify(id), ModelFamily::TextCompletion, "{id}");
        }
    }

    #[test]
    fn other_identifiers_are_chat() {
        for id in [
            "anthropic.claude-3-haiku-20240307-v1:0",
            "amazon.nova-lite-v1:0",
            "mistral.mistral-large-2402-v1:0",
            "",
            "lla-ma",
        ] {
            assert_eq!(ModelFamily::classify(id), ModelFamily::Chat, "{id}");
        }
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(ModelFamily::Chat.to_string(), "chat");
        assert_eq!(ModelFamily::TextCompletion.to_string(), "text_completion");
    }
}
