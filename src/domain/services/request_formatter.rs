use tracing::debug;

use crate::domain::{
    ChatBody, ChatTurn, ContextBlock, ModelFamily, RequestBody, Role, TextCompletionBody,
};

/// Instruction used when context snippets are supplied: answer from the
/// snippets only, refuse otherwise.
pub const GROUNDED_INSTRUCTION: &str = "You are a concise assistant. \
Use ONLY the provided context snippets to answer. \
If the context is empty or insufficient, reply: 'I do not have enough information.' \
Respond with a short, direct answer only.";

/// Instruction used when no context survives filtering.
pub const OPEN_INSTRUCTION: &str =
    "You are a concise and helpful assistant. Respond with a short, direct answer.";

/// Nucleus-sampling value sent with every text-completion request.
pub const TEXT_COMPLETION_TOP_P: f64 = 0.9;

/// Stop sequences for text-completion requests: a blank line and a
/// triple-quote marker.
pub const TEXT_COMPLETION_STOP: [&str; 2] = ["\n\n", "\"\"\""];

/// Build the request body for `model_id`.
///
/// Never fails: empty questions and empty snippet lists still produce a
/// well-formed body.
pub fn format_request<S: AsRef<str>>(
    model_id: &str,
    question: &str,
    context_snippets: &[S],
    max_tokens: u32,
    temperature: f64,
) -> RequestBody {
    let context = ContextBlock::from_snippets(context_snippets);
    let family = ModelFamily::classify(model_id);

    debug!(
        "Formatting {} request for {} ({} context snippets)",
        family,
        model_id,
        context.len()
    );

    match family {
        ModelFamily::TextCompletion => RequestBody::TextCompletion(TextCompletionBody::new(
            text_completion_prompt(question, &context),
            max_tokens,
            temperature,
            TEXT_COMPLETION_TOP_P,
            TEXT_COMPLETION_STOP.iter().map(|s| s.to_string()).collect(),
        )),
        ModelFamily::Chat => {
            let (system, user) = chat_texts(question, &context);
            RequestBody::Chat(ChatBody::new(
                vec![
                    ChatTurn::text(Role::System, system),
                    ChatTurn::text(Role::User, user),
                ],
                max_tokens,
                temperature,
            ))
        }
    }
}

fn text_completion_prompt(question: &str, context: &ContextBlock) -> String {
    if context.has_context() {
        format!(
            "{GROUNDED_INSTRUCTION}\n\nContext:\n{}\n\nQuestion: {question}\n\nAnswer:",
            context.render()
        )
    } else {
        format!("{OPEN_INSTRUCTION}\n\nQuestion: {question}\n\nAnswer:")
    }
}

fn chat_texts(question: &str, context: &ContextBlock) -> (&'static str, String) {
    if context.has_context() {
        (
            GROUNDED_INSTRUCTION,
            format!("Context:\n{}\n\nQuestion: {question}", context.render()),
        )
    } else {
        (OPEN_INSTRUCTION, question.to_string())
    }
}
