//! Chat session and interactive loop tests.

use std::sync::Arc;

use bedrock_chat::{
    ChatController, ChatSessionUseCase, Container, GenerationParams, MockInferenceClient, Role,
    Settings,
};
use serde_json::json;

const CLAUDE: &str = "anthropic.claude-3-haiku-20240307-v1:0";

fn settings_for(model_id: &str) -> Settings {
    Settings::from_lookup(|_| None)
        .expect("defaults resolve")
        .with_model_id(model_id)
}

#[tokio::test]
async fn session_records_messages_in_order() {
    let client = Arc::new(
        MockInferenceClient::new()
            .with_json_response(json!({"choices": [{"text": "first"}]}))
            .with_json_response(json!({"outputText": "second"})),
    );
    let mut session = ChatSessionUseCase::new(client.clone(), CLAUDE);

    let reply = session.submit("one").await.expect("reply");
    assert_eq!(reply.role(), Role::Assistant);
    assert_eq!(reply.content(), "first");
    session.submit("two").await.expect("reply");

    let history: Vec<(Role, &str)> = session
        .history()
        .iter()
        .map(|m| (m.role(), m.content()))
        .collect();
    assert_eq!(
        history,
        vec![
            (Role::User, "one"),
            (Role::Assistant, "first"),
            (Role::User, "two"),
            (Role::Assistant, "second"),
        ]
    );

    let calls = client.invocations().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].body()["max_tokens"], json!(512));
    assert_eq!(calls[0].body()["temperature"], json!(0.7));
    assert_eq!(calls[1].body()["messages"][1]["content"][0]["text"], "two");
}

#[tokio::test]
async fn padded_input_is_sent_unchanged() {
    let client = Arc::new(MockInferenceClient::new());
    let mut session = ChatSessionUseCase::new(client.clone(), CLAUDE);

    session.submit("  padded question \n").await.expect("reply");

    assert_eq!(session.history()[0].content(), "  padded question \n");
    let calls = client.invocations().await;
    assert_eq!(
        calls[0].body()["messages"][1]["content"][0]["text"],
        "  padded question \n"
    );
}

#[tokio::test]
async fn blank_input_is_rejected_without_calling_model() {
    let client = Arc::new(MockInferenceClient::new());
    let mut session = ChatSessionUseCase::new(client.clone(), CLAUDE);

    let err = session.submit("   ").await.unwrap_err();
    assert!(err.is_invalid_input());
    assert!(session.history().is_empty());
    assert!(client.invocations().await.is_empty());
}

#[tokio::test]
async fn failed_submission_keeps_user_message_only() {
    let client = Arc::new(MockInferenceClient::new().with_failure("throttled"));
    let mut session = ChatSessionUseCase::new(client, CLAUDE)
        .with_params(GenerationParams::new(32, 0.1));

    assert!(session.submit("hello").await.is_err());
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].role(), Role::User);

    session.clear();
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn chat_loop_handles_commands_and_errors() {
    let client = Arc::new(
        MockInferenceClient::new()
            .with_json_response(json!({"output": {"message": {"content": [{"type": "text", "text": "Hi there"}]}}}))
            .with_failure("service unavailable"),
    );
    let container = Container::with_client(settings_for(CLAUDE), client.clone());

    let input: &[u8] = b"hello\n\n/history\nagain\n/clear\n/history\n/exit\nnever sent\n";
    let mut output = Vec::new();

    ChatController::new(&container)
        .with_spinner(false)
        .run(input, &mut output, 100, 0.5)
        .await
        .expect("chat loop");

    let output = String::from_utf8(output).expect("utf8 output");
    assert!(output.starts_with(&format!("Chat with {CLAUDE} powered by AWS Bedrock")));
    assert!(output.contains("Hi there\n"));
    assert!(output.contains("user: hello\nassistant: Hi there\n"));
    assert!(output.contains("Error: Transport error: service unavailable"));
    assert!(output.contains("History cleared."));
    assert!(output.contains("(no messages yet)"));
    assert!(!output.contains("never sent"));

    let calls = client.invocations().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].body()["max_tokens"], json!(100));
}

#[tokio::test]
async fn chat_loop_ends_at_end_of_input() {
    let container = Container::with_client(
        settings_for("meta.llama3-8b-instruct-v1:0"),
        Arc::new(MockInferenceClient::new()),
    );

    let input: &[u8] = b"ping";
    let mut output = Vec::new();
    ChatController::new(&container)
        .with_spinner(false)
        .run(input, &mut output, 16, 0.0)
        .await
        .expect("chat loop");

    let output = String::from_utf8(output).expect("utf8 output");
    assert!(output.contains("Mock reply to: ping"));
}
