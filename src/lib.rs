pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatSessionUseCase, GenerateAnswerUseCase, InferenceClient, UNPARSEABLE_RESPONSE,
};

pub use cli::Commands;

pub use connector::{
    BedrockClient, ChatController, Container, ContainerConfig, Invocation, MockInferenceClient,
    Router, Settings,
};

pub use domain::{
    extract_text, format_request, ChatMessage, ContextBlock, DomainError, GenerationParams,
    ModelFamily, RequestBody, Role,
};
