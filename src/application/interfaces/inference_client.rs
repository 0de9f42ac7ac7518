use async_trait::async_trait;

use crate::domain::DomainError;

/// The single-shot "invoke model" call of a remote inference service.
///
/// Implementors own transport, authentication and timeouts. The body is an
/// already-serialized JSON request; the returned bytes are the raw response
/// body, decoded by the caller.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError>;

    /// Short provider label for logging.
    fn name(&self) -> &str;
}
