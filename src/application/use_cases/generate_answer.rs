use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::application::InferenceClient;
use crate::domain::{extract_text, format_request, DomainError, GenerationParams, ModelFamily};

/// Returned when the model answered but no text could be extracted.
pub const UNPARSEABLE_RESPONSE: &str = "I could not parse a text response from the model output.";

/// Format a request, invoke the model once, and normalize the reply to text.
///
/// Out-of-range parameters are rejected before anything is sent. Transport
/// errors from the client propagate unchanged. A reply that cannot
/// be decoded or holds no recognizable text is not an error: it yields
/// [`UNPARSEABLE_RESPONSE`] for every model family.
pub struct GenerateAnswerUseCase {
    client: Arc<dyn InferenceClient>,
}

impl GenerateAnswerUseCase {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }

    pub async fn execute<S: AsRef<str>>(
        &self,
        model_id: &str,
        question: &str,
        contexts: &[S],
        params: GenerationParams,
    ) -> Result<String, DomainError> {
        params.validate()?;

        let body = format_request(
            model_id,
            question,
            contexts,
            params.max_tokens(),
            params.temperature(),
        );
        let bytes = body.to_json_bytes()?;

        info!("Invoking {} via {}", model_id, self.client.name());
        let start_time = Instant::now();

        let raw = self.client.invoke_model(model_id, bytes).await?;

        debug!(
            "Received {} bytes in {:.2}s",
            raw.len(),
            start_time.elapsed().as_secs_f64()
        );

        let payload = decode_payload(&raw);
        let family = ModelFamily::classify(model_id);
        let text = extract_text(&payload, family);

        if text.is_empty() {
            warn!("No {} text found in response from {}", family, model_id);
            return Ok(UNPARSEABLE_RESPONSE.to_string());
        }

        Ok(text)
    }
}

/// Decode a response body; anything that is not JSON becomes `Null` so the
/// normalizer treats it as an unrecognized shape.
fn decode_payload(raw: &[u8]) -> Value {
    match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Response body is not valid JSON: {e}");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_payload_tolerates_garbage() {
        assert_eq!(decode_payload(b"not json"), Value::Null);
        assert_eq!(decode_payload(b""), Value::Null);
        assert_eq!(
            decode_payload(br#"{"generation":"ok"}"#),
            serde_json::json!({"generation": "ok"})
        );
    }
}
