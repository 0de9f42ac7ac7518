use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use tracing::{debug, warn};

use crate::application::InferenceClient;
use crate::domain::DomainError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const JSON_MIME: &str = "application/json";

/// Runtime endpoint for a region, e.g. `https://bedrock-runtime.us-east-1.amazonaws.com`.
pub fn default_endpoint(region: &str) -> String {
    format!("https://bedrock-runtime.{region}.amazonaws.com")
}

/// HTTP client for the Bedrock runtime `InvokeModel` operation.
///
/// Sends `POST {endpoint}/model/{model_id}/invoke` with the serialized body
/// and authenticates with a Bedrock API key as a bearer token. Any non-2xx
/// status is reported as [`DomainError::Transport`]; the body is returned
/// untouched otherwise.
///
/// The endpoint can point at any compatible server (a proxy, a local
/// emulator), which is how the tests drive it.
pub struct BedrockClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: Url,
}

impl BedrockClient {
    pub fn new(api_key: impl Into<String>, endpoint: &str) -> Result<Self, DomainError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| DomainError::config(format!("invalid endpoint URL '{endpoint}': {e}")))?;
        if endpoint.cannot_be_a_base() {
            return Err(DomainError::config(format!(
                "endpoint URL '{endpoint}' cannot carry a path"
            )));
        }

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// `{endpoint}/model/{model_id}/invoke`, with the id percent-encoded as a
    /// single path segment.
    fn invoke_url(&self, model_id: &str) -> Result<Url, DomainError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::config("endpoint URL cannot carry a path"))?
            .pop_if_empty()
            .push("model")
            .push(model_id)
            .push("invoke");
        Ok(url)
    }
}

#[async_trait]
impl InferenceClient for BedrockClient {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError> {
        let url = self.invoke_url(model_id)?;
        debug!("BedrockClient: POST {url} ({} bytes)", body.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_MIME)
            .header(ACCEPT, JSON_MIME)
            .bearer_auth(&self.api_key)
            .body(body)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("BedrockClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("BedrockClient: {model_id} returned {status}: {body}");
            return Err(DomainError::transport(format!(
                "BedrockClient: {model_id} returned {status}: {body}"
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            DomainError::transport(format!("BedrockClient: failed to read response body: {e}"))
        })?;

        Ok(bytes.to_vec())
    }

    fn name(&self) -> &str {
        "bedrock"
    }
}
