use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::application::{ChatSessionUseCase, GenerateAnswerUseCase, InferenceClient};
use crate::connector::adapter::{BedrockClient, MockInferenceClient};
use crate::domain::{DomainError, GenerationParams};

use super::Settings;

pub struct ContainerConfig {
    pub settings: Settings,
    /// Answer from the in-process mock instead of calling the endpoint.
    /// No API key is needed in this mode.
    pub mock: bool,
}

pub struct Container {
    /// Built on first use, so commands that never call the model
    /// (e.g. `info`) need no credentials.
    inference_client: OnceLock<Arc<dyn InferenceClient>>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        Self {
            inference_client: OnceLock::new(),
            config,
        }
    }

    /// Build a container around an existing client.
    pub fn with_client(settings: Settings, inference_client: Arc<dyn InferenceClient>) -> Self {
        let container = Self::new(ContainerConfig {
            settings,
            mock: false,
        });
        let _ = container.inference_client.set(inference_client);
        container
    }

    /// The configured client. Fails when a real client is requested
    /// without an API key or with an unusable endpoint.
    pub fn inference_client(&self) -> Result<Arc<dyn InferenceClient>, DomainError> {
        if let Some(client) = self.inference_client.get() {
            return Ok(client.clone());
        }

        let client: Arc<dyn InferenceClient> = if self.config.mock {
            debug!("Using mock inference client");
            Arc::new(MockInferenceClient::new())
        } else {
            let endpoint = self.config.settings.endpoint();
            debug!("Using Bedrock runtime at {}", endpoint);
            let api_key = self.config.settings.require_api_key()?;
            Arc::new(BedrockClient::new(api_key, &endpoint)?)
        };

        Ok(self.inference_client.get_or_init(|| client).clone())
    }

    pub fn generate_answer_use_case(&self) -> Result<GenerateAnswerUseCase, DomainError> {
        Ok(GenerateAnswerUseCase::new(self.inference_client()?))
    }

    pub fn chat_session_use_case(
        &self,
        params: GenerationParams,
    ) -> Result<ChatSessionUseCase, DomainError> {
        Ok(ChatSessionUseCase::new(self.inference_client()?, self.model_id()).with_params(params))
    }

    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }

    pub fn model_id(&self) -> &str {
        self.config.settings.model_id()
    }

    /// Label of the client in use, or of the one that would be built.
    pub fn client_name(&self) -> &str {
        match self.inference_client.get() {
            Some(client) => client.name(),
            None if self.config.mock => "mock",
            None => "bedrock",
        }
    }
}
