use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::connector::adapter::default_endpoint;
use crate::domain::{DomainError, ModelFamily};

pub const REGION_VAR: &str = "AWS_REGION";
pub const MODEL_ID_VAR: &str = "BEDROCK_MODEL_ID";
pub const ENDPOINT_VAR: &str = "BEDROCK_ENDPOINT_URL";
pub const API_KEY_VAR: &str = "AWS_BEARER_TOKEN_BEDROCK";

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "meta.llama3-8b-instruct-v1:0";

/// Process configuration, resolved once at startup.
///
/// | Variable                   | Default                        |
/// |----------------------------|--------------------------------|
/// | `AWS_REGION`               | `us-east-1`                    |
/// | `BEDROCK_MODEL_ID`         | `meta.llama3-8b-instruct-v1:0` |
/// | `BEDROCK_ENDPOINT_URL`     | derived from the region        |
/// | `AWS_BEARER_TOKEN_BEDROCK` | none; required for real calls  |
///
/// Blank values count as unset.
#[derive(Debug, Clone)]
pub struct Settings {
    region: String,
    model_id: String,
    endpoint_url: Option<String>,
    api_key: Option<String>,
}

impl Settings {
    /// Resolve from the process environment, falling back to a `.env` file:
    /// `env_file` when given (it must exist), otherwise `./.env` if present.
    /// Process variables win over file entries.
    pub fn load(env_file: Option<&Path>) -> Result<Self, DomainError> {
        let file_vars = match env_file {
            Some(path) => read_env_file(path)?,
            None => match dotenvy::dotenv_iter() {
                Ok(iter) => iter.filter_map(Result::ok).collect(),
                Err(_) => HashMap::new(),
            },
        };
        debug!("Loaded {} entries from .env", file_vars.len());

        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            region: required(&lookup, REGION_VAR, Some(DEFAULT_REGION))?,
            model_id: required(&lookup, MODEL_ID_VAR, Some(DEFAULT_MODEL_ID))?,
            endpoint_url: optional(&lookup, ENDPOINT_VAR),
            api_key: optional(&lookup, API_KEY_VAR),
        })
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn model_family(&self) -> ModelFamily {
        ModelFamily::classify(&self.model_id)
    }

    /// The explicit endpoint override, or the regional default.
    pub fn endpoint(&self) -> String {
        self.endpoint_url
            .clone()
            .unwrap_or_else(|| default_endpoint(&self.region))
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn require_api_key(&self) -> Result<&str, DomainError> {
        self.api_key()
            .ok_or_else(|| DomainError::config(format!("Environment variable {API_KEY_VAR} is required")))
    }
}

fn required<F>(lookup: &F, key: &str, default: Option<&str>) -> Result<String, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key)
        .or_else(|| default.map(str::to_string))
        .ok_or_else(|| DomainError::config(format!("Environment variable {key} is required")))
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, DomainError> {
    dotenvy::from_path_iter(path)
        .map_err(|e| DomainError::config(format!("cannot read {}: {e}", path.display())))?
        .map(|item| {
            item.map_err(|e| DomainError::config(format!("invalid entry in {}: {e}", path.display())))
        })
        .collect()
}
