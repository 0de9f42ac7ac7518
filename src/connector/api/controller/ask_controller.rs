use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::domain::{ContextBlock, GenerationParams};

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(
        &self,
        question: String,
        contexts: Vec<String>,
        context_file: Option<PathBuf>,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<String> {
        let mut snippets = contexts;
        if let Some(path) = context_file {
            snippets.extend(load_context_file(&path).await?);
        }

        let params = GenerationParams::new(max_tokens, temperature);
        let use_case = self.container.generate_answer_use_case()?;
        let answer = use_case
            .execute(self.container.model_id(), &question, &snippets, params)
            .await?;

        Ok(answer)
    }
}

/// A JSON array of snippets (non-string entries dropped), or any other
/// content taken as a single snippet.
async fn load_context_file(path: &Path) -> Result<Vec<String>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read context file {}", path.display()))?;

    let snippets = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(values)) => ContextBlock::from_json_values(&values)
            .snippets()
            .to_vec(),
        _ => vec![raw],
    };
    debug!("Loaded {} context snippets from {}", snippets.len(), path.display());

    Ok(snippets)
}
