use std::path::PathBuf;

use clap::Subcommand;

use crate::application::{CHAT_MAX_TOKENS, CHAT_TEMPERATURE};
use crate::domain::{check_temperature, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a single question and print the answer
    Ask {
        question: String,

        /// Context snippet to ground the answer (repeatable)
        #[arg(short, long = "context")]
        contexts: Vec<String>,

        /// File with context snippets: a JSON array of strings, or plain text used as one snippet
        #[arg(long)]
        context_file: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_MAX_TOKENS, value_parser = clap::value_parser!(u32).range(1..))]
        max_tokens: u32,

        #[arg(short, long, default_value_t = DEFAULT_TEMPERATURE, value_parser = parse_temperature)]
        temperature: f64,
    },

    /// Start an interactive chat session on stdin/stdout
    Chat {
        #[arg(long, default_value_t = CHAT_MAX_TOKENS, value_parser = clap::value_parser!(u32).range(1..))]
        max_tokens: u32,

        #[arg(short, long, default_value_t = CHAT_TEMPERATURE, value_parser = parse_temperature)]
        temperature: f64,
    },

    /// Show the resolved model, region and endpoint
    Info,
}

fn parse_temperature(value: &str) -> Result<f64, String> {
    let temperature: f64 = value
        .parse()
        .map_err(|e| format!("invalid temperature '{value}': {e}"))?;
    check_temperature(temperature).map_err(|e| e.to_string())?;
    Ok(temperature)
}
