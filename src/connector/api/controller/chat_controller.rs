use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::application::ChatSessionUseCase;
use crate::domain::{ChatMessage, GenerationParams};

use super::super::Container;

const PROMPT: &str = "> ";

/// Line-oriented chat loop: every input line is one submission.
///
/// `/history` replays the transcript, `/clear` empties it, `/exit` or
/// `/quit` (or end of input) ends the session.
pub struct ChatController<'a> {
    container: &'a Container,
    show_spinner: bool,
}

enum Input<'l> {
    Message(&'l str),
    History,
    Clear,
    Exit,
    Empty,
}

impl<'l> Input<'l> {
    fn parse(line: &'l str) -> Self {
        match line.trim() {
            "" => Input::Empty,
            "/history" => Input::History,
            "/clear" => Input::Clear,
            "/exit" | "/quit" => Input::Exit,
            _ => Input::Message(line),
        }
    }
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            container,
            show_spinner: true,
        }
    }

    pub fn with_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    pub async fn run<R, W>(
        &self,
        reader: R,
        writer: &mut W,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut session = self
            .container
            .chat_session_use_case(GenerationParams::new(max_tokens, temperature))?;

        writeln!(
            writer,
            "Chat with {} powered by AWS Bedrock\nType /history, /clear or /exit.\n",
            session.model_id()
        )?;

        let mut lines = reader.lines();
        loop {
            write!(writer, "{PROMPT}")?;
            writer.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(writer)?;
                break;
            };

            match Input::parse(&line) {
                Input::Empty => continue,
                Input::Exit => break,
                Input::Clear => {
                    session.clear();
                    writeln!(writer, "History cleared.\n")?;
                }
                Input::History => {
                    writeln!(writer, "{}", format_history(session.history()))?;
                }
                Input::Message(message) => {
                    let reply = self.submit(&mut session, message).await;
                    writeln!(writer, "{reply}\n")?;
                }
            }
        }

        Ok(())
    }

    async fn submit(&self, session: &mut ChatSessionUseCase, message: &str) -> String {
        let spinner = if self.show_spinner {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        } else {
            ProgressBar::hidden()
        };
        spinner.set_message("Thinking...");

        let reply = match session.submit(message).await {
            Ok(reply) => reply.content().to_string(),
            Err(e) => {
                warn!("Chat submission failed: {e}");
                format!("Error: {e}")
            }
        };

        spinner.finish_and_clear();
        reply
    }
}

fn format_history(history: &[ChatMessage]) -> String {
    if history.is_empty() {
        return "(no messages yet)\n".to_string();
    }

    let mut output = String::new();
    for message in history {
        output.push_str(&format!("{}: {}\n", message.role().as_str(), message.content()));
    }
    output
}
