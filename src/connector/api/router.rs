use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, InfoController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    info_controller: InfoController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            info_controller: InfoController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask {
                question,
                contexts,
                context_file,
                max_tokens,
                temperature,
            } => {
                self.ask_controller
                    .ask(question, contexts, context_file, max_tokens, temperature)
                    .await
            }
            Commands::Info => Ok(self.info_controller.info()),
            Commands::Chat { .. } => unreachable!("Chat command is handled separately in main"),
        }
    }
}
