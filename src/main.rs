use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use bedrock_chat::{ChatController, Commands, Container, ContainerConfig, Router, Settings};

#[derive(Parser)]
#[command(name = "bedrock-chat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model identifier (overrides BEDROCK_MODEL_ID)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Region (overrides AWS_REGION)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Read settings from this file instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Answer from an in-process mock instead of calling Bedrock
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut settings = Settings::load(cli.env_file.as_deref())?;
    if let Some(model) = cli.model {
        settings = settings.with_model_id(model);
    }
    if let Some(region) = cli.region {
        settings = settings.with_region(region);
    }
    debug!(
        "Resolved model {} in region {}",
        settings.model_id(),
        settings.region()
    );

    let container = Container::new(ContainerConfig {
        settings,
        mock: cli.mock,
    });

    if let Commands::Chat {
        max_tokens,
        temperature,
    } = cli.command
    {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        return ChatController::new(&container)
            .run(stdin, &mut stdout, max_tokens, temperature)
            .await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
