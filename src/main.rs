use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use episodic::app::AppContext;
use episodic::cli::{commands, Cli, Commands};
use episodic::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    if let Commands::Episodes { no_shuffle: true, .. } = cli.command {
        config.episodes.shuffle_characters = false;
    }
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Episodes { pages, .. } => {
            commands::list_episodes(&ctx, pages).await?;
        }
        Commands::Character { url, image } => {
            commands::show_character(&ctx, &url, image).await?;
        }
    }

    Ok(())
}
