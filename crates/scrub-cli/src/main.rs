mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use scrub_config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::config_path);

    match cli.command {
        cli::Commands::Scan(args) => {
            let config = Config::load_from(&config_path)?;
            commands::scan::handle(args, &config).await
        }
        cli::Commands::Init => commands::init::handle(&config_path),
        cli::Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
