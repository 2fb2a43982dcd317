use std::sync::Arc;

use clap::Parser;
use cli::Args;
use logging::setup_logging;
use provmir_config::{generate_default_config, Config};
use provmir_mirror::MirrorError;
use provmir_registry::RegistryClient;
use tracing::debug;

mod cli;
mod logging;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

async fn handle_cli() -> Result<(), MirrorError> {
    let args = Args::parse();

    setup_logging(&args);

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

    match args.command {
        cli::Commands::DefConfig => generate_default_config(config_path)?,
        cli::Commands::Sync => {
            let config = Config::load(config_path)?;
            debug!(providers = config.providers.len(), "configuration loaded");

            let registry = Arc::new(RegistryClient::new(&config.client));
            provmir_mirror::run(registry, &config).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli().await {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
