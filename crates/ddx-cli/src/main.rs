use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ddx_cli::cli::Cli;
use ddx_cli::commands;
use ddx_cli::config::{self, LogFormat};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let loaded = config::load_config(&config_path)?;
    init_tracing(cli.verbose, loaded.config.log_format)?;
    debug!(
        path = %config_path.display(),
        source = ?loaded.source,
        "config loaded"
    );

    let output = commands::execute(cli.command, &loaded.config, &config_path)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing(verbose: bool, format: LogFormat) -> eyre::Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("DDX_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|e| eyre::eyre!("failed to initialize tracing subscriber: {e}"))
}
