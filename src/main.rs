use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use vateller::config::Settings;
use vateller::gateway::{HttpExternalGateway, HttpInternalGateway};

#[derive(Parser)]
#[command(
    name = "vateller",
    author = "Dimas Prakoso",
    version,
    about = "Terminal-based virtual account payment teller",
    long_about = "vateller walks a teller through a virtual-account transaction \
                  from the terminal: inquiry, review, payment, and fee transfer, \
                  against the internal and external payment gateways."
)]
struct Cli {
    /// Path to a JSON settings file (environment variables override it)
    #[arg(short, long, env = "VATELLER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the transaction wizard (default)
    #[command(alias = "ui")]
    Run,

    /// Show resolved configuration (secrets redacted)
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;
    init_tracing(&settings)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            tracing::info!(
                internal = %settings.internal_base_url,
                external = %settings.external_base_url,
                "starting wizard"
            );
            let internal = Box::new(HttpInternalGateway::new(&settings));
            let external = Box::new(HttpExternalGateway::new(&settings));
            vateller::tui::run_tui(settings, internal, external)?;
        }
        Commands::Config => {
            println!("vateller configuration");
            println!("======================");
            println!("{}", serde_json::to_string_pretty(&settings.redacted())?);
        }
    }

    Ok(())
}

/// Log to the configured file; stdout belongs to the TUI, so without a
/// log file tracing stays uninitialized and events are dropped.
fn init_tracing(settings: &Settings) -> Result<()> {
    let Some(ref path) = settings.log_file else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
