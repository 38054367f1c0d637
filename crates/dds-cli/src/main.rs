use anyhow::Result;
use clap::Parser;
use dds_config::Mode;
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "datadog-sync")]
#[command(about = "Pull Datadog monitors into a document, or push a document back", long_about = None)]
struct Cli {
    /// Direction (pull | push)
    #[arg(long, default_value = "pull")]
    mode: String,

    /// Document encoding (yaml | json)
    #[arg(long, default_value = "yaml")]
    format: String,

    /// Only consider monitors whose name matches this regex (unanchored)
    #[arg(long, default_value = "")]
    only: String,

    /// push: print the plan without changing anything remotely
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// push: include full monitor content in the report
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// pull: keep monitor ids in the document
    #[arg(long, default_value_t = false)]
    ids: bool,

    /// Datadog API key (falls back to DATADOG_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Datadog application key (falls back to DATADOG_APP_KEY)
    #[arg(long)]
    app_key: Option<String>,

    /// push: read the document from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// pull: write the document to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn init_tracing() {
    // stdout carries the document and the plan report; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn main() -> Result<()> {
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    let config = commands::RunConfig::resolve(cli, dds_config::process_env)?;

    match config.mode {
        Mode::Pull => commands::pull::run(&config),
        Mode::Push => commands::push::run(&config),
    }
}
