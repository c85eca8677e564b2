//! Podium command line.
//!
//! `podium run` builds the palmarès files (text, PDF, JSON) for a
//! configuration;
//! `podium serve` exposes the engine over HTTP.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

use podium_engine::api::{AppState, create_router};
use podium_engine::config::{ConfigLoader, ConfigParser, DEFAULT_TRUSTED_PREFIX};
use podium_engine::engine::run_palmares;
use podium_engine::extraction::FfeSource;
use podium_engine::render::{PalmaresDocument, write_json, write_pdf, write_text};

/// Chess tournament palmarès generator.
#[derive(Parser, Debug)]
#[command(name = "podium")]
#[command(version, about = "Assigns tournament prizes from final standings")]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only results pages starting with this prefix are fetched
    #[arg(long, global = true, env = "PODIUM_TRUSTED_PREFIX", default_value = DEFAULT_TRUSTED_PREFIX)]
    trusted_prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build palmares.txt, palmares.pdf and palmares.json for a configuration file
    Run {
        /// Configuration file (line DSL, or YAML rule book for .yaml/.yml)
        #[arg(short, long, env = "PODIUM_CONFIG")]
        config: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Serve the HTTP API
    Serve {
        /// Listening port
        #[arg(short, long, env = "PODIUM_PORT", default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .init();

    let parser = ConfigParser::with_trusted_prefix(cli.trusted_prefix);

    match cli.command {
        Commands::Run { config, out_dir } => run(&config, &out_dir, &parser).await,
        Commands::Serve { port } => serve(port, parser).await,
    }
}

async fn run(config: &Path, out_dir: &Path, parser: &ConfigParser) -> anyhow::Result<()> {
    let loader = ConfigLoader::load_with_parser(config, parser)?;
    info!(
        rules = loader.rules().len(),
        sources = loader.sources().len(),
        diagnostics = loader.diagnostics().len(),
        "Configuration loaded"
    );

    let source = FfeSource::new()?;
    let outcome = run_palmares(loader.rules(), loader.sources(), &source).await?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create output directory {}", out_dir.display()))?;

    write_text(out_dir.join("palmares.txt"), &outcome.tournaments)?;
    write_pdf(out_dir.join("palmares.pdf"), &outcome.tournaments)?;
    let document = PalmaresDocument::build(&outcome.tournaments, Utc::now());
    write_json(out_dir.join("palmares.json"), &document)?;

    info!(
        tournaments = outcome.tournaments.len(),
        skipped = outcome.failures.len(),
        out_dir = %out_dir.display(),
        "Palmarès generated"
    );
    Ok(())
}

async fn serve(port: u16, parser: ConfigParser) -> anyhow::Result<()> {
    let state = AppState::new(FfeSource::new()?, parser);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("cannot bind port {}", port))?;

    info!(port, "Podium API listening");
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
