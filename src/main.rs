//! Strictly Voxels - Unified CLI
//!
//! Serves the carving game over HTTP and inspects puzzle catalogs.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use std::sync::Arc;
use strictly_voxels::{MemorySessionStore, PuzzleCatalog, PuzzleService, ServerConfig, router};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Serve { config, port, host } => {
            run_http_server(config, host, port, cli.puzzles).await
        }
        Command::List => list_puzzles(cli.puzzles),
        Command::Clues { id } => print_clues(cli.puzzles, &id),
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_voxels=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[instrument]
fn load_catalog(puzzles_dir: Option<&PathBuf>) -> Result<PuzzleCatalog> {
    match puzzles_dir {
        Some(dir) => Ok(PuzzleCatalog::from_dir(dir)?),
        None => {
            info!("No puzzle directory given, using bundled puzzle");
            Ok(PuzzleCatalog::builtin())
        }
    }
}

/// Run the HTTP game server
#[instrument]
async fn run_http_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    puzzles_dir: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    }
    .with_overrides(host, port, puzzles_dir);

    let catalog = Arc::new(load_catalog(config.puzzles_dir().as_ref())?);
    let store = match config.max_sessions() {
        Some(max) => MemorySessionStore::with_capacity_limit(*max),
        None => MemorySessionStore::new(),
    };
    let service = Arc::new(PuzzleService::new(catalog, store));
    let app = router(service);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        host = %config.host(),
        port = config.port(),
        "Server ready at http://{}:{}/",
        config.host(),
        config.port()
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn list_puzzles(puzzles_dir: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(puzzles_dir.as_ref())?;
    for puzzle in catalog.list() {
        let (x, y, z) = puzzle.grid().dimensions();
        println!(
            "{:<12} {:<24} {:<16} {}x{}x{}  lives={}",
            puzzle.id(),
            puzzle.name(),
            puzzle.author(),
            x,
            y,
            z,
            puzzle.starting_lives()
        );
    }
    Ok(())
}

fn print_clues(puzzles_dir: Option<PathBuf>, id: &str) -> Result<()> {
    let catalog = load_catalog(puzzles_dir.as_ref())?;
    let puzzle = catalog
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Puzzle '{}' not found", id))?;

    println!("{} by {}", puzzle.name(), puzzle.author());
    for clue in puzzle.clues() {
        println!(
            "{} ({}, {})  count={}  {}",
            clue.axis(),
            clue.coord1(),
            clue.coord2(),
            clue.count(),
            clue.split()
        );
    }
    Ok(())
}
