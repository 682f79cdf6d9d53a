//! Command-line interface for strictly_voxels.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Voxels - carve 3D nonograms one voxel at a time
#[derive(Parser, Debug)]
#[command(name = "strictly_voxels")]
#[command(about = "3D nonogram carving game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory of puzzle TOML files (defaults to the bundled puzzle)
    #[arg(long, global = true)]
    pub puzzles: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to server config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// List available puzzles
    List,

    /// Print the clue table for a puzzle
    Clues {
        /// Puzzle id
        id: String,
    },
}
