//! Command-line interface for strictly_hanoi.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Hanoi - Tower of Hanoi in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_hanoi")]
#[command(about = "Tower of Hanoi rule engine with scoring", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Scoring config (TOML). Built-in constants are used when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// File holding the best score
    #[arg(long, global = true, default_value = "hanoi_best.json")]
    pub best_file: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on stdin
    Play {
        /// Number of disks (3-8)
        #[arg(short, long, default_value = "3")]
        disks: u8,
    },

    /// Play the optimal solution and print the final score
    Solve {
        /// Number of disks (3-8)
        #[arg(short, long, default_value = "3")]
        disks: u8,
    },

    /// Print the stored best score
    Best,
}
