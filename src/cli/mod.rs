//! CLI Module
//!
//! Command-line interface for the Wavrot degradation tool.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wavrot - simulate bit rot and playback damage in audio files
#[derive(Parser, Debug)]
#[command(name = "wavrot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Degrade an audio file (DSP pipeline + byte corruption)
    #[command(name = "degrade")]
    Degrade {
        /// Source audio file (WAV)
        input: PathBuf,

        /// JSON configuration file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for the random generator; a seeded run is reproducible
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write (or print) the default configuration as JSON
    #[command(name = "example-config")]
    ExampleConfig {
        /// Destination file; prints to stdout when omitted
        path: Option<PathBuf>,
    },
}
