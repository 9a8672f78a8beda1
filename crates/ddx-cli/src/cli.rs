use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `ddx` binary.
#[derive(Debug, Parser)]
#[command(name = "ddx", version, about = "Deterministic differential-diagnosis scoring")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare a ranked differential against an answer key
    Compare {
        /// Answer key, a JSON array of entries
        #[arg(long)]
        answer_key: PathBuf,
        /// Student differential, a JSON array of entries
        #[arg(long)]
        submission: PathBuf,
        /// Disable the substring fallback for this run
        #[arg(long)]
        exact_only: bool,
    },
    /// Score an OSCE encounter (door prep + SOAP note)
    Osce {
        #[arg(long)]
        answer_key: PathBuf,
        #[arg(long)]
        door_prep: PathBuf,
        #[arg(long)]
        soap: PathBuf,
        /// Correct diagnosis for cases without a structured answer key
        #[arg(long)]
        reference: Option<String>,
    },
    /// Render case JSON as Subjective/Objective bullets
    Bulletize {
        #[arg(long)]
        case: PathBuf,
    },
    /// List the selectable findings of a case
    Findings {
        #[arg(long)]
        case: PathBuf,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective config
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
