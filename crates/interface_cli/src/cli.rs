//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

/// Simulated multi-step claims processing
#[derive(Debug, Clone, Parser)]
#[command(name = "claims-workbench", version, about)]
pub struct Cli {
    /// Claim documents to queue for processing
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Free-form request text attached to the run
    #[arg(long)]
    pub prompt: Option<String>,

    /// Print each run event as a JSON line instead of rendered text
    #[arg(long)]
    pub json: bool,

    /// Skip all simulated delays
    #[arg(long)]
    pub fast: bool,

    /// Reset the window as soon as this 1-based step starts processing
    #[arg(long, value_name = "STEP", value_parser = clap::value_parser!(u32).range(1..))]
    pub abandon_after: Option<u32>,
}
