//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::gaps::GapsArgs;
use crate::commands::parse::ParseArgs;
use crate::commands::place::PlaceArgs;

/// Time journal timeline tool.
///
/// Reads free-text activity notes for times and durations, and lays out
/// logged days next to imported calendar events.
#[derive(Debug, Parser)]
#[command(name = "jt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract times and durations from an activity description.
    Parse(ParseArgs),

    /// Lay out each day of a day file on the timeline.
    Place(PlaceArgs),

    /// Report unlogged stretches for each day of a day file.
    Gaps(GapsArgs),

    /// Write a default config file.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
}
