//! Command-line argument definitions for the Swimlane CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, model edits, and logging verbosity.

use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

/// Command-line arguments for the Swimlane BPMN compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input structural model (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output BPMN file
    #[arg(short, long, default_value = "out.bpmn")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to an edit script (JSON) applied to the model before compiling
    #[arg(long)]
    pub edits: Option<String>,

    /// Treat the input as a free-text assistant reply wrapping the model
    #[arg(long)]
    pub reply: bool,

    /// Write the model, after edits, back out as JSON
    #[arg(long)]
    pub save_model: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The filter named by `--log-level`, or `None` for an unknown name.
    pub fn level_filter(&self) -> Option<LevelFilter> {
        LevelFilter::from_str(&self.log_level).ok()
    }
}
