//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output locations, configuration
//! file selection, path highlighting and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Trellis diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path or http(s) URL of the input JSON document
    #[arg(help = "Path or URL of the input document")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Node ids to highlight as a path, comma separated
    #[arg(long, value_delimiter = ',')]
    pub highlight: Vec<String>,

    /// Print the document summary as JSON to stdout
    #[arg(long)]
    pub info: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
