//! Command-line interface for moorage.
//!
//! This module defines the argument structure for the `moorctl` binary.
//! The interactive menu itself lives in the binary; the contract here is
//! that the program takes exactly one positional argument, the path to the
//! boat data file, and refuses to start otherwise.

use std::path::PathBuf;

use clap::Parser;

/// moorctl - Manage a marina's boat inventory
///
/// Loads the boat data file given on the command line, runs the interactive
/// menu, and writes the data back to the same file on exit.
#[derive(Debug, Parser)]
#[command(name = "moorctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the boat data file
    #[arg(value_name = "DATA_FILE")]
    pub data_file: PathBuf,

    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
