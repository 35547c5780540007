//! Command-line interface for weekstash.
//!
//! This module provides the CLI structure for the `wstash` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, DeleteCommand, ExportCommand, ListCommand, OutputFormat, ShowCommand,
    StatusCommand, UploadCommand,
};

/// wstash - Stash files locally, grouped by week
///
/// Files are stored as self-contained records (metadata plus embedded
/// content) in a single JSON store, grouped by week for listing. No server,
/// no accounts; everything lives in one local file.
#[derive(Debug, Parser)]
#[command(name = "wstash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stash files into the store
    Upload(UploadCommand),

    /// List stashed files grouped by week
    List(ListCommand),

    /// Show one record's metadata
    Show(ShowCommand),

    /// Export a record back to a file
    Export(ExportCommand),

    /// Delete a record
    Delete(DeleteCommand),

    /// Show store statistics
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
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
