//! Command-line interface definitions and parsing
//!
//! Defines the `foldr` CLI with `clap`. Every command except `config` works on
//! the bookmark store named in the configuration.
//!
//! # Commands
//!
//! - **list**: show bookmarked folders in order (default)
//! - **add**: bookmark a folder, picking it interactively if no path is given
//! - **remove**: drop a bookmark by index
//! - **move**: reorder a bookmark
//! - **config**: inspect the configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "foldr")]
#[command(about = "Bookmark media folders", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Never open the native folder dialog (overrides config)
    #[arg(long = "restricted", global = true)]
    pub restricted: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List bookmarked folders (default)
    #[command(visible_alias = "ls")]
    List,

    /// Bookmark a folder
    Add {
        /// Folder to add; opens a folder picker when omitted
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Remove the bookmark at INDEX
    #[command(visible_alias = "rm")]
    Remove {
        /// Position as shown by `list`
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Move the bookmark at FROM to position TO
    #[command(visible_alias = "mv")]
    Move {
        #[arg(value_name = "FROM")]
        from: usize,

        #[arg(value_name = "TO")]
        to: usize,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to List if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List)
    }
}
