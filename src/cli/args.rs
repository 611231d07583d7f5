//! Command line argument parsing

use crate::config::{Config, DEFAULT_WORK_DIR, MOBILE_USER_AGENT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Douyin share-link resolver and watermark-free downloader
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Working directory for downloaded videos
    #[arg(long, env = "WORK_DIR", value_name = "DIR", default_value = DEFAULT_WORK_DIR)]
    pub work_dir: PathBuf,

    /// Override User-Agent header
    #[arg(long, value_name = "USER_AGENT")]
    pub user_agent: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands; `serve` is the default
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the JSON-RPC server over stdio
    Serve,
    /// Print the watermark-free download link
    Link {
        /// Share link or text containing one
        share_text: String,
    },
    /// Print video id, title and download link
    Info {
        /// Share link or text containing one
        share_text: String,
    },
    /// Download the video into the working directory
    Download {
        /// Share link or text containing one
        share_text: String,
    },
    /// List downloaded files in the working directory
    List,
    /// Delete all files in the working directory
    Clear,
}

impl Args {
    /// Subcommand to run
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// Build the runtime configuration
    pub fn to_config(&self) -> Config {
        Config::new()
            .with_work_dir(&self.work_dir)
            .with_user_agent(
                self.user_agent
                    .clone()
                    .unwrap_or_else(|| MOBILE_USER_AGENT.to_string()),
            )
    }

    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbosity_level() {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}
