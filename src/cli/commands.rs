//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list: list all configured tools
//! - show: show parameters of a tool
//! - demo: walk through adding, switching and removing a tool

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolrack - manage robot tool profiles
#[derive(Parser, Debug)]
#[command(name = "toolrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all configured tools, marking the active one
    List,

    /// Show parameters of a tool
    Show {
        /// Tool name (defaults to the active tool)
        name: Option<String>,
    },

    /// Add a tool, switch to it, then switch back and remove it
    Demo {
        /// Name of the tool to add
        #[arg(short, long, default_value = "ExampleTool1")]
        name: String,
    },
}
