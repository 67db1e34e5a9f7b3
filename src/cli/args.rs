//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Live preview for a structure / style / behavior triple
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: livepen.toml)
    #[arg(short = 'C', long, global = true, default_value = "livepen.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a starter project
    #[command(visible_alias = "i")]
    Init {
        /// Project directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print what would be written without touching the disk
        #[arg(long)]
        dry: bool,
    },

    /// Compose the sources once and write the result to a file
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        common: CommonArgs,

        /// Output file (relative to project root)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Serve the live preview and refresh it on every change
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        common: CommonArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable file watching for live refresh
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },
}

/// Shared arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// Verbose flag of the selected subcommand.
    pub const fn verbose(&self) -> bool {
        match &self.command {
            Commands::Build { common, .. } | Commands::Serve { common, .. } => common.verbose,
            Commands::Init { .. } => false,
        }
    }
}
