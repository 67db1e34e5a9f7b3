//! livepen - live preview for a structure / style / behavior triple.

#![allow(dead_code)]

mod actor;
mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod preview;
mod reload;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{ProjectConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose());

    // Init writes a config, it never reads one
    if let Commands::Init { name, dry } = &cli.command {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let root = name.as_ref().map_or_else(|| cwd.clone(), |name| cwd.join(name));
        return cli::init::new_project(&root, *dry);
    }

    let config = init_config(ProjectConfig::load(cli)?);
    if !config.has_config_file() {
        debug!("config"; "no config file, serving {}", config.root().display());
    }

    match &cli.command {
        Commands::Build { .. } => cli::build::build_preview(&config),
        Commands::Serve { .. } => serve(),
        Commands::Init { .. } => Ok(()),
    }
}

/// Bind first so the browser gets a loading page while the first refresh runs.
fn serve() -> Result<()> {
    let bound_server = cli::serve::bind_server()?;
    bound_server.run()
}
