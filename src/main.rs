//! folio - A single-page portfolio generator with scroll-synchronized navigation.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod render;
mod section;
mod tracker;
mod utils;
mod widget;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

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

    let config = init_config(SiteConfig::load(cli)?);

    match &cli.command {
        Commands::Init { name } => cli::init::new_site(&config, name.is_some()),
        Commands::Build { .. } => cli::build::build_site(&config, false).map(|_| ()),
        Commands::Serve { .. } => cli::serve::serve_site(&config),
        Commands::Validate { warn_only } => cli::validate::validate_site(&config, *warn_only),
        Commands::Trace { args } => cli::trace::run_trace(&config, args),
    }
}
