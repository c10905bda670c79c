//! Capsule - a class-namespacing build tool for embeddable pages.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod logger;
mod manifest;
mod rewrite;
mod session;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::WrapConfig;

use crate::core::BuildMode;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.build_args().verbose);

    let config = WrapConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_page(&config, BuildMode::PRODUCTION),
        Commands::Dev { .. } => cli::build::build_page(&config, BuildMode::DEVELOPMENT),
    }
}
