//! shaper-svg - Affinity Designer layer names <-> Shaper Origin SVG attributes.

#![allow(dead_code)]

mod cli;
mod config;
mod logger;
mod shaper;
mod svg;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Convert { args } => cli::convert::run_convert(args, &config),
        Commands::Revert { args } => cli::revert::run_revert(args, &config),
    }
}
