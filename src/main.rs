//! cardassets - custom stylesheets and scripts for flashcard views.
//!
//! Assets live in `css/` and `js/` under an assets root. A JSON registry
//! remembers which of them are enabled; it is reconciled with the
//! directories every time it is opened.

#![allow(dead_code)]

mod asset;
mod cli;
mod config;
mod inject;
mod library;
mod logger;
mod registry;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = AppConfig::load(&cli)?;

    match &cli.command {
        Commands::Init { force } => cli::init::run_init(&config, *force),
        Commands::Sync => cli::sync::run_sync(&config),
        Commands::List { category } => cli::list::run_list(&config, *category),
        Commands::Toggle { target } => cli::toggle::run_toggle(&config, target),
        Commands::Enable { target } => cli::toggle::run_set(&config, target, true),
        Commands::Disable { target } => cli::toggle::run_set(&config, target, false),
        Commands::Inject { args } => cli::inject::run_inject(&config, args),
    }
}
