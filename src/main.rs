//! cpush - stage, commit and push through your git executable.

mod cli;
mod config;
mod git;
mod logger;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::CpushConfig;

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Err(e) = run(&cli) {
        log!("error"; "{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // init runs before any config exists
    if let Commands::Init { dry, force } = &cli.command {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        return cli::init::write_config(&cwd.join(&cli.config), *dry, *force);
    }

    let config = CpushConfig::load(cli)?;
    cli::git::run_git_command(&cli.command, &config)
}
