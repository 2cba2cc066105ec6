//! keyhold CLI - get, set and delete passwords in whatever store the host provides

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use keyhold_core::logging::LogLevel;
use keyhold_core::{ConsoleLogger, Keyring};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Warn };
    let keyring = Keyring::new().with_logger(Arc::new(ConsoleLogger::new().with_level(level)));

    if let Some(name) = &cli.backend {
        keyring.set_keyring_by_name(name)?;
    }

    match cli.command {
        Commands::Get(args) => commands::get::execute(&keyring, args),
        Commands::Set(args) => commands::set::execute(&keyring, args),
        Commands::Del(args) => commands::del::execute(&keyring, args),
        Commands::Backends => commands::backends::execute(&keyring),
        Commands::Diagnose => commands::diagnose::execute(&keyring),
    }
}
