mod application;
mod commands;
mod constants;
mod sysexits;

use crate::commands::{Cli, Commands};
use clap::Parser;
use env_logger::{Builder, Env};
use std::process;

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

/// Entry point for the nbk CLI application.
/// Parses command-line arguments and dispatches to the appropriate command handler.
fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let commands = match cli.commands {
        Some(commands) => commands,
        None => {
            eprintln!("nbk requires at least one command to execute. See 'nbk --help' for usage.");
            process::exit(sysexits::EX_KEYWORD);
        }
    };

    let res = match commands {
        Commands::Backup {
            paths,
            limit,
            recursive,
        } => commands::backup(paths, limit, recursive),
        Commands::Count { file } => commands::count(file),
        Commands::List { file } => commands::list(file),
        Commands::Copy {
            destination,
            sources,
        } => commands::copy(destination, sources),
        Commands::Config { limit, reset } => commands::config(limit, reset),
    };
    if let Err(e) = res {
        eprintln!("nbk: {e:#}");
        process::exit(commands::exit_code(&e));
    }
}
