//! TANAW CLI - cleaning tool for DepEd enrollment spreadsheets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean {
            file,
            output_dir,
            max_per_cell,
            json,
        } => commands::clean::run(file, output_dir, max_per_cell, json, cli.verbose),

        Commands::Inspect { file, rows, json } => {
            commands::inspect::run(file, rows, json, cli.verbose)
        }

        Commands::Summary { file, json } => commands::summary::run(file, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
