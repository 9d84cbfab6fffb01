//! Dragnet CLI entry point.

use clap::Parser;
use colored::Colorize;

mod cli;
mod commands;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    dragnet_core::log::init(cli.verbose, cli.quiet);

    if !cli.quiet {
        println!(
            "{} v{} - security scanning platform lifecycle manager",
            "dragnet".red().bold(),
            dragnet_core::VERSION
        );
    }

    match cli.execute() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
