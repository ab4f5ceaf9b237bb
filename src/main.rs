//! Plinth - plugin catalog resolver and resumable installer
//!
//! Reads a catalog of installable units, resolves a selection to an ordered,
//! conflict-free plan and installs it into a project, recording progress per
//! unit so interrupted runs resume where they stopped.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod engine;
mod error;
mod hash;
mod installer;
mod logging;
mod manifest;
mod project;
mod resolver;
mod state;
mod transaction;
mod ui;

use cli::{Cli, Commands};
use commands::context::Context;
use error::{PlinthError, Result};

fn run(cli: Cli) -> Result<()> {
    // These need neither a project nor a catalog
    match &cli.command {
        Commands::Version => return commands::version::run(),
        Commands::Completions(args) => return commands::completions::run(args),
        _ => {}
    }

    let mut ctx = Context::resolve(cli.project, cli.catalog, cli.quiet)?;

    match cli.command {
        Commands::Init => commands::init::run(&ctx),
        Commands::Validate => commands::validate::run(&ctx),
        Commands::List(args) => commands::list::run(&ctx, &args),
        Commands::Show(args) => commands::show::run(&ctx, &args),
        Commands::Plan(args) => commands::plan::run(&ctx, &args),
        Commands::Install(args) => commands::install::run(&mut ctx, &args),
        Commands::Status(args) => commands::status::run(&ctx, &args),
        Commands::Reset(args) => commands::reset::run(&ctx, &args),
        Commands::Version | Commands::Completions(_) => Ok(()),
    }
}

fn report(err: &PlinthError) {
    eprintln!("Error: {err}");
    if let Some(help) = err.help() {
        eprintln!("  help: {help}");
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        tracing::debug!(category = ?e.category(), "command failed");
        report(&e);
        std::process::exit(1);
    }
}
