//! inbox CLI - inspect and maintain the local conversation cache
//!
//! Imports upstream inbox pages and edits cached conversation records.

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::activity::run_activity;
use crate::commands::common::resolve_db_path;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::export::run_export;
use crate::commands::flags::{run_update, ConversationUpdate};
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::put::run_put;
use crate::commands::show::run_show;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "inbox=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell, output } = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let db_path = resolve_db_path(cli.db_path)?;

    match cli.command {
        Commands::Import { source } => {
            run_import(&source, &db_path)?;
        }
        Commands::Put(args) => run_put(args, &db_path)?,
        Commands::List {
            limit,
            offset,
            since,
            json,
        } => run_list(limit, offset, since, json, &db_path)?,
        Commands::Show { id, json } => run_show(&id, json, &db_path)?,
        Commands::Activity {
            id,
            message,
            timestamp,
            unread,
        } => {
            run_activity(&id, &message, timestamp, unread, &db_path)?;
        }
        Commands::Read { id } => {
            run_update(&id, ConversationUpdate::Read, &db_path)?;
        }
        Commands::Mute(args) => {
            run_update(&args.id, ConversationUpdate::Muted(!args.off), &db_path)?;
        }
        Commands::Pin(args) => {
            run_update(&args.id, ConversationUpdate::Pinned(!args.off), &db_path)?;
        }
        Commands::Favorite(args) => {
            run_update(&args.id, ConversationUpdate::Favorite(!args.off), &db_path)?;
        }
        Commands::Delete { id } => run_delete(&id, &db_path)?,
        Commands::Export { output } => run_export(output.as_deref(), &db_path)?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests;
