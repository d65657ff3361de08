//! `rfriend` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, start logging when a log directory is configured, and
//!   open the database.
//! - Report failures on stderr with a non-zero exit code.

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use commands::RecordAction;
use log::info;
use rfriend_core::db::Connection;
use rfriend_core::{default_log_level, init_logging, open_db};
use std::path::Path;

mod cli;
mod commands;

fn main() {
    if let Err(error) = run() {
        eprintln!("rfriend error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    match cli.command {
        Commands::Models => {
            commands::models();
            Ok(())
        }
        Commands::Init => commands::init(&open_database(&cli.db)?),
        Commands::Place { id } => commands::place(&open_database(&cli.db)?, id),
        Commands::List { entity, page } => {
            commands::record(&open_database(&cli.db)?, entity, RecordAction::List(page))
        }
        Commands::Show { entity, id } => {
            commands::record(&open_database(&cli.db)?, entity, RecordAction::Show(id))
        }
        Commands::Add { entity, json } => {
            commands::record(&open_database(&cli.db)?, entity, RecordAction::Add(json))
        }
        Commands::Update { entity, json } => {
            commands::record(&open_database(&cli.db)?, entity, RecordAction::Update(json))
        }
        Commands::Delete { entity, id } => {
            commands::record(&open_database(&cli.db)?, entity, RecordAction::Delete(id))
        }
    }
}

fn open_database(path: &Path) -> anyhow::Result<Connection> {
    let conn = open_db(path)
        .with_context(|| format!("failed to open database `{}`", path.display()))?;
    info!(
        "event=cli_command module=cli status=start db={}",
        path.display()
    );
    Ok(conn)
}
