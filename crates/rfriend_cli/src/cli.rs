//! Command-line surface definition.

use clap::{Args, Parser, Subcommand};
use rfriend_core::EntityKind;
use std::path::PathBuf;
use uuid::Uuid;

/// Top-level parser for the `rfriend` binary.
#[derive(Debug, Parser)]
#[command(name = "rfriend", version, about = "Researcher's Friend - genealogical research records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file
    #[arg(long, global = true, env = "RFRIEND_DB", default_value = "rfriend.sqlite3")]
    pub db: PathBuf,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "RFRIEND_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "RFRIEND_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or migrate the database and print its schema version
    Init,
    /// Print the admin registry
    Models,
    /// List records of one entity as JSON
    List {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Print one record as JSON
    Show {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        id: Uuid,
    },
    /// Create a record from a JSON object
    Add {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        json: String,
    },
    /// Replace a record from a JSON object carrying its `id`
    Update {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        json: String,
    },
    /// Delete one record
    Delete {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        id: Uuid,
    },
    /// Print the display string of a place
    Place { id: Uuid },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Max records to print
    #[arg(long)]
    pub limit: Option<u32>,
    /// Records to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

fn parse_entity(value: &str) -> Result<EntityKind, String> {
    EntityKind::from_name(value).ok_or_else(|| {
        let known = EntityKind::ALL
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown entity `{value}`; expected one of: {known}")
    })
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};
    use rfriend_core::EntityKind;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_parses_entity_and_paging() {
        let cli = Cli::try_parse_from([
            "rfriend",
            "--db",
            "/tmp/research.sqlite3",
            "list",
            "place-part",
            "--limit",
            "10",
            "--offset",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.db.to_str(), Some("/tmp/research.sqlite3"));
        match cli.command {
            Commands::List { entity, page } => {
                assert_eq!(entity, EntityKind::PlacePart);
                assert_eq!(page.limit, Some(10));
                assert_eq!(page.offset, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_entity_is_rejected() {
        assert!(Cli::try_parse_from(["rfriend", "list", "activity"]).is_err());
    }
}
