//! CLI module - Command-line interface for torrentbox
//!
//! Thin wrapper around the [`Store`](crate::db::Store) for inspecting and
//! editing acquisition state by hand.

mod commands;

use crate::domain::TorrentState;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Torrentbox - acquisition state for movies and tv shows
#[derive(Parser)]
#[command(name = "torrentbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default search paths
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database to use, overriding `general.database_path`
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database schema (safe to repeat)
    Init,

    /// Write a default config.toml to the working directory
    InitConfig,

    /// Manage movies
    #[command(alias = "m")]
    Movie {
        #[command(subcommand)]
        command: MovieCommands,
    },

    /// Manage tv shows
    #[command(alias = "s")]
    Show {
        #[command(subcommand)]
        command: ShowCommands,
    },

    /// Manage tv show seasons
    Season {
        #[command(subcommand)]
        command: SeasonCommands,
    },
}

#[derive(Subcommand)]
pub enum MovieCommands {
    /// Track a new movie
    Add {
        name: String,
        max_size_mb: i64,
        resolution_profile: String,
    },
    /// List movies, optionally only those in one state
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        state: Option<TorrentState>,
    },
    /// Show one movie
    Get { id: i32 },
    /// Change columns, e.g. `state=DOWNLOADING hash=abc`
    Set {
        id: i32,
        #[arg(required = true, value_parser = commands::parse_assignment)]
        fields: Vec<(String, serde_json::Value)>,
    },
    /// Stop tracking a movie
    #[command(alias = "rm")]
    Remove { id: i32 },
}

#[derive(Subcommand)]
pub enum ShowCommands {
    /// Track a new tv show
    Add {
        name: String,
        max_episode_size_mb: i64,
        resolution_profile: String,
    },
    /// List tv shows, optionally only those in one state
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        state: Option<TorrentState>,
    },
    /// Show one tv show
    Get { id: i32 },
    /// List seasons of one show, or of every show
    Seasons { id: Option<i32> },
    /// Distinct season states of a show
    States { id: i32 },
    /// Change columns, e.g. `state=PAUSED`
    Set {
        id: i32,
        #[arg(required = true, value_parser = commands::parse_assignment)]
        fields: Vec<(String, serde_json::Value)>,
    },
    /// Stop tracking a tv show
    #[command(alias = "rm")]
    Remove {
        id: i32,
        /// Also remove every season of the show
        #[arg(long)]
        with_seasons: bool,
    },
}

#[derive(Subcommand)]
pub enum SeasonCommands {
    /// Track a season of an existing show
    Add {
        show_id: i32,
        season_number: i32,
        episodes: i32,
    },
    /// Show one season
    Get { id: i32 },
    /// Change columns, e.g. `state=SEEDING hash=abc`
    Set {
        id: i32,
        #[arg(required = true, value_parser = commands::parse_assignment)]
        fields: Vec<(String, serde_json::Value)>,
    },
    /// Stop tracking a season
    #[command(alias = "rm")]
    Remove { id: i32 },
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_state_filter() {
        let cli = Cli::try_parse_from(["torrentbox", "movie", "list", "--state", "SEEDING"])
            .unwrap();
        match cli.command {
            Commands::Movie {
                command: MovieCommands::List { state },
            } => assert_eq!(state, Some(TorrentState::Seeding)),
            _ => panic!("parsed the wrong command"),
        }
    }

    #[test]
    fn rejects_invalid_state_filter() {
        assert!(
            Cli::try_parse_from(["torrentbox", "show", "list", "--state", "NOT_A_STATE"]).is_err()
        );
    }

    #[test]
    fn parses_assignments() {
        let cli = Cli::try_parse_from([
            "torrentbox",
            "--database",
            "sqlite::memory:",
            "season",
            "set",
            "3",
            "state=SEEDING",
            "season_number_episodes=12",
        ])
        .unwrap();

        assert_eq!(cli.database.as_deref(), Some("sqlite::memory:"));
        match cli.command {
            Commands::Season {
                command: SeasonCommands::Set { id, fields },
            } => {
                assert_eq!(id, 3);
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[1].1, serde_json::json!(12));
            }
            _ => panic!("parsed the wrong command"),
        }
    }
}
