pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, MovieCommands, SeasonCommands, ShowCommands};
pub use config::Config;
pub use db::{Store, StoreError};
pub use domain::TorrentState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(database) = &cli.database {
        config.general.database_path.clone_from(database);
    }
    config.validate()?;

    init_tracing(&config);

    if matches!(cli.command, Commands::InitConfig) {
        return cli::cmd_init_config();
    }

    let store = Store::with_options(
        &config.general.database_path,
        config.database.connect_timeout(),
        config.database.sqlx_logging,
    )
    .await
    .with_context(|| format!("Failed to open {}", config.general.database_path))?;

    let result = if matches!(cli.command, Commands::Init) {
        cli::cmd_init(&store).await
    } else {
        match store.create_schema().await {
            Ok(()) => dispatch(&store, cli.command).await,
            Err(e) => Err(e.into()),
        }
    };

    finish(result, store.close().await)
}

/// The command's own error wins over a failed close.
fn finish(result: anyhow::Result<()>, closed: Result<(), StoreError>) -> anyhow::Result<()> {
    if let Err(e) = &closed {
        warn!("Failed to close the database: {}", e);
    }
    result.and(closed.map_err(Into::into))
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    info!("Logging initialized ({})", config.general.log_format);
}

async fn dispatch(store: &Store, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init | Commands::InitConfig => Ok(()),

        Commands::Movie { command } => match command {
            MovieCommands::Add {
                name,
                max_size_mb,
                resolution_profile,
            } => cli::cmd_movie_add(store, &name, max_size_mb, &resolution_profile).await,
            MovieCommands::List { state } => cli::cmd_movie_list(store, state).await,
            MovieCommands::Get { id } => cli::cmd_movie_get(store, id).await,
            MovieCommands::Set { id, fields } => cli::cmd_movie_set(store, id, fields).await,
            MovieCommands::Remove { id } => cli::cmd_movie_remove(store, id).await,
        },

        Commands::Show { command } => match command {
            ShowCommands::Add {
                name,
                max_episode_size_mb,
                resolution_profile,
            } => {
                cli::cmd_show_add(store, &name, max_episode_size_mb, &resolution_profile).await
            }
            ShowCommands::List { state } => cli::cmd_show_list(store, state).await,
            ShowCommands::Get { id } => cli::cmd_show_get(store, id).await,
            ShowCommands::Seasons { id } => cli::cmd_show_seasons(store, id).await,
            ShowCommands::States { id } => cli::cmd_show_states(store, id).await,
            ShowCommands::Set { id, fields } => cli::cmd_show_set(store, id, fields).await,
            ShowCommands::Remove { id, with_seasons } => {
                cli::cmd_show_remove(store, id, with_seasons).await
            }
        },

        Commands::Season { command } => match command {
            SeasonCommands::Add {
                show_id,
                season_number,
                episodes,
            } => cli::cmd_season_add(store, show_id, season_number, episodes).await,
            SeasonCommands::Get { id } => cli::cmd_season_get(store, id).await,
            SeasonCommands::Set { id, fields } => cli::cmd_season_set(store, id, fields).await,
            SeasonCommands::Remove { id } => cli::cmd_season_remove(store, id).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_survives_failed_close() {
        let result = finish(Err(anyhow::anyhow!("movie 7 not found")), Err(StoreError::Closed));
        assert_eq!(result.unwrap_err().to_string(), "movie 7 not found");
    }

    #[test]
    fn close_error_surfaces_after_success() {
        let err = finish(Ok(()), Err(StoreError::Closed)).unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Closed)));
    }

    #[test]
    fn clean_close_keeps_the_result() {
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
