//! The state store: movies, tv shows and their seasons, backed by SQLite.
//!
//! # Single-writer contract
//!
//! A `Store` owns a pool capped at one connection, so every operation runs to
//! completion (and commits) before the next one starts. Clones share that
//! connection. Nothing here coordinates writers living in *other processes*
//! that open the same file; SQLite's own file locking is all there is, and a
//! busy database surfaces as [`StoreError::Database`].

use crate::domain::TorrentState;
use crate::models::{MoviePatch, SeasonPatch, TvShowPatch};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub mod error;
pub mod migrator;
pub mod repositories;

pub use crate::entities::movies::Model as Movie;
pub use crate::entities::tv_show_seasons::Model as TvShowSeason;
pub use crate::entities::tv_shows::Model as TvShow;
pub use error::StoreError;
pub use repositories::season::ShowSeasonRow;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const FILE_IDLE_TIMEOUT: Duration = Duration::from_secs(300);
const FILE_MAX_LIFETIME: Duration = Duration::from_secs(600);
/// An in-memory database lives and dies with its connection, so that
/// connection must outlast the process.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

#[derive(Clone)]
pub struct Store {
    conn: DatabaseConnection,
}

impl Store {
    /// Connects and provisions the schema.
    pub async fn new(db_url: &str) -> Result<Self, StoreError> {
        let store = Self::open(db_url).await?;
        store.create_schema().await?;
        Ok(store)
    }

    /// Connects without touching the schema.
    ///
    /// Accepts `sqlite:<path>`, `sqlite::memory:` or a bare file path.
    pub async fn open(db_url: &str) -> Result<Self, StoreError> {
        Self::with_options(db_url, DEFAULT_CONNECT_TIMEOUT, false).await
    }

    pub async fn with_options(
        db_url: &str,
        connect_timeout: Duration,
        sqlx_logging: bool,
    ) -> Result<Self, StoreError> {
        let db_url = normalize_url(db_url);

        if !is_memory_url(&db_url) {
            let path_str = db_url.trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .map_err(|e| StoreError::Database(format!("{path_str}: {e}")))?;
            }
        }

        let opt = connect_options(&db_url, connect_timeout, sqlx_logging);
        let conn = Database::connect(opt).await?;

        info!("Database connected: {}", db_url);
        Ok(Self { conn })
    }

    /// Creates the tables and the show/season view if they are missing.
    /// Safe to call any number of times.
    pub async fn create_schema(&self) -> Result<(), StoreError> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::up(&self.conn, None).await?;

        info!("Schema ready");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Closes the underlying pool. Clones of this store fail with
    /// [`StoreError::Closed`] afterwards; nothing reconnects.
    pub async fn close(self) -> Result<(), StoreError> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn tv_show_repo(&self) -> repositories::tv_show::TvShowRepository {
        repositories::tv_show::TvShowRepository::new(self.conn.clone())
    }

    fn season_repo(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    pub async fn add_movie(
        &self,
        name: &str,
        max_size_mb: i64,
        resolution_profile: &str,
    ) -> Result<Movie, StoreError> {
        self.movie_repo()
            .add(name, max_size_mb, resolution_profile)
            .await
            .inspect_err(|e| log_rejected("add movie", e))
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>, StoreError> {
        self.movie_repo().get(id).await
    }

    pub async fn get_all_movies(&self) -> Result<Vec<Movie>, StoreError> {
        self.movie_repo().list_all().await
    }

    pub async fn get_movies_with_state(
        &self,
        state: TorrentState,
    ) -> Result<Vec<Movie>, StoreError> {
        self.movie_repo().list_with_state(state).await
    }

    /// Returns whether a row matched `id`.
    pub async fn update_movie(&self, id: i32, patch: MoviePatch) -> Result<bool, StoreError> {
        self.movie_repo()
            .update(id, patch)
            .await
            .inspect_err(|e| log_rejected("update movie", e))
    }

    /// Deleting an unknown id is a no-op and returns `false`.
    pub async fn delete_movie(&self, id: i32) -> Result<bool, StoreError> {
        self.movie_repo().remove(id).await
    }

    pub async fn add_tv_show(
        &self,
        name: &str,
        max_episode_size_mb: i64,
        resolution_profile: &str,
    ) -> Result<TvShow, StoreError> {
        self.tv_show_repo()
            .add(name, max_episode_size_mb, resolution_profile)
            .await
            .inspect_err(|e| log_rejected("add tv show", e))
    }

    pub async fn get_tv_show(&self, id: i32) -> Result<Option<TvShow>, StoreError> {
        self.tv_show_repo().get(id).await
    }

    pub async fn get_all_tv_shows(&self) -> Result<Vec<TvShow>, StoreError> {
        self.tv_show_repo().list_all().await
    }

    pub async fn get_tv_shows_with_state(
        &self,
        state: TorrentState,
    ) -> Result<Vec<TvShow>, StoreError> {
        self.tv_show_repo().list_with_state(state).await
    }

    pub async fn update_tv_show(&self, id: i32, patch: TvShowPatch) -> Result<bool, StoreError> {
        self.tv_show_repo()
            .update(id, patch)
            .await
            .inspect_err(|e| log_rejected("update tv show", e))
    }

    /// Seasons are never removed along with their show. While any season still
    /// references the show this fails with [`StoreError::ConstraintViolation`];
    /// use [`Store::delete_tv_show_with_seasons`] to remove both.
    pub async fn delete_tv_show(&self, id: i32) -> Result<bool, StoreError> {
        self.tv_show_repo()
            .remove(id)
            .await
            .inspect_err(|e| log_rejected("delete tv show", e))
    }

    /// Removes the show and all of its seasons in one transaction.
    pub async fn delete_tv_show_with_seasons(&self, id: i32) -> Result<bool, StoreError> {
        self.tv_show_repo().remove_with_seasons(id).await
    }

    pub async fn add_tv_show_season(
        &self,
        show_id: i32,
        season_number: i32,
        season_number_episodes: i32,
    ) -> Result<TvShowSeason, StoreError> {
        self.season_repo()
            .add(show_id, season_number, season_number_episodes)
            .await
            .inspect_err(|e| log_rejected("add season", e))
    }

    pub async fn get_season(&self, id: i32) -> Result<Option<TvShowSeason>, StoreError> {
        self.season_repo().get(id).await
    }

    pub async fn update_show_season(
        &self,
        id: i32,
        patch: SeasonPatch,
    ) -> Result<bool, StoreError> {
        self.season_repo()
            .update(id, patch)
            .await
            .inspect_err(|e| log_rejected("update season", e))
    }

    pub async fn delete_season(&self, id: i32) -> Result<bool, StoreError> {
        self.season_repo().remove(id).await
    }

    /// One row per (show, season). Shows without seasons are absent.
    pub async fn get_all_tv_shows_with_seasons(&self) -> Result<Vec<ShowSeasonRow>, StoreError> {
        self.season_repo().list_with_shows().await
    }

    pub async fn get_tv_show_with_seasons(
        &self,
        show_id: i32,
    ) -> Result<Vec<ShowSeasonRow>, StoreError> {
        self.season_repo().list_for_show(show_id).await
    }

    /// Distinct states across the show's seasons.
    pub async fn get_season_states(
        &self,
        show_id: i32,
    ) -> Result<HashSet<TorrentState>, StoreError> {
        self.season_repo().states_for_show(show_id).await
    }
}

fn log_rejected(operation: &str, err: &StoreError) {
    if err.is_constraint_violation() || err.is_invalid_request() {
        warn!("Rejected {}: {}", operation, err);
    }
}

fn connect_options(db_url: &str, connect_timeout: Duration, sqlx_logging: bool) -> ConnectOptions {
    let (idle_timeout, max_lifetime) = if is_memory_url(db_url) {
        (MEMORY_CONNECTION_LIFETIME, MEMORY_CONNECTION_LIFETIME)
    } else {
        (FILE_IDLE_TIMEOUT, FILE_MAX_LIFETIME)
    };

    let mut opt = ConnectOptions::new(db_url.to_string());
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(connect_timeout)
        .acquire_timeout(connect_timeout)
        .idle_timeout(idle_timeout)
        .max_lifetime(max_lifetime)
        .sqlx_logging(sqlx_logging);
    opt
}

fn is_memory_url(db_url: &str) -> bool {
    db_url.starts_with("sqlite::memory:") || db_url.contains("mode=memory")
}

fn normalize_url(db_url: &str) -> String {
    if db_url.starts_with("sqlite:") {
        db_url.to_string()
    } else if db_url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite:{db_url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_paths_get_the_sqlite_scheme() {
        assert_eq!(normalize_url("data/tb.db"), "sqlite:data/tb.db");
        assert_eq!(normalize_url("sqlite:data/tb.db"), "sqlite:data/tb.db");
        assert_eq!(normalize_url(":memory:"), "sqlite::memory:");
    }

    #[test]
    fn memory_connection_is_never_recycled() {
        let opt = connect_options("sqlite::memory:", DEFAULT_CONNECT_TIMEOUT, false);
        assert_eq!(opt.get_max_connections(), Some(1));
        assert_eq!(opt.get_min_connections(), Some(1));
        assert_eq!(opt.get_max_lifetime(), Some(MEMORY_CONNECTION_LIFETIME));
        assert_eq!(opt.get_idle_timeout(), Some(MEMORY_CONNECTION_LIFETIME));
        assert!(MEMORY_CONNECTION_LIFETIME >= Duration::from_secs(60 * 60 * 24 * 30));
    }

    #[test]
    fn file_connection_uses_bounded_lifetimes() {
        let opt = connect_options("sqlite:data/tb.db", Duration::from_secs(3), true);
        assert_eq!(opt.get_max_connections(), Some(1));
        assert_eq!(opt.get_max_lifetime(), Some(FILE_MAX_LIFETIME));
        assert_eq!(opt.get_idle_timeout(), Some(FILE_IDLE_TIMEOUT));
        assert_eq!(opt.get_connect_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(opt.get_acquire_timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn detects_memory_targets() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite:file:tb?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite:data/tb.db"));
    }
}
