use crate::db::StoreError;
use crate::domain::TorrentState;
use crate::entities::{prelude::*, tv_show_seasons, tv_shows};
use crate::models::TvShowPatch;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

pub struct TvShowRepository {
    conn: DatabaseConnection,
}

impl TvShowRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(
        &self,
        name: &str,
        max_episode_size_mb: i64,
        resolution_profile: &str,
    ) -> Result<tv_shows::Model, StoreError> {
        let active_model = tv_shows::ActiveModel {
            name: Set(name.to_string()),
            max_episode_size_mb: Set(max_episode_size_mb),
            resolution_profile: Set(resolution_profile.to_string()),
            ..Default::default()
        };

        let show = active_model.insert(&self.conn).await?;

        info!("Added tv show {} (ID: {})", show.name, show.id);
        Ok(show)
    }

    pub async fn get(&self, id: i32) -> Result<Option<tv_shows::Model>, StoreError> {
        Ok(TvShows::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<tv_shows::Model>, StoreError> {
        Ok(TvShows::find()
            .order_by_asc(tv_shows::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_with_state(
        &self,
        state: TorrentState,
    ) -> Result<Vec<tv_shows::Model>, StoreError> {
        let rows = TvShows::find()
            .filter(tv_shows::Column::State.eq(state))
            .order_by_asc(tv_shows::Column::Id)
            .all(&self.conn)
            .await?;

        debug!("Found {} tv shows in state {}", rows.len(), state);
        Ok(rows)
    }

    pub async fn update(&self, id: i32, patch: TvShowPatch) -> Result<bool, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }

        let result = TvShows::update_many()
            .set(patch.into_active_model())
            .filter(tv_shows::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        let updated = result.rows_affected > 0;
        if updated {
            info!("Updated tv show with ID: {}", id);
        }
        Ok(updated)
    }

    /// Deletes only the show row. Fails with a constraint violation while
    /// seasons still reference it.
    pub async fn remove(&self, id: i32) -> Result<bool, StoreError> {
        let result = TvShows::delete_by_id(id).exec(&self.conn).await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed tv show with ID: {}", id);
        }
        Ok(removed)
    }

    pub async fn remove_with_seasons(&self, id: i32) -> Result<bool, StoreError> {
        let txn = self.conn.begin().await?;

        let seasons = TvShowSeasons::delete_many()
            .filter(tv_show_seasons::Column::ShowId.eq(id))
            .exec(&txn)
            .await?;

        let result = TvShows::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed || seasons.rows_affected > 0 {
            info!(
                "Removed tv show with ID: {} and {} season(s)",
                id, seasons.rows_affected
            );
        }
        Ok(removed)
    }
}
