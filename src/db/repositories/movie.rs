use crate::db::StoreError;
use crate::domain::TorrentState;
use crate::entities::{movies, prelude::*};
use crate::models::MoviePatch;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(
        &self,
        name: &str,
        max_size_mb: i64,
        resolution_profile: &str,
    ) -> Result<movies::Model, StoreError> {
        let active_model = movies::ActiveModel {
            name: Set(name.to_string()),
            max_size_mb: Set(max_size_mb),
            resolution_profile: Set(resolution_profile.to_string()),
            ..Default::default()
        };

        let movie = active_model.insert(&self.conn).await?;

        info!("Added movie {} (ID: {})", movie.name, movie.id);
        Ok(movie)
    }

    pub async fn get(&self, id: i32) -> Result<Option<movies::Model>, StoreError> {
        Ok(Movies::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<movies::Model>, StoreError> {
        Ok(Movies::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_with_state(
        &self,
        state: TorrentState,
    ) -> Result<Vec<movies::Model>, StoreError> {
        let rows = Movies::find()
            .filter(movies::Column::State.eq(state))
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?;

        debug!("Found {} movies in state {}", rows.len(), state);
        Ok(rows)
    }

    pub async fn update(&self, id: i32, patch: MoviePatch) -> Result<bool, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }

        let result = Movies::update_many()
            .set(patch.into_active_model())
            .filter(movies::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        let updated = result.rows_affected > 0;
        if updated {
            info!("Updated movie with ID: {}", id);
        }
        Ok(updated)
    }

    pub async fn remove(&self, id: i32) -> Result<bool, StoreError> {
        let result = Movies::delete_by_id(id).exec(&self.conn).await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed movie with ID: {}", id);
        }
        Ok(removed)
    }
}
