use crate::db::StoreError;
use crate::domain::TorrentState;
use crate::entities::{prelude::*, tv_show_seasons, tv_shows_with_seasons_view};
use crate::models::SeasonPatch;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashSet;
use tracing::{debug, info};

pub use crate::entities::tv_shows_with_seasons_view::Model as ShowSeasonRow;

pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(
        &self,
        show_id: i32,
        season_number: i32,
        season_number_episodes: i32,
    ) -> Result<tv_show_seasons::Model, StoreError> {
        let active_model = tv_show_seasons::ActiveModel {
            show_id: Set(show_id),
            season_number: Set(season_number),
            season_number_episodes: Set(season_number_episodes),
            ..Default::default()
        };

        let season = active_model.insert(&self.conn).await?;

        info!(
            "Added season {} of show {} (ID: {})",
            season.season_number, season.show_id, season.id
        );
        Ok(season)
    }

    pub async fn get(&self, id: i32) -> Result<Option<tv_show_seasons::Model>, StoreError> {
        Ok(TvShowSeasons::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn update(&self, id: i32, patch: SeasonPatch) -> Result<bool, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }

        let result = TvShowSeasons::update_many()
            .set(patch.into_active_model())
            .filter(tv_show_seasons::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        let updated = result.rows_affected > 0;
        if updated {
            info!("Updated season with ID: {}", id);
        }
        Ok(updated)
    }

    pub async fn remove(&self, id: i32) -> Result<bool, StoreError> {
        let result = TvShowSeasons::delete_by_id(id).exec(&self.conn).await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed season with ID: {}", id);
        }
        Ok(removed)
    }

    pub async fn list_with_shows(&self) -> Result<Vec<ShowSeasonRow>, StoreError> {
        Ok(TvShowsWithSeasonsView::find()
            .order_by_asc(tv_shows_with_seasons_view::Column::ShowId)
            .order_by_asc(tv_shows_with_seasons_view::Column::SeasonNumber)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_for_show(&self, show_id: i32) -> Result<Vec<ShowSeasonRow>, StoreError> {
        let rows = TvShowsWithSeasonsView::find()
            .filter(tv_shows_with_seasons_view::Column::ShowId.eq(show_id))
            .order_by_asc(tv_shows_with_seasons_view::Column::SeasonNumber)
            .all(&self.conn)
            .await?;

        debug!("Found {} seasons for show {}", rows.len(), show_id);
        Ok(rows)
    }

    pub async fn states_for_show(&self, show_id: i32) -> Result<HashSet<TorrentState>, StoreError> {
        let states: Vec<TorrentState> = TvShowsWithSeasonsView::find()
            .select_only()
            .column(tv_shows_with_seasons_view::Column::SeasonState)
            .distinct()
            .filter(tv_shows_with_seasons_view::Column::ShowId.eq(show_id))
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(states.into_iter().collect())
    }
}
