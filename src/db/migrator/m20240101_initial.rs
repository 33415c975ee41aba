use crate::domain::TorrentState;
use crate::entities::prelude::*;
use crate::entities::{movies, tv_show_seasons, tv_shows};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SEASON_UNIQUE_INDEX: &str = "idx_tv_show_seasons_show_id_season_number";

fn state_column<C: IntoIden>(column: C) -> ColumnDef {
    ColumnDef::new(column)
        .text()
        .not_null()
        .default(TorrentState::Searching.as_str())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(movies::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(movies::Column::Name)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(movies::Column::MaxSizeMb)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(movies::Column::ResolutionProfile)
                            .text()
                            .not_null(),
                    )
                    .col(&mut state_column(movies::Column::State))
                    .col(ColumnDef::new(movies::Column::Hash).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TvShows)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(tv_shows::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(tv_shows::Column::Name)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(tv_shows::Column::MaxEpisodeSizeMb)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tv_shows::Column::ResolutionProfile)
                            .text()
                            .not_null(),
                    )
                    .col(&mut state_column(tv_shows::Column::State))
                    .to_owned(),
            )
            .await?;

        // No ON DELETE action: removing a show never removes its seasons.
        manager
            .create_table(
                Table::create()
                    .table(TvShowSeasons)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(tv_show_seasons::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(tv_show_seasons::Column::ShowId).integer())
                    .col(
                        ColumnDef::new(tv_show_seasons::Column::SeasonNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tv_show_seasons::Column::SeasonNumberEpisodes)
                            .integer()
                            .not_null(),
                    )
                    .col(&mut state_column(tv_show_seasons::Column::State))
                    .col(ColumnDef::new(tv_show_seasons::Column::Hash).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TvShowSeasons, tv_show_seasons::Column::ShowId)
                            .to(TvShows, tv_shows::Column::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(SEASON_UNIQUE_INDEX)
                    .table(TvShowSeasons)
                    .col(tv_show_seasons::Column::ShowId)
                    .col(tv_show_seasons::Column::SeasonNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TvShowSeasons).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TvShows).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movies).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
