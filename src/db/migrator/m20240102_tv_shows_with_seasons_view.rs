use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Inner join on purpose: shows without seasons are not part of the view.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE VIEW IF NOT EXISTS tv_shows_with_seasons_view AS
            SELECT
                tv_shows.id AS show_id,
                tv_shows.name AS show_name,
                tv_shows.state AS show_state,
                tv_show_seasons.id AS season_id,
                tv_show_seasons.season_number AS season_number,
                tv_show_seasons.season_number_episodes AS season_number_episodes,
                tv_show_seasons.state AS season_state,
                tv_show_seasons.hash AS season_hash
            FROM tv_shows
            INNER JOIN tv_show_seasons ON tv_shows.id = tv_show_seasons.show_id
        "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP VIEW IF EXISTS tv_shows_with_seasons_view")
            .await?;

        Ok(())
    }
}
