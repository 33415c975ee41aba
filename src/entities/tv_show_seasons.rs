use crate::domain::TorrentState;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unique on (`show_id`, `season_number`); see the initial migration.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tv_show_seasons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub show_id: i32,
    pub season_number: i32,
    pub season_number_episodes: i32,
    pub state: TorrentState,
    pub hash: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tv_shows::Entity",
        from = "Column::ShowId",
        to = "super::tv_shows::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    TvShows,
}

impl Related<super::tv_shows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TvShows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
