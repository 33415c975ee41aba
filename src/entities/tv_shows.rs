use crate::domain::TorrentState;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tv_shows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub max_episode_size_mb: i64,
    pub resolution_profile: String,
    pub state: TorrentState,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tv_show_seasons::Entity")]
    TvShowSeasons,
}

impl Related<super::tv_show_seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TvShowSeasons.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
