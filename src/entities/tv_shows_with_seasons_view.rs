//! Read-only projection of `tv_shows INNER JOIN tv_show_seasons`.
//!
//! Backed by a SQL view, so only the `find` side of the entity is ever used.
//! Shows without seasons never appear here.

use crate::domain::TorrentState;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tv_shows_with_seasons_view")]
pub struct Model {
    pub show_id: i32,
    pub show_name: String,
    pub show_state: TorrentState,
    #[sea_orm(primary_key, auto_increment = false)]
    pub season_id: i32,
    pub season_number: i32,
    pub season_number_episodes: i32,
    pub season_state: TorrentState,
    pub season_hash: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
