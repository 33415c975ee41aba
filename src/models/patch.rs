//! Partial updates.
//!
//! In-process callers build a patch directly; only `Some` fields are written.
//! Field maps coming from outside (CLI arguments, request bodies) go through
//! `from_fields`, which checks every key against the entity's allow-list before
//! parsing a single value, so one bad key rejects the whole update.

use crate::db::StoreError;
use crate::domain::TorrentState;
use crate::entities::{movies, tv_show_seasons, tv_shows};
use sea_orm::ActiveValue::{NotSet, Set};
use serde_json::{Map, Value};

pub type FieldMap = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoviePatch {
    pub name: Option<String>,
    pub max_size_mb: Option<i64>,
    pub resolution_profile: Option<String>,
    pub state: Option<TorrentState>,
    /// `Some(None)` clears the hash.
    pub hash: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TvShowPatch {
    pub name: Option<String>,
    pub max_episode_size_mb: Option<i64>,
    pub resolution_profile: Option<String>,
    pub state: Option<TorrentState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonPatch {
    pub season_number: Option<i32>,
    pub season_number_episodes: Option<i32>,
    pub state: Option<TorrentState>,
    pub hash: Option<Option<String>>,
}

impl MoviePatch {
    pub const COLUMNS: &'static [&'static str] =
        &["name", "max_size_mb", "resolution_profile", "state", "hash"];

    #[must_use]
    pub fn state(state: TorrentState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.max_size_mb.is_none()
            && self.resolution_profile.is_none()
            && self.state.is_none()
            && self.hash.is_none()
    }

    pub fn from_fields(fields: &FieldMap) -> Result<Self, StoreError> {
        check_columns(fields, Self::COLUMNS)?;

        let mut patch = Self::default();
        for (column, value) in fields {
            match column.as_str() {
                "name" => patch.name = Some(string_value(column, value)?),
                "max_size_mb" => patch.max_size_mb = Some(int_value(column, value)?),
                "resolution_profile" => {
                    patch.resolution_profile = Some(string_value(column, value)?);
                }
                "state" => patch.state = Some(state_value(column, value)?),
                "hash" => patch.hash = Some(nullable_string_value(column, value)?),
                _ => unreachable!("columns checked against the allow-list"),
            }
        }
        Ok(patch)
    }

    pub(crate) fn into_active_model(self) -> movies::ActiveModel {
        movies::ActiveModel {
            id: NotSet,
            name: self.name.map_or(NotSet, Set),
            max_size_mb: self.max_size_mb.map_or(NotSet, Set),
            resolution_profile: self.resolution_profile.map_or(NotSet, Set),
            state: self.state.map_or(NotSet, Set),
            hash: self.hash.map_or(NotSet, Set),
        }
    }
}

impl TvShowPatch {
    pub const COLUMNS: &'static [&'static str] =
        &["name", "max_episode_size_mb", "resolution_profile", "state"];

    #[must_use]
    pub fn state(state: TorrentState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.max_episode_size_mb.is_none()
            && self.resolution_profile.is_none()
            && self.state.is_none()
    }

    pub fn from_fields(fields: &FieldMap) -> Result<Self, StoreError> {
        check_columns(fields, Self::COLUMNS)?;

        let mut patch = Self::default();
        for (column, value) in fields {
            match column.as_str() {
                "name" => patch.name = Some(string_value(column, value)?),
                "max_episode_size_mb" => {
                    patch.max_episode_size_mb = Some(int_value(column, value)?);
                }
                "resolution_profile" => {
                    patch.resolution_profile = Some(string_value(column, value)?);
                }
                "state" => patch.state = Some(state_value(column, value)?),
                _ => unreachable!("columns checked against the allow-list"),
            }
        }
        Ok(patch)
    }

    pub(crate) fn into_active_model(self) -> tv_shows::ActiveModel {
        tv_shows::ActiveModel {
            id: NotSet,
            name: self.name.map_or(NotSet, Set),
            max_episode_size_mb: self.max_episode_size_mb.map_or(NotSet, Set),
            resolution_profile: self.resolution_profile.map_or(NotSet, Set),
            state: self.state.map_or(NotSet, Set),
        }
    }
}

impl SeasonPatch {
    pub const COLUMNS: &'static [&'static str] =
        &["season_number", "season_number_episodes", "state", "hash"];

    #[must_use]
    pub fn state(state: TorrentState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.season_number.is_none()
            && self.season_number_episodes.is_none()
            && self.state.is_none()
            && self.hash.is_none()
    }

    pub fn from_fields(fields: &FieldMap) -> Result<Self, StoreError> {
        check_columns(fields, Self::COLUMNS)?;

        let mut patch = Self::default();
        for (column, value) in fields {
            match column.as_str() {
                "season_number" => patch.season_number = Some(small_int_value(column, value)?),
                "season_number_episodes" => {
                    patch.season_number_episodes = Some(small_int_value(column, value)?);
                }
                "state" => patch.state = Some(state_value(column, value)?),
                "hash" => patch.hash = Some(nullable_string_value(column, value)?),
                _ => unreachable!("columns checked against the allow-list"),
            }
        }
        Ok(patch)
    }

    pub(crate) fn into_active_model(self) -> tv_show_seasons::ActiveModel {
        tv_show_seasons::ActiveModel {
            id: NotSet,
            show_id: NotSet,
            season_number: self.season_number.map_or(NotSet, Set),
            season_number_episodes: self.season_number_episodes.map_or(NotSet, Set),
            state: self.state.map_or(NotSet, Set),
            hash: self.hash.map_or(NotSet, Set),
        }
    }
}

fn check_columns(fields: &FieldMap, allowed: &'static [&'static str]) -> Result<(), StoreError> {
    if fields.is_empty() {
        return Err(StoreError::EmptyUpdate);
    }

    if let Some(column) = fields.keys().find(|key| !allowed.contains(&key.as_str())) {
        return Err(StoreError::UnknownColumn {
            column: column.clone(),
            allowed,
        });
    }

    Ok(())
}

fn invalid(column: &str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidValue {
        column: column.to_string(),
        reason: reason.into(),
    }
}

fn string_value(column: &str, value: &Value) -> Result<String, StoreError> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| invalid(column, format!("expected a string, got {value}")))
}

fn nullable_string_value(column: &str, value: &Value) -> Result<Option<String>, StoreError> {
    if value.is_null() {
        return Ok(None);
    }
    string_value(column, value).map(Some)
}

fn int_value(column: &str, value: &Value) -> Result<i64, StoreError> {
    value
        .as_i64()
        .ok_or_else(|| invalid(column, format!("expected an integer, got {value}")))
}

fn small_int_value(column: &str, value: &Value) -> Result<i32, StoreError> {
    let wide = int_value(column, value)?;
    i32::try_from(wide).map_err(|_| invalid(column, format!("{wide} is out of range")))
}

fn state_value(column: &str, value: &Value) -> Result<TorrentState, StoreError> {
    let raw = value
        .as_str()
        .ok_or_else(|| invalid(column, format!("expected a state name, got {value}")))?;
    raw.parse()
}
