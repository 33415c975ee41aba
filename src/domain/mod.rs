//! Domain types for acquisition tracking.
//!
//! Every stateful row (movie, tv show, season) carries a [`TorrentState`]. The set of
//! states is closed: storage holds the upper-case names, and anything else is rejected
//! at the edge where a string is turned into a state.

use crate::db::StoreError;
use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle marker for an acquisition.
///
/// The regular path is `Searching -> Downloading -> Seeding -> Completed`.
/// `Paused` and `Deleting` are side states a collaborator may move a row into
/// from anywhere.
///
/// # Examples
///
/// ```rust
/// use torrentbox::domain::TorrentState;
///
/// let state: TorrentState = "SEEDING".parse().unwrap();
/// assert_eq!(state, TorrentState::Seeding);
/// assert_eq!(state.to_string(), "SEEDING");
/// assert!("seeding".parse::<TorrentState>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TorrentState {
    /// Still being searched
    #[default]
    #[sea_orm(string_value = "SEARCHING")]
    Searching,
    #[sea_orm(string_value = "DOWNLOADING")]
    Downloading,
    /// Download finished, currently uploading
    #[sea_orm(string_value = "SEEDING")]
    Seeding,
    /// Removed from seeding
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Marked for deletion
    #[sea_orm(string_value = "DELETING")]
    Deleting,
    #[sea_orm(string_value = "PAUSED")]
    Paused,
}

impl TorrentState {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Searching => "SEARCHING",
            Self::Downloading => "DOWNLOADING",
            Self::Seeding => "SEEDING",
            Self::Completed => "COMPLETED",
            Self::Deleting => "DELETING",
            Self::Paused => "PAUSED",
        }
    }

    /// Every state, in lifecycle order followed by the side states.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Comma-separated storage names of every state.
    #[must_use]
    pub fn names() -> String {
        Self::iter()
            .map(|state| state.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// True once nothing is left to fetch for this row.
    #[must_use]
    pub const fn is_downloaded(&self) -> bool {
        matches!(self, Self::Seeding | Self::Completed)
    }
}

impl fmt::Display for TorrentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TorrentState {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| StoreError::InvalidState(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_storage_name() {
        for state in TorrentState::all() {
            assert_eq!(state.as_str().parse::<TorrentState>().unwrap(), state);
        }
        assert_eq!(TorrentState::all().len(), 6);
    }

    #[test]
    fn rejects_unknown_state() {
        let err = "NOT_A_STATE".parse::<TorrentState>().unwrap_err();
        assert!(matches!(err, StoreError::InvalidState(ref s) if s == "NOT_A_STATE"));
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Searching".parse::<TorrentState>().is_err());
        assert!(" SEARCHING".parse::<TorrentState>().is_err());
    }

    #[test]
    fn active_enum_value_matches_display() {
        for state in TorrentState::all() {
            assert_eq!(state.to_value(), state.to_string());
        }
    }

    #[test]
    fn serde_uses_storage_names() {
        let json = serde_json::to_string(&TorrentState::Downloading).unwrap();
        assert_eq!(json, "\"DOWNLOADING\"");
        let back: TorrentState = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(back, TorrentState::Paused);
    }

    #[test]
    fn default_is_searching() {
        assert_eq!(TorrentState::default(), TorrentState::Searching);
        assert!(!TorrentState::Searching.is_downloaded());
        assert!(TorrentState::Completed.is_downloaded());
    }
}
