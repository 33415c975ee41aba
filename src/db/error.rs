//! Errors surfaced by the [`Store`](super::Store).
//!
//! Callers branch on these: a constraint violation is an expected outcome of
//! adding a duplicate, while `Database` means the storage itself failed.

use sea_orm::{ConnAcquireErr, DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique or foreign-key constraint rejected the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error(
        "Invalid state: {0} (expected one of {expected})",
        expected = crate::domain::TorrentState::names()
    )]
    InvalidState(String),

    #[error("Update request must name at least one column")]
    EmptyUpdate,

    #[error("Unknown column '{column}', allowed columns are {allowed:?}")]
    UnknownColumn {
        column: String,
        allowed: &'static [&'static str],
    },

    #[error("Invalid value for column '{column}': {reason}")]
    InvalidValue { column: String, reason: String },

    #[error("Store has been closed")]
    Closed,

    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    #[must_use]
    pub const fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }

    /// True for errors raised before any statement reached storage.
    #[must_use]
    pub const fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::InvalidState(_)
                | Self::EmptyUpdate
                | Self::UnknownColumn { .. }
                | Self::InvalidValue { .. }
        )
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(
                SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg),
            ) => return Self::ConstraintViolation(msg),
            Some(_) | None => {}
        }

        match err {
            DbErr::ConnectionAcquire(ConnAcquireErr::ConnectionClosed) => Self::Closed,
            other => Self::Database(other.to_string()),
        }
    }
}
