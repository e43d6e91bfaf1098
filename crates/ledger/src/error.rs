//! The module contains the errors the ledger can throw.
//!
//! - [`Validation`] is returned before any storage access when a candidate
//!   record breaks a field rule.
//! - [`NotFound`] is returned when a targeted row does not exist.
//! - [`Conflict`] is returned when the unique mirror linkage on
//!   `material_stock_id` would be violated.
//!
//! [`Validation`]: LedgerError::Validation
//! [`NotFound`]: LedgerError::NotFound
//! [`Conflict`]: LedgerError::Conflict
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for LedgerError {
    /// Classifies a database failure.
    ///
    /// Unique-constraint violations come from the index on
    /// `material_stock_id` and are reported as a distinct conflict instead of
    /// a generic database error.
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(
                "a cashflow entry for this material stock already exists".to_string(),
            ),
            _ => Self::Database(err),
        }
    }
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
