//! Blog domain operations.
//!
//! Each submodule exposes the callable operations the HTTP layer translates
//! into responses. Mutating operations return the notification intents they
//! produced so the caller can dispatch them after the transaction commits;
//! nothing in this module sends mail.

pub mod accounts;
pub mod comments;
pub mod posts;
pub mod reactions;
pub mod reports;

use sea_orm::DbErr;

/// Typed failures surfaced to the HTTP layer.
///
/// A missing row and a row the viewer may not see are deliberately the same
/// variant so responses cannot leak the existence of unapproved content.
#[derive(Debug)]
pub enum BlogError {
    NotFoundOrInvisible,
    Forbidden(&'static str),
    InvalidChoice(&'static str),
    ValidationFailed(String),
    Database(DbErr),
}

impl std::fmt::Display for BlogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlogError::NotFoundOrInvisible => write!(f, "Not found"),
            BlogError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            BlogError::InvalidChoice(what) => write!(f, "Invalid choice: {}", what),
            BlogError::ValidationFailed(msg) => write!(f, "Validation failed: {}", msg),
            BlogError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for BlogError {}

impl From<DbErr> for BlogError {
    fn from(e: DbErr) -> Self {
        BlogError::Database(e)
    }
}

/// Whether a database error is a composite-unique-constraint violation.
///
/// Concurrent duplicate inserts on (target, user) pairs resolve through the
/// database's uniqueness guarantee; callers catch this and take the
/// idempotent path instead of surfacing a hard error.
pub(crate) fn is_unique_violation(e: &DbErr) -> bool {
    let msg = e.to_string().to_lowercase();
    msg.contains("unique") || msg.contains("duplicate")
}
