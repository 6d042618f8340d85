//! Error types.
//!
//! Searches themselves never fail: a query that matches nothing is an empty
//! result. Errors come from bad arguments (an unknown strategy tag), catalog
//! bookkeeping, and loading catalogs from disk.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for the library and CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller passed something the API does not accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A catalog operation was rejected.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejections from [`Library`](crate::Library) bookkeeping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("record {isbn} already exists")]
    DuplicateRecord { isbn: String },

    #[error("user {user_id} already registered")]
    DuplicateUser { user_id: String },

    #[error("no record with isbn {isbn}")]
    UnknownRecord { isbn: String },

    #[error("no user with id {user_id}")]
    UnknownUser { user_id: String },

    #[error("record {isbn} is already borrowed")]
    Unavailable { isbn: String },

    #[error("user {user_id} has not borrowed {isbn}")]
    NotBorrowed { user_id: String, isbn: String },

    /// The record cannot be identified (blank isbn).
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },
}
