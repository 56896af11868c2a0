//! Error types for inbox-core

use thiserror::Error;

/// Result type alias using inbox-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in inbox-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// `SQLite` error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Conversation not found
    #[error("Conversation not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Write carried an older activity timestamp than the stored row
    #[error(
        "Stale update for conversation {conversation_id}: stored activity {stored} is newer than {incoming}"
    )]
    StaleUpdate {
        conversation_id: String,
        stored: i64,
        incoming: i64,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
