use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] inbox_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Conversation ID cannot be empty")]
    EmptyConversationId,
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),
    #[error("Could not resolve a data directory; pass --db-path or set INBOX_DB_PATH")]
    NoDataDir,
}
