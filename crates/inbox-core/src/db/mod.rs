//! Database layer for inbox

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{
    validate_record, ConversationRepository, SqliteConversationRepository, UpsertSummary,
};
