use std::path::Path;

use inbox_core::db::{ConversationRepository, SqliteConversationRepository};
use inbox_core::ConversationRecord;

use crate::commands::common::{normalize_conversation_id, not_found_as_cli, open_database};
use crate::error::CliError;

/// Per-conversation state a user can change without new activity
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConversationUpdate {
    Read,
    Muted(bool),
    Pinned(bool),
    Favorite(bool),
}

pub fn run_update(
    id: &str,
    update: ConversationUpdate,
    db_path: &Path,
) -> Result<ConversationRecord, CliError> {
    let conversation_id = normalize_conversation_id(id)?;
    let db = open_database(db_path)?;
    let repo = SqliteConversationRepository::new(db.connection());

    let record = match update {
        ConversationUpdate::Read => repo.mark_read(&conversation_id),
        ConversationUpdate::Muted(value) => repo.set_muted(&conversation_id, value),
        ConversationUpdate::Pinned(value) => repo.set_pinned(&conversation_id, value),
        ConversationUpdate::Favorite(value) => repo.set_favorite(&conversation_id, value),
    }
    .map_err(not_found_as_cli)?;

    println!("{}", record.conversation_id);
    Ok(record)
}
