use std::path::Path;

use inbox_core::db::{ConversationRepository, SqliteConversationRepository};
use inbox_core::ConversationRecord;

use crate::commands::common::{
    normalize_conversation_id, not_found_as_cli, now_ms, open_database,
};
use crate::error::CliError;

pub fn run_activity(
    id: &str,
    message: &str,
    timestamp: Option<i64>,
    unread: i32,
    db_path: &Path,
) -> Result<ConversationRecord, CliError> {
    let conversation_id = normalize_conversation_id(id)?;
    let db = open_database(db_path)?;
    let repo = SqliteConversationRepository::new(db.connection());

    let record = repo
        .record_activity(
            &conversation_id,
            message,
            timestamp.unwrap_or_else(now_ms),
            unread,
        )
        .map_err(not_found_as_cli)?;

    println!("{} ({} unread)", record.conversation_id, record.unread_count);
    Ok(record)
}
