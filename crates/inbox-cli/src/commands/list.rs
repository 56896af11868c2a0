use std::path::Path;

use inbox_core::db::{ConversationRepository, SqliteConversationRepository};
use inbox_core::ConversationRecord;

use crate::commands::common::{
    conversation_to_list_item, format_conversation_lines, open_database, ConversationListItem,
};
use crate::error::CliError;

pub fn list_conversations(
    limit: usize,
    offset: usize,
    since: Option<i64>,
    db_path: &Path,
) -> Result<Vec<ConversationRecord>, CliError> {
    let db = open_database(db_path)?;
    let repo = SqliteConversationRepository::new(db.connection());

    let records = match since {
        Some(since) => repo.list_active_since(since, limit, offset)?,
        None => repo.list(limit, offset)?,
    };
    Ok(records)
}

pub fn run_list(
    limit: usize,
    offset: usize,
    since: Option<i64>,
    as_json: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let records = list_conversations(limit, offset, since, db_path)?;

    if as_json {
        let json_items = records
            .iter()
            .map(conversation_to_list_item)
            .collect::<Vec<ConversationListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_conversation_lines(&records) {
            println!("{line}");
        }
    }

    Ok(())
}
