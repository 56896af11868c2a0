use std::path::Path;

use inbox_core::db::{ConversationRepository, SqliteConversationRepository};
use inbox_core::ConversationRecord;

use crate::commands::common::{
    conversation_to_list_item, format_conversation_detail, normalize_conversation_id,
    open_database,
};
use crate::error::CliError;

pub fn find_conversation(id: &str, db_path: &Path) -> Result<ConversationRecord, CliError> {
    let conversation_id = normalize_conversation_id(id)?;
    let db = open_database(db_path)?;
    let repo = SqliteConversationRepository::new(db.connection());

    repo.get(&conversation_id)?
        .ok_or(CliError::ConversationNotFound(conversation_id))
}

pub fn run_show(id: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let record = find_conversation(id, db_path)?;

    if as_json {
        let item = conversation_to_list_item(&record);
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        for line in format_conversation_detail(&record) {
            println!("{line}");
        }
    }

    Ok(())
}
