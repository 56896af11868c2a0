use std::path::Path;

use inbox_core::db::{ConversationRepository, SqliteConversationRepository};

use crate::commands::common::{normalize_conversation_id, not_found_as_cli, open_database};
use crate::error::CliError;

pub fn run_delete(id: &str, db_path: &Path) -> Result<(), CliError> {
    let conversation_id = normalize_conversation_id(id)?;
    let db = open_database(db_path)?;
    let repo = SqliteConversationRepository::new(db.connection());

    repo.delete(&conversation_id).map_err(not_found_as_cli)?;
    println!("{conversation_id}");
    Ok(())
}
