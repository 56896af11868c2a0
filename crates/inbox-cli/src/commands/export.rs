use std::path::Path;

use inbox_core::db::{ConversationRepository, SqliteConversationRepository};
use inbox_core::export::render_json_export;
use inbox_core::ConversationRecord;

use crate::commands::common::open_database;
use crate::error::CliError;

pub fn list_all_conversations(db_path: &Path) -> Result<Vec<ConversationRecord>, CliError> {
    const PAGE_SIZE: usize = 500;

    let db = open_database(db_path)?;
    let repo = SqliteConversationRepository::new(db.connection());

    let mut records = Vec::new();
    let mut offset = 0usize;

    loop {
        let batch = repo.list(PAGE_SIZE, offset)?;
        let count = batch.len();
        records.extend(batch);

        if count < PAGE_SIZE {
            break;
        }
        offset += count;
    }

    Ok(records)
}

pub fn run_export(output_path: Option<&Path>, db_path: &Path) -> Result<(), CliError> {
    let records = list_all_conversations(db_path)?;
    let rendered = render_json_export(&records)?;

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
