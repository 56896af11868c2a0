use std::path::Path;

use inbox_core::db::{ConversationRepository, SqliteConversationRepository, UpsertSummary};
use inbox_core::models::{activity_floor, parse_inbox_page};

use crate::commands::common::{open_database, read_source};
use crate::error::CliError;

pub fn run_import(source: &Path, db_path: &Path) -> Result<UpsertSummary, CliError> {
    let payload = read_source(source)?;
    let records = parse_inbox_page(&payload)?;

    let db = open_database(db_path)?;
    let repo = SqliteConversationRepository::new(db.connection());
    let summary = repo.upsert_many(&records)?;

    if let Some(floor) = activity_floor(&records) {
        tracing::info!(
            "Imported page covering activity since {floor}: {} written, {} stale",
            summary.written,
            summary.stale
        );
    }

    println!("{} written, {} stale", summary.written, summary.stale);
    Ok(summary)
}
