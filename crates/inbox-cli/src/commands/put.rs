use std::path::Path;

use inbox_core::db::{ConversationRepository, SqliteConversationRepository};
use inbox_core::ConversationRecord;

use crate::cli::PutArgs;
use crate::commands::common::{normalize_conversation_id, now_ms, open_database};
use crate::error::CliError;

pub fn record_from_args(args: PutArgs) -> Result<ConversationRecord, CliError> {
    Ok(ConversationRecord::new(
        normalize_conversation_id(&args.id)?,
        args.participant,
        args.name,
        args.last_message,
        args.unread,
        args.timestamp.unwrap_or_else(now_ms),
        args.muted,
        args.pinned,
        args.favorite,
    ))
}

pub fn run_put(args: PutArgs, db_path: &Path) -> Result<(), CliError> {
    let record = record_from_args(args)?;

    let db = open_database(db_path)?;
    let repo = SqliteConversationRepository::new(db.connection());
    repo.upsert(&record)?;

    println!("{}", record.conversation_id);
    Ok(())
}
