//! Conversation repository implementation

#![allow(clippy::cast_possible_wrap)] // SQLite uses i64 for LIMIT/OFFSET

use crate::error::{Error, Result};
use crate::models::ConversationRecord;
use rusqlite::{params, Connection, OptionalExtension};

const COLUMNS: &str = "conversation_id, participant_id, name, last_message, unread_count,
     last_activity_timestamp, is_muted, is_pinned, is_favorite";

/// Outcome of a batch upsert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    /// Records inserted or updated
    pub written: usize,
    /// Records skipped because the stored row had newer activity
    pub stale: usize,
}

/// Trait for conversation storage operations
pub trait ConversationRepository {
    /// Insert a record or replace every field of the stored one
    fn upsert(&self, record: &ConversationRecord) -> Result<()>;

    /// Upsert a page of records in one transaction, skipping stale ones
    fn upsert_many(&self, records: &[ConversationRecord]) -> Result<UpsertSummary>;

    /// Get a record by conversation ID
    fn get(&self, conversation_id: &str) -> Result<Option<ConversationRecord>>;

    /// List records, pinned first and then most recent activity first
    fn list(&self, limit: usize, offset: usize) -> Result<Vec<ConversationRecord>>;

    /// List a page of records with activity at or after `timestamp`.
    ///
    /// Ordered by activity alone, newest first; pinned records get no priority.
    fn list_active_since(
        &self,
        timestamp: i64,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ConversationRecord>>;

    /// List records for one participant, newest first
    fn list_by_participant(&self, participant_id: i64) -> Result<Vec<ConversationRecord>>;

    /// Apply a new message: preview, activity time, and unread increment
    fn record_activity(
        &self,
        conversation_id: &str,
        last_message: &str,
        timestamp: i64,
        unread_delta: i32,
    ) -> Result<ConversationRecord>;

    /// Reset the unread count
    fn mark_read(&self, conversation_id: &str) -> Result<ConversationRecord>;

    /// Toggle notification muting
    fn set_muted(&self, conversation_id: &str, muted: bool) -> Result<ConversationRecord>;

    /// Toggle pinning
    fn set_pinned(&self, conversation_id: &str, pinned: bool) -> Result<ConversationRecord>;

    /// Toggle favorite
    fn set_favorite(&self, conversation_id: &str, favorite: bool) -> Result<ConversationRecord>;

    /// Remove a record
    fn delete(&self, conversation_id: &str) -> Result<()>;

    /// Number of stored records
    fn count(&self) -> Result<usize>;
}

/// Check the invariants the record itself does not enforce.
///
/// Ids are natural keys and are stored exactly as given, so surrounding
/// whitespace is rejected rather than trimmed. A record must carry activity:
/// `last_activity_timestamp` has to be positive epoch milliseconds.
pub fn validate_record(record: &ConversationRecord) -> Result<()> {
    let id = record.conversation_id.as_str();
    if id.trim().is_empty() {
        return Err(Error::InvalidInput(
            "conversation_id must not be empty".into(),
        ));
    }
    if id.trim() != id {
        return Err(Error::InvalidInput(format!(
            "conversation_id {id:?} must not have surrounding whitespace"
        )));
    }
    if record.last_activity_timestamp <= 0 {
        return Err(Error::InvalidInput(format!(
            "last_activity_timestamp must be positive (got {}) for conversation {id}",
            record.last_activity_timestamp
        )));
    }
    if record.unread_count < 0 {
        return Err(Error::InvalidInput(format!(
            "unread_count must not be negative (got {}) for conversation {}",
            record.unread_count, record.conversation_id
        )));
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Flag {
    Muted,
    Pinned,
    Favorite,
}

impl Flag {
    const fn column(self) -> &'static str {
        match self {
            Self::Muted => "is_muted",
            Self::Pinned => "is_pinned",
            Self::Favorite => "is_favorite",
        }
    }
}

/// `SQLite` implementation of `ConversationRepository`
pub struct SqliteConversationRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteConversationRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Write one validated record; returns `false` when the stored row is newer
    fn write_record(conn: &Connection, record: &ConversationRecord) -> Result<bool> {
        let rows = conn.execute(
            "INSERT INTO chat_conversations (
                conversation_id, participant_id, name, last_message, unread_count,
                last_activity_timestamp, is_muted, is_pinned, is_favorite
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(conversation_id) DO UPDATE SET
                participant_id = excluded.participant_id,
                name = excluded.name,
                last_message = excluded.last_message,
                unread_count = excluded.unread_count,
                last_activity_timestamp = excluded.last_activity_timestamp,
                is_muted = excluded.is_muted,
                is_pinned = excluded.is_pinned,
                is_favorite = excluded.is_favorite
             WHERE excluded.last_activity_timestamp >= chat_conversations.last_activity_timestamp",
            params![
                record.conversation_id,
                record.participant_id,
                record.name,
                record.last_message,
                record.unread_count,
                record.last_activity_timestamp,
                i32::from(record.is_muted),
                i32::from(record.is_pinned),
                i32::from(record.is_favorite)
            ],
        )?;

        Ok(rows > 0)
    }

    fn stored_timestamp(&self, conversation_id: &str) -> Result<Option<i64>> {
        Ok(self
            .conn
            .query_row(
                "SELECT last_activity_timestamp FROM chat_conversations WHERE conversation_id = ?",
                params![conversation_id],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn require(&self, conversation_id: &str) -> Result<ConversationRecord> {
        self.get(conversation_id)?
            .ok_or_else(|| Error::NotFound(conversation_id.to_string()))
    }

    fn set_flag(
        &self,
        conversation_id: &str,
        flag: Flag,
        value: bool,
    ) -> Result<ConversationRecord> {
        let sql = format!(
            "UPDATE chat_conversations SET {} = ? WHERE conversation_id = ?",
            flag.column()
        );
        let rows = self
            .conn
            .execute(&sql, params![i32::from(value), conversation_id])?;

        if rows == 0 {
            return Err(Error::NotFound(conversation_id.to_string()));
        }

        tracing::debug!("Set {} = {value} on {conversation_id}", flag.column());
        self.require(conversation_id)
    }

    fn query_records(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<ConversationRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let records = stmt
            .query_map(params, Self::parse_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Parse a record from a database row
    fn parse_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ConversationRecord> {
        Ok(ConversationRecord {
            conversation_id: row.get(0)?,
            participant_id: row.get(1)?,
            name: row.get(2)?,
            last_message: row.get(3)?,
            unread_count: row.get(4)?,
            last_activity_timestamp: row.get(5)?,
            is_muted: row.get::<_, i32>(6)? != 0,
            is_pinned: row.get::<_, i32>(7)? != 0,
            is_favorite: row.get::<_, i32>(8)? != 0,
        })
    }
}

impl ConversationRepository for SqliteConversationRepository<'_> {
    fn upsert(&self, record: &ConversationRecord) -> Result<()> {
        validate_record(record)?;

        if Self::write_record(self.conn, record)? {
            tracing::debug!("Upserted conversation {}", record.conversation_id);
            return Ok(());
        }

        let stored = self
            .stored_timestamp(&record.conversation_id)?
            .unwrap_or(record.last_activity_timestamp);
        tracing::warn!(
            "Rejected stale update for conversation {} ({} < {stored})",
            record.conversation_id,
            record.last_activity_timestamp
        );
        Err(Error::StaleUpdate {
            conversation_id: record.conversation_id.clone(),
            stored,
            incoming: record.last_activity_timestamp,
        })
    }

    fn upsert_many(&self, records: &[ConversationRecord]) -> Result<UpsertSummary> {
        for record in records {
            validate_record(record)?;
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut summary = UpsertSummary::default();
        for record in records {
            if Self::write_record(&tx, record)? {
                summary.written += 1;
            } else {
                tracing::warn!(
                    "Skipping stale update for conversation {}",
                    record.conversation_id
                );
                summary.stale += 1;
            }
        }
        tx.commit()?;

        tracing::debug!(
            "Upserted {} conversations ({} stale)",
            summary.written,
            summary.stale
        );
        Ok(summary)
    }

    fn get(&self, conversation_id: &str) -> Result<Option<ConversationRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM chat_conversations WHERE conversation_id = ?");
        Ok(self
            .conn
            .query_row(&sql, params![conversation_id], Self::parse_record)
            .optional()?)
    }

    fn list(&self, limit: usize, offset: usize) -> Result<Vec<ConversationRecord>> {
        let sql = format!(
            "SELECT {COLUMNS}
             FROM chat_conversations
             ORDER BY is_pinned DESC, last_activity_timestamp DESC, conversation_id ASC
             LIMIT ? OFFSET ?"
        );
        self.query_records(&sql, params![limit as i64, offset as i64])
    }

    fn list_active_since(
        &self,
        timestamp: i64,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ConversationRecord>> {
        let sql = format!(
            "SELECT {COLUMNS}
             FROM chat_conversations
             WHERE last_activity_timestamp >= ?
             ORDER BY last_activity_timestamp DESC, conversation_id ASC
             LIMIT ? OFFSET ?"
        );
        self.query_records(&sql, params![timestamp, limit as i64, offset as i64])
    }

    fn list_by_participant(&self, participant_id: i64) -> Result<Vec<ConversationRecord>> {
        let sql = format!(
            "SELECT {COLUMNS}
             FROM chat_conversations
             WHERE participant_id = ?
             ORDER BY last_activity_timestamp DESC, conversation_id ASC"
        );
        self.query_records(&sql, params![participant_id])
    }

    fn record_activity(
        &self,
        conversation_id: &str,
        last_message: &str,
        timestamp: i64,
        unread_delta: i32,
    ) -> Result<ConversationRecord> {
        if unread_delta < 0 {
            return Err(Error::InvalidInput(format!(
                "unread increment must not be negative (got {unread_delta})"
            )));
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut record = self.require(conversation_id)?;

        if timestamp < record.last_activity_timestamp {
            return Err(Error::StaleUpdate {
                conversation_id: conversation_id.to_string(),
                stored: record.last_activity_timestamp,
                incoming: timestamp,
            });
        }

        record.last_message = Some(last_message.to_string());
        record.last_activity_timestamp = timestamp;
        record.unread_count = record.unread_count.saturating_add(unread_delta);

        tx.execute(
            "UPDATE chat_conversations
             SET last_message = ?, last_activity_timestamp = ?, unread_count = ?
             WHERE conversation_id = ?",
            params![
                record.last_message,
                record.last_activity_timestamp,
                record.unread_count,
                conversation_id
            ],
        )?;
        tx.commit()?;

        tracing::debug!("Recorded activity on {conversation_id} at {timestamp}");
        Ok(record)
    }

    fn mark_read(&self, conversation_id: &str) -> Result<ConversationRecord> {
        let rows = self.conn.execute(
            "UPDATE chat_conversations SET unread_count = 0 WHERE conversation_id = ?",
            params![conversation_id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(conversation_id.to_string()));
        }

        self.require(conversation_id)
    }

    fn set_muted(&self, conversation_id: &str, muted: bool) -> Result<ConversationRecord> {
        self.set_flag(conversation_id, Flag::Muted, muted)
    }

    fn set_pinned(&self, conversation_id: &str, pinned: bool) -> Result<ConversationRecord> {
        self.set_flag(conversation_id, Flag::Pinned, pinned)
    }

    fn set_favorite(&self, conversation_id: &str, favorite: bool) -> Result<ConversationRecord> {
        self.set_flag(conversation_id, Flag::Favorite, favorite)
    }

    fn delete(&self, conversation_id: &str) -> Result<()> {
        let rows = self.conn.execute(
            "DELETE FROM chat_conversations WHERE conversation_id = ?",
            params![conversation_id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(conversation_id.to_string()));
        }

        tracing::debug!("Deleted conversation {conversation_id}");
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM chat_conversations", [], |row| {
                row.get::<_, usize>(0)
            })?)
    }
}
