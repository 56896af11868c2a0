//! Mapping from upstream inbox pages to conversation records

use serde::Deserialize;
use serde_json::Value;

use crate::db::validate_record;
use crate::error::{Error, Result};
use crate::models::ConversationRecord;

#[derive(Debug, Deserialize)]
struct InboxConversation {
    data: ConversationData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversationData {
    conversation_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    unread_count: Option<i64>,
    last_activity_timestamp: i64,
    #[serde(default)]
    is_muted: Option<bool>,
    #[serde(default)]
    is_pinned: Option<bool>,
    #[serde(default)]
    is_favorite: Option<bool>,
    #[serde(default)]
    preview: Option<ConversationPreview>,
    #[serde(default)]
    participants: Option<Vec<Participant>>,
}

#[derive(Debug, Deserialize)]
struct ConversationPreview {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Participant {
    #[serde(default)]
    profile_id: Option<i64>,
}

/// Parse an inbox page payload into conversation records.
///
/// Entries are mapped independently: one that fails to decode or would not
/// pass [`validate_record`] is logged and skipped. That covers blank or
/// whitespace-padded ids and non-positive activity timestamps, so every
/// returned record can be stored as is. A page without a `conversations` key
/// maps to an empty list.
///
/// A missing `name` stays `None`; callers that need a label use
/// [`ConversationRecord::display_name`], which falls back to the participant
/// and then the conversation id.
pub fn parse_inbox_page(payload: &str) -> Result<Vec<ConversationRecord>> {
    let page: Value = serde_json::from_str(payload)?;
    let Value::Object(mut page) = page else {
        return Err(Error::InvalidInput(
            "inbox page must be a JSON object".into(),
        ));
    };

    let entries = match page.remove("conversations") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(Error::InvalidInput(
                "inbox page field 'conversations' must be an array".into(),
            ))
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<InboxConversation>(entry) {
            Ok(conversation) => {
                let record = to_record(conversation.data);
                match validate_record(&record) {
                    Ok(()) => records.push(record),
                    Err(error) => tracing::warn!("Skipping inbox entry {index}: {error}"),
                }
            }
            Err(error) => {
                tracing::warn!("Skipping inbox entry {index}: {error}");
            }
        }
    }

    tracing::debug!("Mapped {} inbox entries", records.len());
    Ok(records)
}

/// Oldest activity timestamp in a page, the lower bound of the window it covers
pub fn activity_floor(records: &[ConversationRecord]) -> Option<i64> {
    records
        .iter()
        .map(|record| record.last_activity_timestamp)
        .min()
}

fn to_record(data: ConversationData) -> ConversationRecord {
    let raw_unread = data.unread_count.unwrap_or(0);
    let unread_count = i32::try_from(raw_unread.max(0)).unwrap_or(i32::MAX);
    if i64::from(unread_count) != raw_unread {
        tracing::warn!(
            "Clamping unread count {raw_unread} to {unread_count} for conversation {}",
            data.conversation_id
        );
    }

    let participant_id = data
        .participants
        .and_then(|participants| participants.into_iter().next())
        .and_then(|participant| participant.profile_id);

    ConversationRecord {
        conversation_id: data.conversation_id,
        participant_id,
        name: data.name,
        last_message: data.preview.and_then(|preview| preview.text),
        unread_count,
        last_activity_timestamp: data.last_activity_timestamp,
        is_muted: data.is_muted.unwrap_or(false),
        is_pinned: data.is_pinned.unwrap_or(false),
        is_favorite: data.is_favorite.unwrap_or(false),
    }
}
