//! Conversation export helpers.

use serde::{Deserialize, Serialize};

use crate::ConversationRecord;

/// Serializable conversation representation used in JSON exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConversation {
    #[serde(flatten)]
    pub record: ConversationRecord,
    pub last_activity_iso: Option<String>,
}

/// Convert a record into an export item with an ISO-8601 activity time.
#[must_use]
pub fn conversation_to_export_item(record: &ConversationRecord) -> ExportConversation {
    ExportConversation {
        record: record.clone(),
        last_activity_iso: chrono::DateTime::from_timestamp_millis(record.last_activity_timestamp)
            .map(|date_time| date_time.to_rfc3339()),
    }
}

/// Render conversations as pretty-printed JSON.
pub fn render_json_export(records: &[ConversationRecord]) -> serde_json::Result<String> {
    let items = records
        .iter()
        .map(conversation_to_export_item)
        .collect::<Vec<ExportConversation>>();
    serde_json::to_string_pretty(&items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_export_includes_every_field() {
        let record = ConversationRecord::new(
            "conv-42",
            None,
            Some("Alice".to_string()),
            None,
            3,
            0,
            true,
            false,
            true,
        );

        let rendered = render_json_export(&[record]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let item = &value[0];

        assert_eq!(item["conversation_id"], "conv-42");
        assert!(item["participant_id"].is_null());
        assert_eq!(item["name"], "Alice");
        assert!(item["last_message"].is_null());
        assert_eq!(item["unread_count"], 3);
        assert_eq!(item["is_muted"], true);
        assert_eq!(item["is_favorite"], true);
        assert_eq!(item["last_activity_iso"], "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn json_export_round_trips_records() {
        let record = ConversationRecord {
            conversation_id: "1:2".to_string(),
            participant_id: Some(0),
            last_activity_timestamp: 1_699_999_999_000,
            ..ConversationRecord::default()
        };

        let rendered = render_json_export(std::slice::from_ref(&record)).unwrap();
        let parsed: Vec<ExportConversation> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0].record, record);
    }

    #[test]
    fn json_export_empty_is_empty_array() {
        assert_eq!(render_json_export(&[]).unwrap(), "[]");
    }
}
