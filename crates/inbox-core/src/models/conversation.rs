//! Conversation record model

use serde::{Deserialize, Serialize};

/// Locally cached snapshot of one conversation thread.
///
/// The record is a plain value: it performs no validation of its own. The
/// persistence layer ([`crate::db::ConversationRepository`]) and the inbox
/// mapper ([`crate::models::parse_inbox_page`]) are responsible for keeping
/// `unread_count` non-negative and activity timestamps non-decreasing.
///
/// `Default` yields an empty shell meant to be filled field by field:
///
/// ```
/// use inbox_core::ConversationRecord;
///
/// let mut record = ConversationRecord::default();
/// record.conversation_id = "conv-7".to_string();
/// record.unread_count = 5;
/// assert_eq!(record.participant_id, None);
/// assert!(!record.is_muted);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Stable unique identifier (natural key)
    pub conversation_id: String,
    /// The other participant, absent for group or system conversations
    pub participant_id: Option<i64>,
    /// Display name of the conversation or participant
    pub name: Option<String>,
    /// Preview text of the most recent message
    pub last_message: Option<String>,
    /// Number of unread messages
    pub unread_count: i32,
    /// Time of last activity (Unix ms)
    pub last_activity_timestamp: i64,
    /// Notifications suppressed
    pub is_muted: bool,
    /// Pinned to the top of the list
    pub is_pinned: bool,
    /// Marked as favorite
    pub is_favorite: bool,
}

impl ConversationRecord {
    /// Create a record with every field supplied explicitly
    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    #[must_use]
    pub fn new(
        conversation_id: impl Into<String>,
        participant_id: Option<i64>,
        name: Option<String>,
        last_message: Option<String>,
        unread_count: i32,
        last_activity_timestamp: i64,
        is_muted: bool,
        is_pinned: bool,
        is_favorite: bool,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            participant_id,
            name,
            last_message,
            unread_count,
            last_activity_timestamp,
            is_muted,
            is_pinned,
            is_favorite,
        }
    }

    /// Profile ids embedded in a direct conversation id (`"<a>:<b>"`)
    ///
    /// Components that are not integers are skipped.
    #[must_use]
    pub fn profile_ids(&self) -> Vec<i64> {
        self.conversation_id
            .split(':')
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    }

    /// First profile id in the conversation id that is not `my_id`
    #[must_use]
    pub fn other_profile_id(&self, my_id: i64) -> Option<i64> {
        self.profile_ids().into_iter().find(|id| *id != my_id)
    }

    /// Display label, falling back to the participant id and then the conversation id
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.name, self.participant_id) {
            (Some(name), _) if !name.trim().is_empty() => name.trim().to_string(),
            (_, Some(participant_id)) => participant_id.to_string(),
            _ => self.conversation_id.clone(),
        }
    }
}

/// Build the id of a direct conversation between two profiles (smaller id first)
#[must_use]
pub fn direct_conversation_id(a: i64, b: i64) -> String {
    if a <= b {
        format!("{a}:{b}")
    } else {
        format!("{b}:{a}")
    }
}
