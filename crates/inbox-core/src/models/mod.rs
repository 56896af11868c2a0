//! Data models for inbox

mod conversation;
mod inbox;

pub use conversation::{direct_conversation_id, ConversationRecord};
pub use inbox::{activity_floor, parse_inbox_page};
