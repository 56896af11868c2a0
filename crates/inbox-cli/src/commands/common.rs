use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::Utc;
use inbox_core::db::Database;
use inbox_core::ConversationRecord;
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ConversationListItem {
    #[serde(flatten)]
    pub record: ConversationRecord,
    pub display_name: String,
    pub relative_time: String,
}

pub fn conversation_to_list_item(record: &ConversationRecord) -> ConversationListItem {
    let now_ms = Utc::now().timestamp_millis();
    ConversationListItem {
        record: record.clone(),
        display_name: record.display_name(),
        relative_time: format_relative_time(record.last_activity_timestamp, now_ms),
    }
}

pub fn format_conversation_lines(records: &[ConversationRecord]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    records
        .iter()
        .map(|record| {
            let markers = format_markers(record);
            let name = truncate(&record.display_name(), 20);
            let preview = truncate(record.last_message.as_deref().unwrap_or(""), 40);
            let relative_time = format_relative_time(record.last_activity_timestamp, now_ms);
            let unread = if record.unread_count > 0 {
                format!("({})", record.unread_count)
            } else {
                String::new()
            };

            format!(
                "{markers} {id:<24}  {name:<20}  {unread:>5}  {preview:<40}  {relative_time}",
                id = record.conversation_id
            )
        })
        .collect()
}

pub fn format_conversation_detail(record: &ConversationRecord) -> Vec<String> {
    let optional = |value: Option<&str>| value.map_or_else(|| "-".to_string(), str::to_string);

    vec![
        format!("id:            {}", record.conversation_id),
        format!(
            "participant:   {}",
            record
                .participant_id
                .map_or_else(|| "-".to_string(), |id| id.to_string())
        ),
        format!("name:          {}", optional(record.name.as_deref())),
        format!("last message:  {}", optional(record.last_message.as_deref())),
        format!("unread:        {}", record.unread_count),
        format!(
            "last activity: {}",
            format_timestamp(record.last_activity_timestamp)
        ),
        format!("muted:         {}", record.is_muted),
        format!("pinned:        {}", record.is_pinned),
        format!("favorite:      {}", record.is_favorite),
    ]
}

/// Three-column marker block: pinned, muted, favorite
pub fn format_markers(record: &ConversationRecord) -> String {
    [
        (record.is_pinned, 'P'),
        (record.is_muted, 'M'),
        (record.is_favorite, '*'),
    ]
    .iter()
    .map(|(set, marker)| if *set { *marker } else { '.' })
    .collect()
}

pub fn truncate(value: &str, max_chars: usize) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn normalize_conversation_id(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyConversationId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Map a core "not found" into the CLI's user-facing variant
pub fn not_found_as_cli(error: inbox_core::Error) -> CliError {
    match error {
        inbox_core::Error::NotFound(id) => CliError::ConversationNotFound(id),
        other => CliError::Core(other),
    }
}

/// Read a payload from a file path, or stdin when the path is `-`
pub fn read_source(source: &Path) -> Result<String, CliError> {
    if source == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().lock().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    Ok(std::fs::read_to_string(source)?)
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_db_path.or_else(|| env::var_os("INBOX_DB_PATH").map(PathBuf::from)) {
        return Ok(path);
    }
    default_db_path()
}

pub fn default_db_path() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("inbox").join("inbox.db"))
        .ok_or(CliError::NoDataDir)
}

pub fn open_database(path: &Path) -> Result<Database, CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(Database::open(path)?)
}
