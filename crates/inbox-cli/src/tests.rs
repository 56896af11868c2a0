use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;
use inbox_core::db::{ConversationRepository, SqliteConversationRepository, UpsertSummary};
use inbox_core::ConversationRecord;
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

use crate::cli::{Cli, Commands, PutArgs};
use crate::commands::activity::run_activity;
use crate::commands::common::{
    format_conversation_detail, format_conversation_lines, format_markers, format_relative_time,
    format_timestamp, normalize_conversation_id, open_database, resolve_db_path, truncate,
};
use crate::commands::completions::{completion_target, render_completions, run_completions};
use crate::commands::delete::run_delete;
use crate::commands::export::{list_all_conversations, run_export};
use crate::commands::flags::{run_update, ConversationUpdate};
use crate::commands::import::run_import;
use crate::commands::list::list_conversations;
use crate::commands::put::{record_from_args, run_put};
use crate::commands::show::find_conversation;
use crate::error::CliError;

fn temp_db() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("inbox.db");
    (dir, path)
}

fn seed(db_path: &Path, records: &[ConversationRecord]) {
    let db = open_database(db_path).unwrap();
    let repo = SqliteConversationRepository::new(db.connection());
    for record in records {
        repo.upsert(record).unwrap();
    }
}

fn record(id: &str, timestamp: i64) -> ConversationRecord {
    ConversationRecord {
        conversation_id: id.to_string(),
        last_activity_timestamp: timestamp,
        ..ConversationRecord::default()
    }
}

#[test]
fn normalize_conversation_id_trims_and_rejects_blank() {
    assert_eq!(normalize_conversation_id("  1:2 ").unwrap(), "1:2");
    assert!(matches!(
        normalize_conversation_id(" \t "),
        Err(CliError::EmptyConversationId)
    ));
}

#[test]
fn resolve_db_path_prefers_cli_flag() {
    let path = PathBuf::from("/tmp/explicit.db");
    assert_eq!(resolve_db_path(Some(path.clone())).unwrap(), path);
}

#[test]
fn format_relative_time_buckets() {
    let now = 10 * 365 * 24 * 60 * 60 * 1000_i64;
    assert_eq!(format_relative_time(now - 5_000, now), "just now");
    assert_eq!(format_relative_time(now - 5 * 60_000, now), "5m ago");
    assert_eq!(format_relative_time(now - 3 * 3_600_000, now), "3h ago");
    assert_eq!(format_relative_time(now - 2 * 86_400_000, now), "2d ago");
    assert_eq!(format_relative_time(now - 400 * 86_400_000, now), "1y ago");
}

#[test]
fn format_timestamp_renders_utc() {
    assert_eq!(format_timestamp(0), "1970-01-01 00:00:00 UTC");
}

#[test]
fn format_markers_reflect_flags() {
    let mut conversation = record("c1", 0);
    assert_eq!(format_markers(&conversation), "...");

    conversation.is_pinned = true;
    conversation.is_favorite = true;
    assert_eq!(format_markers(&conversation), "P.*");
}

#[test]
fn truncate_collapses_whitespace_and_shortens() {
    assert_eq!(truncate("a  b\nc", 10), "a b c");
    assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
}

#[test]
fn conversation_lines_include_unread_and_preview() {
    let conversation = ConversationRecord {
        name: Some("Alice".to_string()),
        last_message: Some("See you then".to_string()),
        unread_count: 3,
        ..record("1:2", 0)
    };

    let lines = format_conversation_lines(&[conversation]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("1:2"));
    assert!(lines[0].contains("Alice"));
    assert!(lines[0].contains("(3)"));
    assert!(lines[0].contains("See you then"));
}

#[test]
fn conversation_detail_marks_absent_fields() {
    let lines = format_conversation_detail(&record("group-1", 0));
    assert!(lines.iter().any(|line| line == "participant:   -"));
    assert!(lines.iter().any(|line| line == "name:          -"));
}

#[test]
fn put_args_build_full_record() {
    let args = PutArgs {
        id: " conv-42 ".to_string(),
        participant: Some(1001),
        name: Some("Alice".to_string()),
        last_message: Some("See you then".to_string()),
        unread: 3,
        timestamp: Some(1_699_999_999_000),
        muted: false,
        pinned: true,
        favorite: false,
    };

    assert_eq!(
        record_from_args(args).unwrap(),
        ConversationRecord::new(
            "conv-42",
            Some(1001),
            Some("Alice".to_string()),
            Some("See you then".to_string()),
            3,
            1_699_999_999_000,
            false,
            true,
            false,
        )
    );
}

#[test]
fn put_then_show_round_trips() {
    let (_dir, db_path) = temp_db();

    let args = PutArgs {
        id: "group-1".to_string(),
        timestamp: Some(10),
        muted: true,
        ..PutArgs::default()
    };
    run_put(args, &db_path).unwrap();

    let fetched = find_conversation("group-1", &db_path).unwrap();
    assert_eq!(
        fetched,
        ConversationRecord {
            is_muted: true,
            ..record("group-1", 10)
        }
    );
}

#[test]
fn put_rejects_negative_unread() {
    let (_dir, db_path) = temp_db();

    let args = PutArgs {
        id: "c1".to_string(),
        unread: -2,
        timestamp: Some(1),
        ..PutArgs::default()
    };
    assert!(matches!(
        run_put(args, &db_path),
        Err(CliError::Core(inbox_core::Error::InvalidInput(_)))
    ));
}

#[test]
fn put_rejects_missing_activity() {
    let (_dir, db_path) = temp_db();

    let args = PutArgs {
        id: "c1".to_string(),
        timestamp: Some(0),
        ..PutArgs::default()
    };
    assert!(matches!(
        run_put(args, &db_path),
        Err(CliError::Core(inbox_core::Error::InvalidInput(_)))
    ));
}

#[test]
fn import_skips_padded_ids_so_cli_lookups_stay_consistent() {
    let (dir, db_path) = temp_db();
    let page_path = dir.path().join("page.json");
    std::fs::write(
        &page_path,
        r#"{ "conversations": [
            { "data": { "conversationId": " 1:2 ", "lastActivityTimestamp": 200 } },
            { "data": { "conversationId": "1:3", "lastActivityTimestamp": 100 } }
        ] }"#,
    )
    .unwrap();

    let summary = run_import(&page_path, &db_path).unwrap();
    assert_eq!(summary.written, 1);
    assert!(matches!(
        find_conversation(" 1:2 ", &db_path),
        Err(CliError::ConversationNotFound(_))
    ));
    assert_eq!(
        find_conversation(" 1:3 ", &db_path).unwrap().conversation_id,
        "1:3"
    );
}

#[test]
fn import_reads_inbox_page_file() {
    let (dir, db_path) = temp_db();
    let page_path = dir.path().join("page.json");
    std::fs::write(
        &page_path,
        r#"{
          "conversations": [
            { "data": { "conversationId": "1:2", "lastActivityTimestamp": 200,
                        "unreadCount": 2, "participants": [ { "profileId": 2 } ] } },
            { "data": { "conversationId": "1:3", "lastActivityTimestamp": 100 } }
          ]
        }"#,
    )
    .unwrap();

    seed(&db_path, &[record("1:3", 500)]);

    let summary = run_import(&page_path, &db_path).unwrap();
    assert_eq!(
        summary,
        UpsertSummary {
            written: 1,
            stale: 1
        }
    );

    let imported = find_conversation("1:2", &db_path).unwrap();
    assert_eq!(imported.participant_id, Some(2));
    assert_eq!(imported.unread_count, 2);
    assert_eq!(
        find_conversation("1:3", &db_path)
            .unwrap()
            .last_activity_timestamp,
        500
    );
}

#[test]
fn list_filters_by_activity_window() {
    let (_dir, db_path) = temp_db();
    seed(
        &db_path,
        &[record("a", 100), record("b", 200), record("c", 300)],
    );

    let all = list_conversations(10, 0, None, &db_path).unwrap();
    assert_eq!(all.len(), 3);

    let recent = list_conversations(10, 0, Some(200), &db_path).unwrap();
    let ids = recent
        .iter()
        .map(|record| record.conversation_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["c", "b"]);

    let second_page = list_conversations(1, 1, Some(100), &db_path).unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].conversation_id, "b");
}

#[test]
fn activity_then_read_updates_unread() {
    let (_dir, db_path) = temp_db();
    seed(&db_path, &[record("c1", 100)]);

    let active = run_activity("c1", "hello", Some(150), 2, &db_path).unwrap();
    assert_eq!(active.unread_count, 2);
    assert_eq!(active.last_message.as_deref(), Some("hello"));

    let read = run_update("c1", ConversationUpdate::Read, &db_path).unwrap();
    assert_eq!(read.unread_count, 0);
    assert_eq!(read.last_activity_timestamp, 150);
}

#[test]
fn flag_updates_toggle_and_clear() {
    let (_dir, db_path) = temp_db();
    seed(&db_path, &[record("c1", 100)]);

    assert!(run_update("c1", ConversationUpdate::Muted(true), &db_path)
        .unwrap()
        .is_muted);
    assert!(run_update("c1", ConversationUpdate::Pinned(true), &db_path)
        .unwrap()
        .is_pinned);
    assert!(
        run_update("c1", ConversationUpdate::Favorite(true), &db_path)
            .unwrap()
            .is_favorite
    );
    assert!(!run_update("c1", ConversationUpdate::Muted(false), &db_path)
        .unwrap()
        .is_muted);
}

#[test]
fn updates_on_missing_conversation_report_not_found() {
    let (_dir, db_path) = temp_db();

    assert!(matches!(
        run_update("missing", ConversationUpdate::Read, &db_path),
        Err(CliError::ConversationNotFound(id)) if id == "missing"
    ));
    assert!(matches!(
        run_delete("missing", &db_path),
        Err(CliError::ConversationNotFound(_))
    ));
    assert!(matches!(
        find_conversation("missing", &db_path),
        Err(CliError::ConversationNotFound(_))
    ));
}

#[test]
fn delete_removes_conversation() {
    let (_dir, db_path) = temp_db();
    seed(&db_path, &[record("c1", 100)]);

    run_delete("c1", &db_path).unwrap();
    assert!(list_all_conversations(&db_path).unwrap().is_empty());
}

#[test]
fn export_writes_json_file() {
    let (dir, db_path) = temp_db();
    seed(&db_path, &[record("c1", 100), record("c2", 200)]);

    let output = dir.path().join("export.json");
    run_export(Some(&output), &db_path).unwrap();

    let rendered = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(2));
    assert_eq!(value[0]["conversation_id"], "c2");
}

#[test]
fn completions_write_to_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("inbox.bash");

    run_completions(Shell::Bash, Some(&output)).unwrap();

    let script = std::fs::read_to_string(&output).unwrap();
    assert!(script.contains("inbox"));
}

#[test]
fn completions_into_directory_use_conventional_names() {
    let dir = tempdir().unwrap();

    assert_eq!(
        completion_target(Shell::Zsh, dir.path()),
        dir.path().join("_inbox")
    );
    assert_eq!(
        completion_target(Shell::Fish, dir.path()),
        dir.path().join("inbox.fish")
    );

    run_completions(Shell::Bash, Some(dir.path())).unwrap();
    let script = std::fs::read(dir.path().join("inbox.bash")).unwrap();
    assert_eq!(script, render_completions(Shell::Bash));
}

#[test]
fn cli_parses_extra_completion_shells() {
    let cli = Cli::try_parse_from(["inbox", "completions", "powershell"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Completions {
            shell: Shell::PowerShell,
            output: None
        }
    ));
}

#[test]
fn cli_parses_flag_commands() {
    let cli = Cli::try_parse_from(["inbox", "--db-path", "/tmp/x.db", "mute", "1:2", "--off"])
        .unwrap();
    assert_eq!(cli.db_path, Some(PathBuf::from("/tmp/x.db")));
    match cli.command {
        Commands::Mute(args) => {
            assert_eq!(args.id, "1:2");
            assert!(args.off);
        }
        _ => panic!("expected mute command"),
    }
}
