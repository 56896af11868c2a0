use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "inbox")]
#[command(about = "Inspect and maintain the local conversation cache")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import an inbox page (JSON) from a file, or stdin with `-`
    Import {
        /// Path to the inbox page payload
        source: PathBuf,
    },
    /// Insert or replace a conversation with every field given explicitly
    Put(PutArgs),
    /// List cached conversations
    #[command(alias = "ls")]
    List {
        /// Number of conversations to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Number of conversations to skip
        #[arg(long, default_value = "0")]
        offset: usize,
        /// Only conversations active at or after this time (Unix ms),
        /// ordered by activity with no pinned-first grouping
        #[arg(long, value_name = "MS")]
        since: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one conversation
    Show {
        /// Conversation ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record a new message on a conversation
    Activity {
        /// Conversation ID
        id: String,
        /// Preview text of the new message
        message: String,
        /// Activity time (Unix ms), defaults to now
        #[arg(long, value_name = "MS")]
        timestamp: Option<i64>,
        /// Number of new unread messages
        #[arg(long, default_value = "1")]
        unread: i32,
    },
    /// Mark a conversation as read
    Read {
        /// Conversation ID
        id: String,
    },
    /// Mute a conversation
    Mute(FlagArgs),
    /// Pin a conversation
    Pin(FlagArgs),
    /// Mark a conversation as favorite
    Favorite(FlagArgs),
    /// Delete a conversation
    Delete {
        /// Conversation ID
        id: String,
    },
    /// Export conversations as JSON
    Export {
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Output file, or a directory to receive the shell's conventional
        /// file name (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PutArgs {
    /// Conversation ID
    #[arg(long)]
    pub id: String,
    /// Other participant's profile ID
    #[arg(long, value_name = "ID")]
    pub participant: Option<i64>,
    /// Display name
    #[arg(long)]
    pub name: Option<String>,
    /// Preview of the most recent message
    #[arg(long)]
    pub last_message: Option<String>,
    /// Unread message count
    #[arg(long, default_value = "0")]
    pub unread: i32,
    /// Activity time (Unix ms), defaults to now
    #[arg(long, value_name = "MS")]
    pub timestamp: Option<i64>,
    /// Suppress notifications
    #[arg(long)]
    pub muted: bool,
    /// Pin to the top of the list
    #[arg(long)]
    pub pinned: bool,
    /// Mark as favorite
    #[arg(long)]
    pub favorite: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct FlagArgs {
    /// Conversation ID
    pub id: String,
    /// Clear the flag instead of setting it
    #[arg(long)]
    pub off: bool,
}
