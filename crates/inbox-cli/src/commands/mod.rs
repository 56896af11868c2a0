pub mod activity;
pub mod common;
pub mod completions;
pub mod delete;
pub mod export;
pub mod flags;
pub mod import;
pub mod list;
pub mod put;
pub mod show;
