//! inbox-core - Core library for inbox
//!
//! This crate contains the conversation record model, the mapping from
//! upstream inbox pages, and the SQLite persistence layer used by the
//! `inbox` CLI.

pub mod db;
pub mod error;
pub mod export;
pub mod models;

pub use error::{Error, Result};
pub use models::ConversationRecord;
