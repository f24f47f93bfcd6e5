//! Wire formats for the persisted records.
//!
//! Reading the todo list goes through an ordered table of decoders. Each one
//! looks at the parsed JSON and either claims it or passes. The first claim
//! wins, so supporting another historical shape means adding a row.

use crate::model::Todo;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STORAGE_VERSION: &str = "1.0";

/// The record written to the `todos` and `todos_backup` slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTodos {
    pub todos: Vec<Todo>,
    pub last_saved: DateTime<Utc>,
    pub version: String,
}

impl SavedTodos {
    pub fn new(todos: Vec<Todo>, last_saved: DateTime<Utc>) -> Self {
        Self {
            todos,
            last_saved,
            version: STORAGE_VERSION.to_string(),
        }
    }
}

pub type TodoDecoder = fn(&Value) -> Option<Vec<Todo>>;

/// Decoders tried in order against a parsed slot.
pub const TODO_DECODERS: &[(&str, TodoDecoder)] = &[
    ("legacy list", decode_legacy_list),
    ("versioned record", decode_versioned_record),
];

/// Parse a raw slot value and run it through [`TODO_DECODERS`].
///
/// Returns None when the text is not JSON or no decoder recognises it.
pub fn decode_todos(raw: &str) -> Option<Vec<Todo>> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored todos are not valid JSON: {}", e);
            return None;
        }
    };

    TODO_DECODERS.iter().find_map(|(name, decode)| {
        let todos = decode(&value)?;
        debug!("Decoded {} todos ({})", todos.len(), name);
        Some(todos)
    })
}

/// Oldest format: the list itself.
pub fn decode_legacy_list(value: &Value) -> Option<Vec<Todo>> {
    let items = value.as_array()?;
    Some(decode_list_logged(items))
}

/// Current format: `{ "todos": [...], "lastSaved": ..., "version": ... }`.
/// Only the list is required.
pub fn decode_versioned_record(value: &Value) -> Option<Vec<Todo>> {
    let items = value.get("todos")?.as_array()?;
    Some(decode_list_logged(items))
}

fn decode_list_logged(items: &[Value]) -> Vec<Todo> {
    let (todos, dropped) = decode_records(items);
    if dropped > 0 {
        warn!("Dropped {} malformed todo record(s)", dropped);
    }
    todos
}

/// Decode each element on its own, skipping the ones that don't fit `T`.
/// Returns the decoded records and how many were skipped.
pub fn decode_records<T: DeserializeOwned>(items: &[Value]) -> (Vec<T>, usize) {
    let mut records = Vec::with_capacity(items.len());
    let mut dropped = 0;
    for item in items {
        match T::deserialize(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!("Skipping malformed record: {}", e);
                dropped += 1;
            }
        }
    }
    (records, dropped)
}
