//! # Display Indexes
//!
//! Ids are millisecond timestamps, which nobody wants to type. Clients
//! address records by position instead:
//!
//! - `1`, `2`, `3`: live todos, in list order
//! - `d1`, `d2`: recently deleted entries, most recent first
//!
//! Indexes are assigned over the *whole* list before any filter is applied,
//! so `3` names the same todo whether the active or the completed view is
//! showing. The command layer resolves an index to a stable `id` before
//! touching a store.

use crate::model::{DeletedTodo, Todo};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A user-facing index for a todo or trash entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayIndex {
    Regular(usize),
    Deleted(usize),
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayIndex::Regular(i) => write!(f, "{}", i),
            DisplayIndex::Deleted(i) => write!(f, "d{}", i),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTodo {
    pub todo: Todo,
    pub index: DisplayIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDeleted {
    pub entry: DeletedTodo,
    pub index: DisplayIndex,
}

pub fn index_todos(todos: Vec<Todo>) -> Vec<DisplayTodo> {
    todos
        .into_iter()
        .enumerate()
        .map(|(i, todo)| DisplayTodo {
            todo,
            index: DisplayIndex::Regular(i + 1),
        })
        .collect()
}

/// Expects entries already ordered most recent first, as the trash store
/// returns them.
pub fn index_deleted(entries: Vec<DeletedTodo>) -> Vec<DisplayDeleted> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| DisplayDeleted {
            entry,
            index: DisplayIndex::Deleted(i + 1),
        })
        .collect()
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix('d') {
            if let Ok(n) = rest.parse() {
                return Ok(DisplayIndex::Deleted(n));
            }
        }
        if let Ok(n) = s.parse() {
            return Ok(DisplayIndex::Regular(n));
        }
        Err(format!("Invalid index format: {}", s))
    }
}

/// Widest range a single argument may expand to.
pub const MAX_RANGE_LEN: usize = 1000;

/// Parses a single input string that may be either a single index or a range.
///
/// Supports formats:
/// - Single index: "3", "d2"
/// - Range: "3-5" (expands to 3, 4, 5), "d1-d3" (expands to d1, d2, d3)
///
/// Both endpoints must be the same kind, start must be <= end and the range
/// may cover at most [`MAX_RANGE_LEN`] indexes. Whether the indexes exist is
/// checked later, during resolution.
pub fn parse_index_or_range(s: &str) -> Result<Vec<DisplayIndex>, String> {
    if let Some(dash_pos) = s.find('-') {
        if dash_pos > 0 {
            let start = DisplayIndex::from_str(&s[..dash_pos])?;
            let end = DisplayIndex::from_str(&s[dash_pos + 1..])?;
            return expand_range(start, end);
        }
    }

    DisplayIndex::from_str(s).map(|idx| vec![idx])
}

/// Parse every input, expanding ranges and dropping repeats while keeping
/// first-seen order.
pub fn parse_indexes<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DisplayIndex>, String> {
    let mut seen: HashSet<DisplayIndex> = HashSet::new();
    let mut out: Vec<DisplayIndex> = Vec::new();
    for input in inputs {
        for idx in parse_index_or_range(input.as_ref().trim())? {
            if seen.insert(idx.clone()) {
                out.push(idx);
            }
        }
    }
    Ok(out)
}

fn check_range_len(s: usize, e: usize) -> Result<(), String> {
    if e - s >= MAX_RANGE_LEN {
        return Err(format!(
            "Invalid range: {} indexes requested, at most {} allowed",
            (e - s).saturating_add(1),
            MAX_RANGE_LEN
        ));
    }
    Ok(())
}

fn expand_range(start: DisplayIndex, end: DisplayIndex) -> Result<Vec<DisplayIndex>, String> {
    match (&start, &end) {
        (DisplayIndex::Regular(s), DisplayIndex::Regular(e)) => {
            if s > e {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    s, e
                ));
            }
            check_range_len(*s, *e)?;
            Ok((*s..=*e).map(DisplayIndex::Regular).collect())
        }
        (DisplayIndex::Deleted(s), DisplayIndex::Deleted(e)) => {
            if s > e {
                return Err(format!(
                    "Invalid range: start (d{}) must be <= end (d{})",
                    s, e
                ));
            }
            check_range_len(*s, *e)?;
            Ok((*s..=*e).map(DisplayIndex::Deleted).collect())
        }
        _ => Err(format!(
            "Invalid range: {} and {} are different index types",
            start, end
        )),
    }
}
