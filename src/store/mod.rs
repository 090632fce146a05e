//! Document store contract and backends.
//!
//! The SDK never talks to a database directly. Everything it persists goes
//! through [`DocumentStore`], whose `update_fields` applies a whole
//! [`UpdateRequest`] (preconditions plus field updates) atomically. That is
//! what keeps pack openings from double-spending a pack when two sessions of
//! the same account race.

pub mod duckdb_store;
pub mod memory;

pub use duckdb_store::DuckDbStore;
pub use memory::MemoryStore;

use crate::error::{Result, StellarError};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Update requests
// ---------------------------------------------------------------------------

/// A single field mutation. Paths are dot-separated (`packs.starter`).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Add `by` to a numeric field, treating an absent field as `0`.
    Increment { path: String, by: i64 },
    /// Replace a field with `value`.
    Set { path: String, value: Value },
}

/// A guard checked against the stored document before any update applies.
#[derive(Debug, Clone, PartialEq)]
pub enum Precondition {
    /// The numeric field at `path` (absent = `0`) must be at least `min`.
    AtLeast { path: String, min: i64 },
}

/// Preconditions and updates that a store applies all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRequest {
    pub preconditions: Vec<Precondition>,
    pub updates: Vec<FieldUpdate>,
}

impl UpdateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_at_least(mut self, path: &str, min: i64) -> Self {
        self.preconditions.push(Precondition::AtLeast {
            path: path.to_string(),
            min,
        });
        self
    }

    pub fn increment(mut self, path: &str, by: i64) -> Self {
        self.updates.push(FieldUpdate::Increment {
            path: path.to_string(),
            by,
        });
        self
    }

    pub fn set(mut self, path: &str, value: Value) -> Self {
        self.updates.push(FieldUpdate::Set {
            path: path.to_string(),
            value,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.preconditions.is_empty() && self.updates.is_empty()
    }

    /// Check every precondition, then apply every update to `doc`.
    ///
    /// On error `doc` is left untouched.
    pub fn apply_to(&self, doc: &mut Value) -> Result<()> {
        for pre in &self.preconditions {
            match pre {
                Precondition::AtLeast { path, min } => {
                    let current = numeric_at(doc, path)?;
                    if current < *min {
                        return Err(StellarError::PreconditionFailed(format!(
                            "{} is {}, needs at least {}",
                            path, current, min
                        )));
                    }
                }
            }
        }

        let mut next = doc.clone();
        for update in &self.updates {
            match update {
                FieldUpdate::Increment { path, by } => {
                    let current = numeric_at(&next, path)?;
                    *slot_mut(&mut next, path)? = Value::from(current + by);
                }
                FieldUpdate::Set { path, value } => {
                    *slot_mut(&mut next, path)? = value.clone();
                }
            }
        }
        *doc = next;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DocumentStore
// ---------------------------------------------------------------------------

/// Minimal document database contract.
pub trait DocumentStore: Send + Sync {
    /// Fetch a document, or `None` if it does not exist.
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Create or fully replace a document.
    fn set_document(&self, collection: &str, id: &str, doc: Value) -> Result<()>;

    /// Atomically check `request.preconditions` and apply `request.updates`.
    ///
    /// Fails with `NotFound` if the document does not exist and with
    /// `PreconditionFailed` if a guard does not hold; in both cases nothing
    /// is written.
    fn update_fields(&self, collection: &str, id: &str, request: &UpdateRequest) -> Result<()>;

    /// Documents whose `name` field starts with `prefix`, ordered by name.
    ///
    /// Matching is the range `prefix ..= prefix + '\u{f8ff}'` compared by
    /// code point, so names continuing past U+F8FF (emoji, for one) are not
    /// matched.
    fn find_by_name_prefix(
        &self,
        collection: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<(String, Value)>>;
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn segments(path: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(StellarError::InvalidArgument(format!(
            "Invalid field path '{}'",
            path
        )));
    }
    Ok(parts)
}

/// Counter value at `path`.
///
/// Reads the way [`PlayerProfile::from_document`](crate::models::PlayerProfile::from_document)
/// does: absent, null, malformed or negative values are `0`, and numeric
/// strings are accepted.
fn numeric_at(doc: &Value, path: &str) -> Result<i64> {
    let mut cur = doc;
    for seg in segments(path)? {
        match cur.get(seg) {
            Some(v) => cur = v,
            None => return Ok(0),
        }
    }
    let n = match cur {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    };
    Ok(n.unwrap_or(0).max(0))
}

/// Mutable slot at `path`, creating intermediate objects as needed.
///
/// A non-object field on the way is read as an empty map, so it is replaced
/// by one before descending.
fn slot_mut<'a>(doc: &'a mut Value, path: &str) -> Result<&'a mut Value> {
    let mut cur = doc;
    for seg in segments(path)? {
        if !cur.is_object() {
            *cur = Value::Object(Map::new());
        }
        cur = match cur {
            Value::Object(obj) => obj.entry(seg.to_string()).or_insert(Value::Null),
            _ => {
                return Err(StellarError::InvalidArgument(format!(
                    "{} crosses a non-object field",
                    path
                )))
            }
        };
    }
    Ok(cur)
}

/// The `name` field used for prefix search, if it is a string.
pub(crate) fn document_name(doc: &Value) -> Option<&str> {
    doc.get("name").and_then(|v| v.as_str())
}
