use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use super::{document_name, DocumentStore, UpdateRequest};
use crate::config;
use crate::error::{Result, StellarError};

type Documents = BTreeMap<(String, String), Value>;

/// In-process document store.
///
/// Every operation runs inside one critical section, which makes
/// `update_fields` atomic with respect to concurrent callers.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Documents>> {
        self.docs
            .lock()
            .map_err(|_| StellarError::InvalidArgument("Store lock poisoned".into()))
    }

    /// Number of documents across all collections.
    pub fn len(&self) -> usize {
        self.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for MemoryStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let docs = self.lock()?;
        Ok(docs
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }

    fn set_document(&self, collection: &str, id: &str, doc: Value) -> Result<()> {
        self.lock()?
            .insert((collection.to_string(), id.to_string()), doc);
        Ok(())
    }

    fn update_fields(&self, collection: &str, id: &str, request: &UpdateRequest) -> Result<()> {
        let mut docs = self.lock()?;
        let doc = docs
            .get_mut(&(collection.to_string(), id.to_string()))
            .ok_or_else(|| StellarError::NotFound(format!("{}/{}", collection, id)))?;
        request.apply_to(doc)
    }

    fn find_by_name_prefix(
        &self,
        collection: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<(String, Value)>> {
        let upper = format!("{}{}", prefix, config::PREFIX_RANGE_END);
        let docs = self.lock()?;
        let mut hits: Vec<(&str, &String, &Value)> = docs
            .iter()
            .filter(|((c, _), _)| c == collection)
            .filter_map(|((_, id), doc)| {
                document_name(doc)
                    .filter(|name| *name >= prefix && *name <= upper.as_str())
                    .map(|name| (name, id, doc))
            })
            .collect();
        hits.sort_by(|a, b| a.0.cmp(b.0));

        Ok(hits
            .into_iter()
            .take(limit)
            .map(|(_, id, doc)| (id.clone(), doc.clone()))
            .collect())
    }
}
