//! DuckDB-backed document store.
//!
//! Documents live in a single `documents` table as serialized JSON, next to a
//! denormalized `name` column used for prefix search. Updates run as a
//! read-check-write inside one SQL transaction while holding the connection
//! lock, so a failed precondition or a crash mid-update writes nothing.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use duckdb::{params, Connection as DuckDbConnection};
use serde_json::Value;
use tracing::debug;

use super::{document_name, DocumentStore, UpdateRequest};
use crate::config;
use crate::error::{Result, StellarError};
use crate::sql_builder::SqlBuilder;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS documents (\
     collection VARCHAR NOT NULL, \
     id VARCHAR NOT NULL, \
     name VARCHAR, \
     body VARCHAR NOT NULL)";

/// Document store persisted in a DuckDB database (in memory or on disk).
pub struct DuckDbStore {
    conn: Mutex<DuckDbConnection>,
}

impl DuckDbStore {
    /// Open a store backed by an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(DuckDbConnection::open_in_memory()?)
    }

    /// Open (or create) a store backed by a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening document database");
        Self::init(DuckDbConnection::open(path)?)
    }

    fn init(conn: DuckDbConnection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, DuckDbConnection>> {
        self.conn
            .lock()
            .map_err(|_| StellarError::InvalidArgument("Store lock poisoned".into()))
    }

    /// Number of documents stored in `collection`.
    pub fn count(&self, collection: &str) -> Result<usize> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(n.max(0) as usize)
    }
}

fn read_body(conn: &DuckDbConnection, collection: &str, id: &str) -> Result<Option<Value>> {
    let mut stmt = conn.prepare("SELECT body FROM documents WHERE collection = ? AND id = ?")?;
    let mut rows = stmt.query(params![collection, id])?;
    match rows.next()? {
        Some(row) => {
            let body: String = row.get(0)?;
            Ok(Some(serde_json::from_str(&body)?))
        }
        None => Ok(None),
    }
}

impl DocumentStore for DuckDbStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let conn = self.lock()?;
        read_body(&conn, collection, id)
    }

    fn set_document(&self, collection: &str, id: &str, doc: Value) -> Result<()> {
        let body = serde_json::to_string(&doc)?;
        let name = document_name(&doc).map(|s| s.to_string());

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM documents WHERE collection = ? AND id = ?",
            params![collection, id],
        )?;
        tx.execute(
            "INSERT INTO documents (collection, id, name, body) VALUES (?, ?, ?, ?)",
            params![collection, id, name, body],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn update_fields(&self, collection: &str, id: &str, request: &UpdateRequest) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let mut doc = read_body(&tx, collection, id)?
            .ok_or_else(|| StellarError::NotFound(format!("{}/{}", collection, id)))?;
        // Dropping `tx` on an error path rolls the transaction back.
        request.apply_to(&mut doc)?;

        let body = serde_json::to_string(&doc)?;
        let name = document_name(&doc).map(|s| s.to_string());
        tx.execute(
            "UPDATE documents SET name = ?, body = ? WHERE collection = ? AND id = ?",
            params![name, body, collection, id],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn find_by_name_prefix(
        &self,
        collection: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<(String, Value)>> {
        let upper = format!("{}{}", prefix, config::PREFIX_RANGE_END);
        let mut qb = SqlBuilder::new("documents");
        qb.select(&["id", "body"])
            .where_eq("collection", collection)
            .where_gte("name", prefix)
            .where_lte("name", &upper)
            .order_by(&["name ASC", "id ASC"])
            .limit(limit);
        let (sql, sql_params) = qb.build();

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = sql_params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();
        let mut rows = stmt.query(param_values.as_slice())?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let body: String = row.get(1)?;
            out.push((id, serde_json::from_str(&body)?));
        }
        Ok(out)
    }
}
