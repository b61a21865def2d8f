use rusqlite::Connection;
use std::cell::RefCell;

use crate::errors::ListingsError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slot, remembering which file it was opened for.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = RefCell::new(None);
}

#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Open or fetch this thread's connection and run `f(conn)`.
    /// The slot is reopened if it holds a connection to a different file.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ListingsError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ListingsError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let stale = !matches!(slot.as_ref(), Some((path, _)) if *path == self.path);
                if stale {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| ListingsError::Db(format!("Open DB failed: {e}")))?;
                    *slot = Some((self.path.clone(), conn));
                }
                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(ListingsError::Db("connection slot empty".into())),
                }
            })
            .map_err(|_| ListingsError::Db("thread-local connection unavailable".into()))?
    }
}

/// Apply the bundled schema. Safe to run on every startup.
pub fn init_db(db: &Database) -> Result<(), ListingsError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ListingsError::Db(format!("Failed to apply schema: {e}")))
    })?;

    tracing::info!(path = db.path(), "Database schema ready");
    Ok(())
}
