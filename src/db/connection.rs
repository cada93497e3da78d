use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use crate::errors::AppError;

// Thread-local connection slot.
thread_local! {
    static DB_CONN: RefCell<Option<Connection>> = RefCell::new(None);
}

#[derive(Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open or fetch the per-thread SQLite connection and run `f(conn)`.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError>,
    {
        let inner_result = DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                if slot.is_none() {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| AppError::Db(format!("Open DB failed: {e}")))?;
                    *slot = Some(conn);
                }
                let conn = slot.as_mut().unwrap();
                f(conn)
            })
            .map_err(|e| AppError::Db(format!("Connection slot unavailable: {e}")))?;
        inner_result
    }
}

/// Apply the SQL schema file. Tables are `CREATE TABLE IF NOT EXISTS`;
/// ingestion replaces contents, never the schema.
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), AppError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| AppError::Db(format!("Failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| AppError::Db(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    Ok(())
}

pub fn table_exists(conn: &Connection, name: &str) -> Result<bool, AppError> {
    let found = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
            params![name],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(found.is_some())
}
