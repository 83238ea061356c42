use anyhow::{Context, Result};
use log::{debug, info};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};

use super::Transport;
use crate::errors::with_storage_context;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Key/value blob store in a SQLite table
pub struct SqliteTransport {
    pool: DbPool,
    key: String,
}

impl SqliteTransport {
    pub fn open(database_path: &str, key: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(database_path);
        let pool = build_pool(manager, None)?;
        info!("Opened SQLite storage: {}", database_path);
        Self::with_pool(pool, key)
    }

    /// Private in-memory database; single connection so every checkout sees the same data
    pub fn in_memory(key: &str) -> Result<Self> {
        let pool = build_pool(SqliteConnectionManager::memory(), Some(1))?;
        Self::with_pool(pool, key)
    }

    fn with_pool(pool: DbPool, key: &str) -> Result<Self> {
        let transport = Self {
            pool,
            key: key.to_string(),
        };
        transport.ensure_schema()?;
        Ok(transport)
    }

    fn ensure_schema(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(SCHEMA_SQL, [])
            .context("Failed to create kv_store table")
            .map(|_| ())
    }

    fn connection(&self) -> Result<DbConn> {
        self.pool
            .get()
            .context("Failed to get database connection from pool")
    }
}

fn build_pool(manager: SqliteConnectionManager, max_size: Option<u32>) -> Result<DbPool> {
    let mut builder = r2d2::Pool::builder();
    if let Some(size) = max_size {
        builder = builder.max_size(size);
    }
    builder
        .build(manager)
        .context("Failed to create database connection pool")
}

impl Transport for SqliteTransport {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        let conn = self.connection()?;
        let sql = "SELECT value FROM kv_store WHERE key = ?1";

        let value = conn
            .query_row(sql, params![self.key], |row| row.get::<_, Vec<u8>>(0))
            .optional();

        with_storage_context(value, "read", &self.key)
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        let conn = self.connection()?;
        let sql = "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                   ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP";

        with_storage_context(conn.execute(sql, params![self.key, bytes]), "write", &self.key)?;

        debug!("Saved {} bytes to SQLite key {}", bytes.len(), self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_save_and_load() {
        let transport = SqliteTransport::in_memory("sessions").unwrap();

        assert_eq!(transport.load().unwrap(), None);

        transport.save(b"[]").unwrap();
        transport.save(b"[{}]").unwrap();

        assert_eq!(transport.load().unwrap(), Some(b"[{}]".to_vec()));
    }

    #[test]
    fn test_keys_are_isolated_in_one_database() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("volleymate.db");
        let db_path = db_path.to_str().unwrap();

        let first = SqliteTransport::open(db_path, "first").unwrap();
        let second = SqliteTransport::open(db_path, "second").unwrap();

        first.save(b"one").unwrap();

        assert_eq!(first.load().unwrap(), Some(b"one".to_vec()));
        assert_eq!(second.load().unwrap(), None);
    }
}
