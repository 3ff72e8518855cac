use anyhow::{Context, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

use super::schema::{DEMO_DATA, ID_SEQUENCE_FLOORS, LEGACY_SEED, SCHEMA};

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Pool sizing and acquisition limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    pub max_size: u32,
    /// How long a request waits for a free connection before giving up
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 8,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Database wrapper with connection pooling support
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Create a new database connection pool with default options
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_options(path, PoolOptions::default())
    }

    /// Create a new database connection pool
    ///
    /// Every in-memory connection is its own database, so an in-memory pool
    /// is pinned to a single connection that is never recycled.
    pub fn with_options<P: AsRef<Path>>(path: P, options: PoolOptions) -> Result<Self> {
        let builder = Pool::builder().connection_timeout(options.acquire_timeout);

        let pool = if Self::is_memory_path(&path) {
            builder
                .max_size(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .build(SqliteConnectionManager::memory().with_init(configure_connection))
        } else {
            builder
                .max_size(options.max_size)
                .build(SqliteConnectionManager::file(path).with_init(configure_connection))
        }
        .context("Failed to create database connection pool")?;

        Ok(Self { pool })
    }

    fn is_memory_path<P: AsRef<Path>>(path: P) -> bool {
        let path_str = path.as_ref().to_string_lossy();
        path_str.trim().eq_ignore_ascii_case(MEMORY_DB_PATH)
    }

    /// Create an in-memory database pool (useful for testing)
    pub fn in_memory() -> Result<Self> {
        Self::new(MEMORY_DB_PATH)
    }

    /// Create tables and id sequences, then seed the legacy table.
    /// Safe to run on every startup.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize database schema")?;
        conn.execute_batch(ID_SEQUENCE_FLOORS)
            .context("Failed to set id sequence floors")?;
        conn.execute_batch(LEGACY_SEED)
            .context("Failed to seed legacy test table")?;
        Ok(())
    }

    /// Seed the demo users and follow edges
    pub fn seed_demo_data(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(DEMO_DATA)
            .context("Failed to seed demo data")?;
        Ok(())
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .context("Failed to get database connection from pool")
    }
}

// Bundled SQLite enforces foreign keys by default; older database files may
// still carry REFERENCES clauses on handles and cids.
fn configure_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = OFF;")
}
