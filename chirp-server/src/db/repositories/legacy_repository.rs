use anyhow::{Context, Result};
use rusqlite::Connection;

/// Queries against the legacy `test` demo table
pub struct LegacyRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LegacyRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All names in insertion order
    pub fn list_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM test ORDER BY id")?;

        let names = stmt
            .query_map([], |row| row.get::<_, Option<String>>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        // NULL names are stored but have nothing to show
        Ok(names.into_iter().flatten().collect())
    }

    /// Insert a name, returning its row id
    pub fn add_name(&self, name: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO test (name) VALUES (?)", [name])
            .context("Failed to insert into legacy test table")?;
        Ok(self.conn.last_insert_rowid())
    }
}
