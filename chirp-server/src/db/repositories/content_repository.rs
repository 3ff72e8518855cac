use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use chirp_types::Content;

use super::ids::allocated_id;

pub struct ContentRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ContentRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Store a tweet payload and return its new cid
    pub fn create(&self, text: Option<&str>, media: Option<&str>) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO content (text, media) VALUES (?, ?)",
                (text, media),
            )
            .context("Failed to create content")?;
        allocated_id(self.conn, "content")
    }

    /// Get content by cid
    pub fn get_by_cid(&self, cid: i64) -> Result<Option<Content>> {
        let content = self
            .conn
            .query_row(
                "SELECT cid, text, media FROM content WHERE cid = ?",
                [cid],
                |row| {
                    Ok(Content {
                        cid: row.get(0)?,
                        text: row.get(1)?,
                        media: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(content)
    }
}
