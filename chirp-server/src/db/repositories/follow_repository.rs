use anyhow::{Context, Result};
use rusqlite::Connection;

pub struct FollowRepository<'a> {
    conn: &'a Connection,
}

impl<'a> FollowRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Record that `follower` follows `followed`. Duplicate edges are kept.
    pub fn follow(&self, follower: &str, followed: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO following (follower, followed) VALUES (?, ?)",
                (follower, followed),
            )
            .context("Failed to follow user")?;
        Ok(())
    }

    /// Handles that `handle` follows, in the order the edges were created
    pub fn get_users_someone_follows(&self, handle: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT followed FROM following WHERE follower = ? ORDER BY rowid")?;

        let following = stmt
            .query_map([handle], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(following)
    }
}
