use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use chirp_types::User;

pub struct UserRepository<'a> {
    conn: &'a Connection,
}

impl<'a> UserRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Check whether a user with exactly this handle exists
    pub fn handle_exists(&self, handle: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM users WHERE handle = ?",
                [handle],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Get user by handle
    pub fn get_by_handle(&self, handle: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT handle, display_name FROM users WHERE handle = ?",
                [handle],
                |row| {
                    Ok(User {
                        handle: row.get(0)?,
                        display_name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Create a new user
    pub fn create(&self, user: &User) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO users (handle, display_name) VALUES (?, ?)",
                (&user.handle, &user.display_name),
            )
            .context("Failed to create user")?;
        Ok(())
    }
}
