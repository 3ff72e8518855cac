use anyhow::{bail, Result};
use rusqlite::Connection;

use chirp_types::{MAX_ROW_ID, MIN_ROW_ID};

/// Key the database assigned to the row just inserted on `conn`.
///
/// Ids come from the AUTOINCREMENT sequence, so the row could not have
/// existed before the insert. An id outside the 11-digit range is an error
/// and the caller's transaction must not commit.
pub(super) fn allocated_id(conn: &Connection, table: &str) -> Result<i64> {
    let id = conn.last_insert_rowid();
    if !(MIN_ROW_ID..=MAX_ROW_ID).contains(&id) {
        bail!("{} id {} is outside the 11-digit id space", table, id);
    }
    Ok(id)
}
