/*
 * tmsu
 * Copyright (C) 2026 The tmsu authors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use super::types::Tag;
use super::SQL_TAG;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Result, Row, Transaction, NO_PARAMS};

pub(crate) fn to_tag(row: &Row) -> Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn tag_by_name(conn: &Connection, name: &str) -> Result<Option<Tag>> {
    conn.query_row(
        "SELECT id, name FROM tag WHERE name=?1",
        params![name],
        to_tag,
    )
    .optional()
}

pub fn tag_by_id(conn: &Connection, id: i64) -> Result<Option<Tag>> {
    conn.query_row("SELECT id, name FROM tag WHERE id=?1", params![id], to_tag)
        .optional()
}

/// Ensures a tag exists, returning the existing or freshly created row.
pub fn ensure_tag(tx: &Transaction, name: &str) -> Result<Tag> {
    debug!(target: SQL_TAG, "Ensuring tag {} exists", name);
    if let Some(tag) = tag_by_name(tx, name)? {
        return Ok(tag);
    }

    debug!(target: SQL_TAG, "Tag doesn't exist, creating");
    tx.execute("INSERT INTO tag (name) VALUES (?1)", params![name])?;
    Ok(Tag {
        id: tx.last_insert_rowid(),
        name: name.to_owned(),
    })
}

pub fn all_tags(conn: &Connection) -> Result<Vec<Tag>> {
    conn.prepare("SELECT id, name FROM tag ORDER BY name")?
        .query_map(NO_PARAMS, to_tag)?
        .collect()
}

pub fn rename_tag(tx: &Transaction, id: i64, new_name: &str) -> Result<()> {
    info!(target: SQL_TAG, "Renaming tag {} to {}", id, new_name);
    tx.execute(
        "UPDATE tag SET name=?2 WHERE id=?1",
        params![id, new_name],
    )?;
    Ok(())
}

/// Removes a tag; taggings (explicit and implicit) and implications
/// mentioning it cascade away.
pub fn delete_tag(tx: &Transaction, id: i64) -> Result<()> {
    info!(target: SQL_TAG, "Deleting tag {}", id);
    tx.execute("DELETE FROM tag WHERE id=?1", params![id])?;
    Ok(())
}
