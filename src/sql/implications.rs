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

use super::types::{Implication, Tag};
use super::SQL_TAG;
use log::{debug, info};
use rusqlite::{params, Connection, Result, Transaction, NO_PARAMS};

pub fn add_implication(tx: &Transaction, tag_id: i64, implied_tag_id: i64) -> Result<bool> {
    info!(
        target: SQL_TAG,
        "Adding implication {} -> {}", tag_id, implied_tag_id
    );
    let inserted = tx.execute(
        "INSERT OR IGNORE INTO implication (tag_id, implied_tag_id) VALUES (?1, ?2)",
        params![tag_id, implied_tag_id],
    )?;
    Ok(inserted > 0)
}

pub fn remove_implication(tx: &Transaction, tag_id: i64, implied_tag_id: i64) -> Result<usize> {
    info!(
        target: SQL_TAG,
        "Removing implication {} -> {}", tag_id, implied_tag_id
    );
    tx.execute(
        "DELETE FROM implication WHERE tag_id=?1 AND implied_tag_id=?2",
        params![tag_id, implied_tag_id],
    )
}

pub fn all_implications(conn: &Connection) -> Result<Vec<Implication>> {
    let query = "
SELECT a.id, a.name, b.id, b.name
FROM implication AS i
JOIN tag AS a ON a.id=i.tag_id
JOIN tag AS b ON b.id=i.implied_tag_id
ORDER BY a.name, b.name";
    conn.prepare(query)?
        .query_map(NO_PARAMS, |row| {
            Ok(Implication {
                implying: Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                },
                implied: Tag {
                    id: row.get(2)?,
                    name: row.get(3)?,
                },
            })
        })?
        .collect()
}

/// The whole implication graph as (implying, implied) id pairs, ordered so
/// closure traversal is deterministic.
pub fn all_edges(conn: &Connection) -> Result<Vec<(i64, i64)>> {
    conn.prepare("SELECT tag_id, implied_tag_id FROM implication ORDER BY tag_id, implied_tag_id")?
        .query_map(NO_PARAMS, |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect()
}

/// Re-points implications from one tag to another, dropping any self-loops
/// the retarget would create.  Used by tag merging.
pub fn retarget_implications(tx: &Transaction, src_tag_id: i64, dst_tag_id: i64) -> Result<()> {
    debug!(
        target: SQL_TAG,
        "Retargeting implications of tag {} onto {}", src_tag_id, dst_tag_id
    );
    tx.execute(
        "INSERT OR IGNORE INTO implication (tag_id, implied_tag_id)
         SELECT ?2, implied_tag_id FROM implication WHERE tag_id=?1",
        params![src_tag_id, dst_tag_id],
    )?;
    tx.execute(
        "INSERT OR IGNORE INTO implication (tag_id, implied_tag_id)
         SELECT tag_id, ?2 FROM implication WHERE implied_tag_id=?1",
        params![src_tag_id, dst_tag_id],
    )?;
    tx.execute(
        "DELETE FROM implication WHERE tag_id=implied_tag_id",
        NO_PARAMS,
    )?;
    Ok(())
}

/// Swaps a file's materialised implicit taggings for a freshly derived set.
pub fn replace_implicit_for_file(
    tx: &Transaction,
    file_id: i64,
    derived: &[(i64, i64)],
) -> Result<()> {
    debug!(
        target: SQL_TAG,
        "Replacing implicit taggings of file {} with {} rows",
        file_id,
        derived.len()
    );
    tx.execute(
        "DELETE FROM implicit_file_tag WHERE file_id=?1",
        params![file_id],
    )?;
    for &(tag_id, source_tag_id) in derived {
        tx.execute(
            "INSERT INTO implicit_file_tag (file_id, tag_id, source_tag_id)
             VALUES (?1, ?2, ?3)",
            params![file_id, tag_id, source_tag_id],
        )?;
    }
    Ok(())
}

/// The file's implicit taggings as (tag, source tag) id pairs.
pub fn implicit_pairs_of_file(conn: &Connection, file_id: i64) -> Result<Vec<(i64, i64)>> {
    conn.prepare(
        "SELECT tag_id, source_tag_id FROM implicit_file_tag WHERE file_id=?1 ORDER BY tag_id",
    )?
    .query_map(params![file_id], |row| Ok((row.get(0)?, row.get(1)?)))?
    .collect()
}
