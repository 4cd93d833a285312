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

use super::types::File;
use super::{make_params, SQL_TAG};
use log::{debug, info, trace};
use rusqlite::{params, Connection, OptionalExtension, Result, Row, Transaction, NO_PARAMS};

pub(crate) fn to_file(row: &Row) -> Result<File> {
    Ok(File {
        id: row.get(0)?,
        directory: row.get(1)?,
        name: row.get(2)?,
        fingerprint: row.get(3)?,
        mod_time: row.get(4)?,
        size: row.get::<usize, i64>(5)? as u64,
    })
}

const FILE_COLS: &str = "id, directory, name, fingerprint, mod_time, size";

pub fn add_file(
    tx: &Transaction,
    directory: &str,
    name: &str,
    fingerprint: &str,
    mod_time: i64,
    size: u64,
) -> Result<File> {
    info!(target: SQL_TAG, "Adding file {}/{}", directory, name);
    tx.execute(
        "INSERT INTO file (directory, name, fingerprint, mod_time, size)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![directory, name, fingerprint, mod_time, size as i64],
    )?;
    Ok(File {
        id: tx.last_insert_rowid(),
        directory: directory.to_owned(),
        name: name.to_owned(),
        fingerprint: fingerprint.to_owned(),
        mod_time,
        size,
    })
}

pub fn file_by_path(conn: &Connection, directory: &str, name: &str) -> Result<Option<File>> {
    let query = format!(
        "SELECT {} FROM file WHERE directory=?1 AND name=?2",
        FILE_COLS
    );
    conn.query_row(&query, params![directory, name], to_file)
        .optional()
}

pub fn file_by_id(conn: &Connection, id: i64) -> Result<Option<File>> {
    let query = format!("SELECT {} FROM file WHERE id=?1", FILE_COLS);
    conn.query_row(&query, params![id], to_file).optional()
}

pub fn file_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM file", NO_PARAMS, |row| row.get(0))
}

pub fn all_files(conn: &Connection) -> Result<Vec<File>> {
    let query = format!("SELECT {} FROM file ORDER BY directory, name", FILE_COLS);
    conn.prepare(&query)?
        .query_map(NO_PARAMS, to_file)?
        .collect()
}

pub fn files_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<File>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let query = format!(
        "SELECT {} FROM file WHERE id IN ({}) ORDER BY name, id",
        FILE_COLS,
        make_params(ids.len(), 0)
    );
    trace!(target: SQL_TAG, "{}", query);
    conn.prepare(&query)?.query_map(ids, to_file)?.collect()
}

/// All files whose directory is `dir` or lies underneath it.
pub fn files_under_dir(conn: &Connection, dir: &str) -> Result<Vec<File>> {
    debug!(target: SQL_TAG, "Listing indexed files under {}", dir);
    let prefix = format!("{}/%", dir.trim_end_matches('/'));
    let query = format!(
        "SELECT {} FROM file WHERE directory=?1 OR directory LIKE ?2 ORDER BY directory, name",
        FILE_COLS
    );
    conn.prepare(&query)?
        .query_map(params![dir, prefix], to_file)?
        .collect()
}

/// Files sharing a non-empty fingerprint with at least one other file,
/// ordered so that callers can group them into duplicate sets.  With `dir`,
/// both the results and the duplicate grouping are confined to indexed
/// files under that directory.
pub fn duplicate_files(conn: &Connection, dir: Option<&str>) -> Result<Vec<File>> {
    match dir {
        Some(dir) => {
            debug!(target: SQL_TAG, "Listing duplicate files under {}", dir);
            let prefix = format!("{}/%", dir.trim_end_matches('/'));
            let query = format!(
                "SELECT {} FROM file
                 WHERE (directory=?1 OR directory LIKE ?2)
                   AND fingerprint != ''
                   AND fingerprint IN (
                       SELECT fingerprint FROM file
                       WHERE (directory=?1 OR directory LIKE ?2)
                         AND fingerprint != ''
                       GROUP BY fingerprint
                       HAVING COUNT(*) > 1
                   )
                 ORDER BY fingerprint, id",
                FILE_COLS
            );
            conn.prepare(&query)?
                .query_map(params![dir, prefix], to_file)?
                .collect()
        }
        None => {
            let query = format!(
                "SELECT {} FROM file
                 WHERE fingerprint != ''
                   AND fingerprint IN (
                       SELECT fingerprint FROM file
                       WHERE fingerprint != ''
                       GROUP BY fingerprint
                       HAVING COUNT(*) > 1
                   )
                 ORDER BY fingerprint, id",
                FILE_COLS
            );
            conn.prepare(&query)?.query_map(NO_PARAMS, to_file)?.collect()
        }
    }
}

pub fn update_file_path(tx: &Transaction, id: i64, directory: &str, name: &str) -> Result<()> {
    info!(
        target: SQL_TAG,
        "Moving file {} to {}/{}", id, directory, name
    );
    tx.execute(
        "UPDATE file SET directory=?2, name=?3 WHERE id=?1",
        params![id, directory, name],
    )?;
    Ok(())
}

pub fn update_file_content(
    tx: &Transaction,
    id: i64,
    fingerprint: &str,
    mod_time: i64,
    size: u64,
) -> Result<()> {
    debug!(target: SQL_TAG, "Updating content fields of file {}", id);
    tx.execute(
        "UPDATE file SET fingerprint=?2, mod_time=?3, size=?4 WHERE id=?1",
        params![id, fingerprint, mod_time, size as i64],
    )?;
    Ok(())
}

/// Deletes the file row; taggings cascade.
pub fn delete_file(tx: &Transaction, id: i64) -> Result<()> {
    info!(target: SQL_TAG, "Deleting file {}", id);
    tx.execute("DELETE FROM file WHERE id=?1", params![id])?;
    Ok(())
}
