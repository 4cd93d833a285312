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

//! Explicit taggings and the effective-tag queries built over them.  A tag
//! is effective on a file when it is explicitly applied or when the
//! materialised closure table says an explicit tag implies it.

use super::types::{EffectiveTag, Tag};
use super::{make_params, SQL_TAG};
use log::{debug, trace};
use rusqlite::{params, Connection, Result, Transaction, NO_PARAMS};

pub fn add_file_tag(tx: &Transaction, file_id: i64, tag_id: i64) -> Result<bool> {
    debug!(
        target: SQL_TAG,
        "Linking file {} to tag {}", file_id, tag_id
    );
    let inserted = tx.execute(
        "INSERT OR IGNORE INTO file_tag (file_id, tag_id) VALUES (?1, ?2)",
        params![file_id, tag_id],
    )?;
    Ok(inserted > 0)
}

pub fn remove_file_tag(tx: &Transaction, file_id: i64, tag_id: i64) -> Result<usize> {
    debug!(
        target: SQL_TAG,
        "Unlinking file {} from tag {}", file_id, tag_id
    );
    tx.execute(
        "DELETE FROM file_tag WHERE file_id=?1 AND tag_id=?2",
        params![file_id, tag_id],
    )
}

pub fn remove_all_file_tags(tx: &Transaction, file_id: i64) -> Result<usize> {
    debug!(target: SQL_TAG, "Unlinking file {} from all tags", file_id);
    tx.execute("DELETE FROM file_tag WHERE file_id=?1", params![file_id])
}

pub fn explicit_tag_ids_of_file(conn: &Connection, file_id: i64) -> Result<Vec<i64>> {
    conn.prepare("SELECT tag_id FROM file_tag WHERE file_id=?1 ORDER BY tag_id")?
        .query_map(params![file_id], |row| row.get(0))?
        .collect()
}

pub fn explicit_tag_count_of_file(conn: &Connection, file_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM file_tag WHERE file_id=?1",
        params![file_id],
        |row| row.get(0),
    )
}

/// The file's effective tags (explicit plus materialised implicit), ordered
/// by name.
pub fn effective_tags_of_file(conn: &Connection, file_id: i64) -> Result<Vec<EffectiveTag>> {
    let query = "
SELECT t.id, t.name, 0 AS implied
FROM tag AS t
JOIN file_tag AS ft ON ft.tag_id=t.id
WHERE ft.file_id=?1
UNION ALL
SELECT t.id, t.name, 1
FROM tag AS t
JOIN implicit_file_tag AS ift ON ift.tag_id=t.id
WHERE ift.file_id=?1
ORDER BY 2";
    conn.prepare(query)?
        .query_map(params![file_id], |row| {
            Ok(EffectiveTag {
                tag: Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                },
                implied: row.get::<usize, i64>(2)? != 0,
            })
        })?
        .collect()
}

/// Files explicitly tagged with `tag_id`.
pub fn file_ids_with_tag_explicit(conn: &Connection, tag_id: i64) -> Result<Vec<i64>> {
    conn.prepare("SELECT file_id FROM file_tag WHERE tag_id=?1 ORDER BY file_id")?
        .query_map(params![tag_id], |row| row.get(0))?
        .collect()
}

/// Files explicitly tagged with any of the given tags.
pub fn file_ids_with_any_tag_explicit(conn: &Connection, tag_ids: &[i64]) -> Result<Vec<i64>> {
    if tag_ids.is_empty() {
        return Ok(vec![]);
    }
    let query = format!(
        "SELECT DISTINCT file_id FROM file_tag WHERE tag_id IN ({}) ORDER BY file_id",
        make_params(tag_ids.len(), 0)
    );
    trace!(target: SQL_TAG, "{}", query);
    conn.prepare(&query)?
        .query_map(tag_ids, |row| row.get(0))?
        .collect()
}

/// One effective-tag subquery per tag, joined with INTERSECT.  Each operand
/// wraps its explicit/implicit UNION in a FROM subquery so the compound
/// operators associate the intended way.
pub(crate) fn effective_intersection_sql(num: usize, offset: usize) -> String {
    (1..=num)
        .map(|i| {
            format!(
                "SELECT * FROM (SELECT file_id FROM file_tag WHERE tag_id=?{n} \
                 UNION SELECT file_id FROM implicit_file_tag WHERE tag_id=?{n})",
                n = offset + i
            )
        })
        .collect::<Vec<_>>()
        .join(" INTERSECT ")
}

/// Files whose effective tag set contains every one of `tag_ids`.
pub fn file_ids_with_all_tags(conn: &Connection, tag_ids: &[i64]) -> Result<Vec<i64>> {
    if tag_ids.is_empty() {
        return conn
            .prepare("SELECT id FROM file ORDER BY id")?
            .query_map(NO_PARAMS, |row| row.get(0))?
            .collect();
    }

    let query = format!(
        "{} ORDER BY file_id",
        effective_intersection_sql(tag_ids.len(), 0)
    );
    trace!(target: SQL_TAG, "{}", query);
    conn.prepare(&query)?
        .query_map(tag_ids, |row| row.get(0))?
        .collect()
}

/// Finds all tags effective on at least one file of the intersection of
/// `tag_ids`, excluding `tag_ids` themselves.  This is what turns a tag
/// path into its sub-directories: the tags a reader could still narrow by.
pub fn cooccurring_tags(conn: &Connection, tag_ids: &[i64]) -> Result<Vec<Tag>> {
    debug!(
        target: SQL_TAG,
        "Getting tag intersections for {:?}", tag_ids
    );

    let n = tag_ids.len();
    let isect = effective_intersection_sql(n, 0);
    let exclude = make_params(n, n);

    let query = format!(
        "SELECT t.id, t.name
FROM tag AS t
WHERE t.id IN (
    SELECT ft.tag_id FROM file_tag AS ft WHERE ft.file_id IN (SELECT * FROM ({isect}))
    UNION
    SELECT ift.tag_id FROM implicit_file_tag AS ift WHERE ift.file_id IN (SELECT * FROM ({isect}))
)
AND t.id NOT IN ({exclude})
ORDER BY t.name",
        isect = isect,
        exclude = exclude
    );
    trace!(target: SQL_TAG, "{}", query);

    let all_params: Vec<i64> = tag_ids.iter().chain(tag_ids.iter()).copied().collect();
    conn.prepare(&query)?
        .query_map(all_params, super::tags::to_tag)?
        .collect()
}

/// Copies every explicit tagging of `src_tag_id` onto `dst_tag_id`.
pub fn copy_file_tags(tx: &Transaction, src_tag_id: i64, dst_tag_id: i64) -> Result<usize> {
    debug!(
        target: SQL_TAG,
        "Copying taggings of tag {} to tag {}", src_tag_id, dst_tag_id
    );
    tx.execute(
        "INSERT OR IGNORE INTO file_tag (file_id, tag_id)
         SELECT file_id, ?2 FROM file_tag WHERE tag_id=?1",
        params![src_tag_id, dst_tag_id],
    )
}
