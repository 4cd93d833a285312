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

//! Builds directory listings from the index.  These functions are the
//! projection proper; the `Filesystem` impl only translates them to and
//! from inodes, which keeps them testable without a kernel mount.

use crate::common::constants::{QUERIES_DIR_NAME, RESERVED_NAME_SUFFIX};
use crate::common::err::TmsuResult;
use crate::query;
use crate::sql;
use crate::sql::types::File;
use rusqlite::Connection;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectedEntry {
    TagSubdir(String),
    FileLink { name: String, file_id: i64 },
}

impl ProjectedEntry {
    pub fn name(&self) -> &str {
        match self {
            ProjectedEntry::TagSubdir(name) => name,
            ProjectedEntry::FileLink { name, .. } => name,
        }
    }
}

/// Disambiguates colliding basenames with `.1`, `.2`, ... suffixes handed
/// out in ascending file-id order.  `files` must arrive sorted by
/// `(name, id)`, which is how the store returns them.
pub fn render_leaf_names(files: &[File]) -> Vec<(String, i64)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for file in files {
        *counts.entry(file.name.as_str()).or_insert(0) += 1;
    }

    let mut handed_out: HashMap<&str, usize> = HashMap::new();
    files
        .iter()
        .map(|file| {
            if counts[file.name.as_str()] > 1 {
                let n = handed_out.entry(file.name.as_str()).or_insert(0);
                *n += 1;
                (format!("{}.{}", file.name, n), file.id)
            } else {
                (file.name.clone(), file.id)
            }
        })
        .collect()
}

/// Presents a tag name at the root, stepping aside for reserved entries.
pub fn root_tag_name(tag_name: &str) -> String {
    if tag_name == QUERIES_DIR_NAME {
        format!("{}{}", tag_name, RESERVED_NAME_SUFFIX)
    } else {
        tag_name.to_owned()
    }
}

/// The inverse of `root_tag_name`, applied to a name the kernel hands us.
pub fn unescape_root_name(name: &str) -> &str {
    match name.strip_suffix(RESERVED_NAME_SUFFIX) {
        Some(stripped) if stripped == QUERIES_DIR_NAME => stripped,
        _ => name,
    }
}

/// Root listing: one directory per tag.  The reserved `queries` entry is
/// added by the filesystem layer.
pub fn root_entries(conn: &Connection) -> TmsuResult<Vec<ProjectedEntry>> {
    let tags = sql::tags::all_tags(conn)?;
    Ok(tags
        .into_iter()
        .map(|tag| ProjectedEntry::TagSubdir(root_tag_name(&tag.name)))
        .collect())
}

/// Listing for an intersection directory `/t1/.../tn`: the matching files
/// as leaves, plus a sub-directory for every tag that could narrow the set
/// further.  Returns `None` when one of the path tags doesn't exist.
pub fn tag_dir_entries(
    conn: &Connection,
    tag_names: &[String],
) -> TmsuResult<Option<Vec<ProjectedEntry>>> {
    let mut tag_ids = Vec::with_capacity(tag_names.len());
    for name in tag_names {
        match sql::tags::tag_by_name(conn, name)? {
            Some(tag) => tag_ids.push(tag.id),
            None => return Ok(None),
        }
    }

    let mut entries: Vec<ProjectedEntry> = sql::taggings::cooccurring_tags(conn, &tag_ids)?
        .into_iter()
        .map(|tag| ProjectedEntry::TagSubdir(tag.name))
        .collect();

    let file_ids = sql::taggings::file_ids_with_all_tags(conn, &tag_ids)?;
    let files = sql::files::files_by_ids(conn, &file_ids)?;
    entries.extend(
        render_leaf_names(&files)
            .into_iter()
            .map(|(name, file_id)| ProjectedEntry::FileLink { name, file_id }),
    );
    Ok(Some(entries))
}

/// Listing for `/queries/<expr>`: the matching files as leaves.  The
/// expression has already been percent-decoded; parse failures propagate
/// as a query error.
pub fn query_dir_entries(conn: &Connection, expr: &str) -> TmsuResult<Vec<ProjectedEntry>> {
    let parsed = query::parse(expr)?;
    let file_ids = query::file_ids_matching(conn, &parsed)?;
    let files = sql::files::files_by_ids(conn, &file_ids)?;
    Ok(render_leaf_names(&files)
        .into_iter()
        .map(|(name, file_id)| ProjectedEntry::FileLink { name, file_id })
        .collect())
}
