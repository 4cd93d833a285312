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

use super::{closure, mtime_secs, OP_TAG};
use crate::common::err::TmsuResult;
use crate::common::fingerprint;
use crate::common::settings::Settings;
use crate::common::{absolute_path, split_path, validate_tag_name};
use crate::sql;
use crate::sql::types::File;
use log::{debug, info};
use rusqlite::Transaction;
use std::path::Path;

/// Tags a file, indexing it on first contact.  Tags are created on first
/// use.  The file must exist on disk; symlinks are indexed with an empty
/// fingerprint and so never participate in move detection.
pub fn tag_file(
    tx: &Transaction,
    settings: &Settings,
    path: &Path,
    tag_names: &[&str],
) -> TmsuResult<File> {
    info!(target: OP_TAG, "Tagging {:?} with {:?}", path, tag_names);

    for name in tag_names {
        validate_tag_name(name)?;
    }

    let abs = absolute_path(path)?;
    let (dir, name) = split_path(&abs)?;

    let file = match sql::files::file_by_path(tx, &dir, &name)? {
        Some(existing) => existing,
        None => {
            let md = std::fs::symlink_metadata(&abs)?;
            let fp = if md.file_type().is_symlink() || md.is_dir() {
                String::new()
            } else {
                fingerprint::fingerprint_file_lenient(&abs, settings.fingerprint_algorithm()?)
            };
            sql::files::add_file(tx, &dir, &name, &fp, mtime_secs(&md), md.len())?
        }
    };

    for tag_name in tag_names {
        let tag = sql::tags::ensure_tag(tx, tag_name)?;
        if !sql::taggings::add_file_tag(tx, file.id, tag.id)? {
            debug!(
                target: OP_TAG,
                "{:?} already tagged with {}, skipping", abs, tag_name
            );
        }
    }

    closure::recompute_file(tx, file.id)?;
    Ok(file)
}
