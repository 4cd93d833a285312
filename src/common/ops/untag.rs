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

use super::{closure, OP_TAG};
use crate::common::err::{TmsuError, TmsuResult};
use crate::common::{absolute_path, split_path};
use crate::sql;
use log::{info, warn};
use rusqlite::Transaction;
use std::path::Path;

/// Removes explicit taggings from a file.  A file left with no explicit
/// taggings leaves the index entirely; it re-enters on the next `tag`.
pub fn untag_file(
    tx: &Transaction,
    path: &Path,
    tag_names: &[&str],
    all: bool,
) -> TmsuResult<()> {
    info!(target: OP_TAG, "Untagging {:?} from {:?}", path, tag_names);

    let abs = absolute_path(path)?;
    let (dir, name) = split_path(&abs)?;
    let file = sql::files::file_by_path(tx, &dir, &name)?
        .ok_or_else(|| TmsuError::FileNotFound(abs.clone()))?;

    if all {
        sql::taggings::remove_all_file_tags(tx, file.id)?;
    } else {
        for tag_name in tag_names {
            let tag = sql::tags::tag_by_name(tx, tag_name)?
                .ok_or_else(|| TmsuError::TagNotFound((*tag_name).to_owned()))?;
            if sql::taggings::remove_file_tag(tx, file.id, tag.id)? == 0 {
                warn!(
                    target: OP_TAG,
                    "{:?} wasn't tagged with {}, nothing to remove", abs, tag_name
                );
            }
        }
    }

    if sql::taggings::explicit_tag_count_of_file(tx, file.id)? == 0 {
        info!(
            target: OP_TAG,
            "{:?} has no explicit taggings left, dropping it from the index", abs
        );
        sql::files::delete_file(tx, file.id)?;
    } else {
        closure::recompute_file(tx, file.id)?;
    }
    Ok(())
}
