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
use crate::common::validate_tag_name;
use crate::sql;
use log::{info, warn};
use rusqlite::Transaction;

/// Folds the source tags into `dst_name`: their taggings and implications
/// move across and the sources are deleted.  The destination is created if
/// it doesn't exist yet.
pub fn merge_tags(tx: &Transaction, src_names: &[&str], dst_name: &str) -> TmsuResult<()> {
    info!(target: OP_TAG, "Merging {:?} into {}", src_names, dst_name);

    validate_tag_name(dst_name)?;
    let dst = sql::tags::ensure_tag(tx, dst_name)?;

    for src_name in src_names {
        let src = sql::tags::tag_by_name(tx, src_name)?
            .ok_or_else(|| TmsuError::TagNotFound((*src_name).to_owned()))?;
        if src.id == dst.id {
            warn!(
                target: OP_TAG,
                "Not merging {} into itself, skipping", src_name
            );
            continue;
        }

        // predecessor walk needs both graphs' worth of edges, so collect the
        // affected files before the source disappears
        let affected = closure::files_affected_by(tx, &[src.id, dst.id])?;

        sql::taggings::copy_file_tags(tx, src.id, dst.id)?;
        sql::implications::retarget_implications(tx, src.id, dst.id)?;
        sql::tags::delete_tag(tx, src.id)?;

        closure::recompute_files(tx, &affected)?;
    }
    Ok(())
}
