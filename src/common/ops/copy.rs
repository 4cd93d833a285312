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
use crate::sql::types::Tag;
use log::info;
use rusqlite::Transaction;

/// Duplicates a tag under a new name, carrying every explicit tagging
/// across.  Implications are not copied; the new tag starts with none.
pub fn copy_tag(tx: &Transaction, src_name: &str, dst_name: &str) -> TmsuResult<Tag> {
    info!(target: OP_TAG, "Copying tag {} to {}", src_name, dst_name);

    validate_tag_name(dst_name)?;
    let src = sql::tags::tag_by_name(tx, src_name)?
        .ok_or_else(|| TmsuError::TagNotFound(src_name.to_owned()))?;
    if sql::tags::tag_by_name(tx, dst_name)?.is_some() {
        return Err(TmsuError::TagExists(dst_name.to_owned()));
    }

    let dst = sql::tags::ensure_tag(tx, dst_name)?;
    sql::taggings::copy_file_tags(tx, src.id, dst.id)?;

    let affected = sql::taggings::file_ids_with_tag_explicit(tx, dst.id)?;
    closure::recompute_files(tx, &affected)?;
    Ok(dst)
}
