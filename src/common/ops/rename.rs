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

use super::OP_TAG;
use crate::common::err::{TmsuError, TmsuResult};
use crate::common::validate_tag_name;
use crate::sql;
use crate::sql::types::Tag;
use log::info;
use rusqlite::Transaction;

/// Renames a tag.  Taggings and implications reference the tag by id, so
/// the materialised closure needs no recomputation.
pub fn rename_tag(tx: &Transaction, old_name: &str, new_name: &str) -> TmsuResult<Tag> {
    info!(target: OP_TAG, "Renaming tag {} to {}", old_name, new_name);

    validate_tag_name(new_name)?;
    let tag = sql::tags::tag_by_name(tx, old_name)?
        .ok_or_else(|| TmsuError::TagNotFound(old_name.to_owned()))?;
    if sql::tags::tag_by_name(tx, new_name)?.is_some() {
        return Err(TmsuError::TagExists(new_name.to_owned()));
    }

    sql::tags::rename_tag(tx, tag.id, new_name)?;
    Ok(Tag {
        id: tag.id,
        name: new_name.to_owned(),
    })
}
