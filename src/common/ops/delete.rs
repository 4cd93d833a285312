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
use crate::sql;
use log::info;
use rusqlite::Transaction;

/// Deletes tags outright.  Taggings and implications mentioning them
/// cascade away; files left with no explicit taggings leave the index.
pub fn delete_tags(tx: &Transaction, tag_names: &[&str]) -> TmsuResult<()> {
    info!(target: OP_TAG, "Deleting tags {:?}", tag_names);

    for tag_name in tag_names {
        let tag = sql::tags::tag_by_name(tx, tag_name)?
            .ok_or_else(|| TmsuError::TagNotFound((*tag_name).to_owned()))?;

        // gather the blast radius while the implication edges still exist
        let affected = closure::files_affected_by(tx, &[tag.id])?;

        sql::tags::delete_tag(tx, tag.id)?;

        for file_id in affected {
            if sql::taggings::explicit_tag_count_of_file(tx, file_id)? == 0 {
                sql::files::delete_file(tx, file_id)?;
            } else {
                closure::recompute_file(tx, file_id)?;
            }
        }
    }
    Ok(())
}
