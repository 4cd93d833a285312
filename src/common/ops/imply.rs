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

/// Adds implications `tag -> implied` for each implied name.  Tags are
/// created on first use, like tagging itself.
pub fn add_implications(
    tx: &Transaction,
    tag_name: &str,
    implied_names: &[&str],
) -> TmsuResult<()> {
    info!(
        target: OP_TAG,
        "Implying {:?} from {}", implied_names, tag_name
    );

    validate_tag_name(tag_name)?;
    for name in implied_names {
        validate_tag_name(name)?;
    }

    let tag = sql::tags::ensure_tag(tx, tag_name)?;
    let mut endpoints = vec![tag.id];
    for implied_name in implied_names {
        if *implied_name == tag_name {
            warn!(
                target: OP_TAG,
                "{} trivially implies itself, skipping", tag_name
            );
            continue;
        }
        let implied = sql::tags::ensure_tag(tx, implied_name)?;
        sql::implications::add_implication(tx, tag.id, implied.id)?;
        endpoints.push(implied.id);
    }

    // the new edges are in place, so the predecessor walk sees them
    let affected = closure::files_affected_by(tx, &endpoints)?;
    closure::recompute_files(tx, &affected)?;
    Ok(())
}

/// Removes implications `tag -> implied`.  Both ends must exist.
pub fn remove_implications(
    tx: &Transaction,
    tag_name: &str,
    implied_names: &[&str],
) -> TmsuResult<()> {
    info!(
        target: OP_TAG,
        "Removing implications {:?} from {}", implied_names, tag_name
    );

    let tag = sql::tags::tag_by_name(tx, tag_name)?
        .ok_or_else(|| TmsuError::TagNotFound(tag_name.to_owned()))?;

    let mut endpoints = vec![tag.id];
    let mut implied_ids = vec![];
    for implied_name in implied_names {
        let implied = sql::tags::tag_by_name(tx, implied_name)?
            .ok_or_else(|| TmsuError::TagNotFound((*implied_name).to_owned()))?;
        implied_ids.push(implied.id);
        endpoints.push(implied.id);
    }

    // collect the reachable files while the edges still exist, then cut
    let affected = closure::files_affected_by(tx, &endpoints)?;
    for implied_id in implied_ids {
        sql::implications::remove_implication(tx, tag.id, implied_id)?;
    }
    closure::recompute_files(tx, &affected)?;
    Ok(())
}
