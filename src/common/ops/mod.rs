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

//! The core mutating operations.  Every function here expects to run inside
//! the caller's transaction (`sql::with_transaction`) and leaves the
//! materialised implicit-tagging table consistent on return.

pub mod closure;
pub mod copy;
pub mod delete;
pub mod imply;
pub mod merge;
pub mod rename;
pub mod repair;
pub mod tag;
pub mod untag;

pub(crate) const OP_TAG: &str = "tmsu_op";

/// Seconds-precision mtime, the granularity the store records.
pub(crate) fn mtime_secs(md: &std::fs::Metadata) -> i64 {
    md.modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
