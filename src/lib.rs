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

//! Tag-based file indexing: a SQLite-backed tag store, an implication
//! engine, a query language, and a FUSE projection of the index.

#![warn(clippy::all, clippy::cargo)]
#![allow(
    clippy::multiple_crate_versions,
    clippy::implicit_return,
    clippy::missing_docs_in_private_items,
    clippy::missing_inline_in_public_items,
    clippy::shadow_reuse,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::wildcard_enum_match_arm
)]

pub mod cli;
pub mod common;
pub mod fuse;
pub mod query;
pub mod sql;
