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

use std::path::{Path, PathBuf};

/// An indexed file.  `(directory, name)` is the externally visible
/// identity; `id` never leaves the store layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub id: i64,
    pub directory: String,
    pub name: String,
    pub fingerprint: String,
    /// Seconds-precision mtime observed at last index.
    pub mod_time: i64,
    pub size: u64,
}

impl File {
    pub fn path(&self) -> PathBuf {
        Path::new(&self.directory).join(&self.name)
    }
}

impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// A tag effective on a file, with the provenance the `tags` command
/// reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveTag {
    pub tag: Tag,
    pub implied: bool,
}

/// A directed implication edge: whenever the implying tag is on a file, the
/// implied tag is considered on it too.
#[derive(Debug, Clone)]
pub struct Implication {
    pub implying: Tag,
    pub implied: Tag,
}
