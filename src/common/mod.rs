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

use crate::common::constants::{RESERVED_TAG_CHARS, VERSION};
use crate::common::err::{TmsuError, TmsuResult};
use std::path::{Component, Path, PathBuf};

pub mod constants;
pub mod err;
pub mod fingerprint;
pub mod log;
pub mod ops;
pub mod settings;

pub fn version_str() -> String {
    format!("{}.{}.{}", VERSION.0, VERSION.1, VERSION.2)
}

/// Makes a path absolute and resolves `.` and `..` lexically, without
/// touching the filesystem.  When the path exists it is additionally
/// resolved through `canonicalize` so symlinked directories collapse to one
/// identity in the store.
pub fn absolute_path(path: &Path) -> TmsuResult<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_owned()
    } else {
        std::env::current_dir()?.join(path)
    };

    let cleaned = lexical_clean(&joined);
    if cleaned.exists() {
        Ok(std::fs::canonicalize(&cleaned)?)
    } else {
        Ok(cleaned)
    }
}

fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::RootDir | Component::Prefix(_) => out.push(comp.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(std::path::MAIN_SEPARATOR.to_string());
    }
    out
}

/// Splits an absolute path into the `(directory, basename)` pair under which
/// it is recorded in the store.
pub fn split_path(path: &Path) -> TmsuResult<(String, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| TmsuError::InvalidPath(path.to_owned()))?
        .to_str()
        .ok_or_else(|| TmsuError::InvalidPath(path.to_owned()))?
        .to_owned();
    let dir = path
        .parent()
        .ok_or_else(|| TmsuError::InvalidPath(path.to_owned()))?
        .to_str()
        .ok_or_else(|| TmsuError::InvalidPath(path.to_owned()))?
        .to_owned();
    Ok((dir, name))
}

/// Tag names are non-empty, carry no whitespace at the extremes, and avoid
/// the characters the query grammar reserves.
pub fn validate_tag_name(name: &str) -> TmsuResult<()> {
    let bad = name.is_empty()
        || name != name.trim()
        || name.chars().any(|c| RESERVED_TAG_CHARS.contains(c));
    if bad {
        Err(TmsuError::BadTagName(name.to_owned()))
    } else {
        Ok(())
    }
}
