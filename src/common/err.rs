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

use std::error::Error;
use std::path::PathBuf;

pub type TmsuResult<T> = Result<T, TmsuError>;

pub enum TmsuError {
    TagNotFound(String),
    FileNotFound(PathBuf),
    TagExists(String),
    TaggingExists(PathBuf, String),
    BadTagName(String),
    BadQuery(String),
    InvalidPath(PathBuf),
    AmbiguousMove(PathBuf, usize),
    IOError(std::io::Error),
    DatabaseError(rusqlite::Error),
    Fatal(String),
}

impl From<std::io::Error> for TmsuError {
    fn from(e: std::io::Error) -> Self {
        TmsuError::IOError(e)
    }
}

impl From<rusqlite::Error> for TmsuError {
    fn from(e: rusqlite::Error) -> Self {
        TmsuError::DatabaseError(e)
    }
}

impl Error for TmsuError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TmsuError::DatabaseError(e) => Some(e),
            TmsuError::IOError(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for TmsuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            TmsuError::TagNotFound(tag) => write!(f, "No such tag: {}", tag),
            TmsuError::FileNotFound(path) => {
                write!(f, "File not in the index: {}", path.display())
            }
            TmsuError::TagExists(tag) => write!(f, "Tag already exists: {}", tag),
            TmsuError::TaggingExists(path, tag) => write!(
                f,
                "{} is already tagged with {}",
                path.display(),
                tag
            ),
            TmsuError::BadTagName(name) => write!(f, "Invalid tag name: {:?}", name),
            TmsuError::BadQuery(msg) => write!(f, "Invalid query: {}", msg),
            TmsuError::InvalidPath(path) => write!(f, "Invalid path: {}", path.display()),
            TmsuError::AmbiguousMove(path, n) => write!(
                f,
                "{} has {} move candidates with the same fingerprint, not moving",
                path.display(),
                n
            ),
            TmsuError::IOError(e) => write!(f, "IO error: {}", e),
            TmsuError::DatabaseError(e) => write!(f, "Database error: {:?}", e),
            TmsuError::Fatal(msg) => write!(f, "Fatal: {}", msg),
        }
    }
}

impl std::fmt::Debug for TmsuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(self, f)
    }
}
