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

//! Maps store-level errors onto the errnos a kernel callback can answer
//! with.  The general contract: unknown paths are ENOENT, everything that
//! goes wrong inside the store is EIO.

use crate::common::err::TmsuError;
use rusqlite::Error as SqlError;
use std::error::Error;
use std::fmt::Formatter;

#[derive(Debug)]
pub(crate) struct VfsShimError {
    errno: i32,
    original: Option<Box<dyn Error>>,
}

impl VfsShimError {
    pub(crate) fn not_found() -> Self {
        Self::with_errno(libc::ENOENT)
    }

    pub(crate) fn with_errno(errno: i32) -> Self {
        Self {
            errno,
            original: None,
        }
    }

    pub(crate) fn errno(&self) -> i32 {
        self.errno
    }
}

impl std::fmt::Display for VfsShimError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "errno {} ({:?})", self.errno, self.original)
    }
}

impl From<SqlError> for VfsShimError {
    fn from(e: SqlError) -> Self {
        Self {
            errno: libc::EIO,
            original: Some(Box::new(e)),
        }
    }
}

impl From<TmsuError> for VfsShimError {
    fn from(e: TmsuError) -> Self {
        let errno = match &e {
            TmsuError::TagNotFound(_)
            | TmsuError::FileNotFound(_)
            | TmsuError::BadQuery(_)
            | TmsuError::InvalidPath(_) => libc::ENOENT,
            _ => libc::EIO,
        };
        Self {
            errno,
            original: Some(Box::new(e)),
        }
    }
}
