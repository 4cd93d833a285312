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

//! Content fingerprints used for duplicate detection and move tracking.
//!
//! Small files are hashed whole.  Large files hash three slabs (head,
//! middle, tail) plus the file size, which keeps fingerprinting O(1) in the
//! file size while still distinguishing same-prefix files.  Directories and
//! unreadable files get an empty fingerprint; such rows never participate
//! in move detection or duplicate sets.

use crate::common::err::{TmsuError, TmsuResult};
use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, warn};
use sha2::Digest;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::str::FromStr;

const TAG: &str = "fingerprint";

/// Files at or below this size are hashed in full.
pub const SMALL_FILE_LIMIT: u64 = 5 * 1024 * 1024;
/// Slab size for large-file fingerprints.
pub const SLAB_SIZE: u64 = 500 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Sha256,
    Sha1,
    Md5,
    Blake2b,
    None,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Sha256
    }
}

impl FromStr for Algorithm {
    type Err = TmsuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(Algorithm::Sha256),
            "sha1" => Ok(Algorithm::Sha1),
            "md5" => Ok(Algorithm::Md5),
            "blake2b" => Ok(Algorithm::Blake2b),
            "none" => Ok(Algorithm::None),
            other => Err(TmsuError::Fatal(format!(
                "unknown fingerprint algorithm {:?} (expected SHA256, SHA1, MD5, BLAKE2b or none)",
                other
            ))),
        }
    }
}

enum Hasher {
    Sha256(sha2::Sha256),
    Sha1(sha1::Sha1),
    Md5(md5::Context),
    Blake2b(blake2::Blake2b512),
}

impl Hasher {
    fn new(algorithm: Algorithm) -> Option<Self> {
        match algorithm {
            Algorithm::Sha256 => Some(Hasher::Sha256(sha2::Sha256::new())),
            Algorithm::Sha1 => Some(Hasher::Sha1(sha1::Sha1::new())),
            Algorithm::Md5 => Some(Hasher::Md5(md5::Context::new())),
            Algorithm::Blake2b => Some(Hasher::Blake2b(blake2::Blake2b512::new())),
            Algorithm::None => None,
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha256(h) => h.update(data),
            Hasher::Sha1(h) => h.update(data),
            Hasher::Md5(c) => c.consume(data),
            Hasher::Blake2b(h) => h.update(data),
        }
    }

    fn hexdigest(self) -> String {
        match self {
            Hasher::Sha256(h) => hex::encode(h.finalize()),
            Hasher::Sha1(h) => hex::encode(h.finalize()),
            Hasher::Md5(c) => format!("{:x}", c.compute()),
            Hasher::Blake2b(h) => hex::encode(h.finalize()),
        }
    }
}

/// Fingerprints a regular file.  Directories yield an empty fingerprint.
pub fn fingerprint_file(path: &Path, algorithm: Algorithm) -> TmsuResult<String> {
    let mut hasher = match Hasher::new(algorithm) {
        Some(h) => h,
        None => return Ok(String::new()),
    };

    let md = std::fs::metadata(path)?;
    if md.is_dir() {
        return Ok(String::new());
    }

    let mut f = File::open(path)?;
    let size = md.len();

    if size <= SMALL_FILE_LIMIT {
        hash_range(&mut f, &mut hasher, size)?;
    } else {
        debug!(
            target: TAG,
            "{:?} is {} bytes, taking a sparse fingerprint", path, size
        );
        for &offset in &[0, size / 2 - SLAB_SIZE / 2, size - SLAB_SIZE] {
            f.seek(SeekFrom::Start(offset))?;
            hash_range(&mut f, &mut hasher, SLAB_SIZE)?;
        }

        // the size acts as a tie-breaker between files sharing all three slabs
        let mut size_buf = Vec::with_capacity(8);
        size_buf.write_u64::<LittleEndian>(size)?;
        hasher.update(&size_buf);
    }

    Ok(hasher.hexdigest())
}

/// Like `fingerprint_file`, but per-file problems (unreadable files,
/// dangling symlinks) yield an empty fingerprint instead of an error.
pub fn fingerprint_file_lenient(path: &Path, algorithm: Algorithm) -> String {
    match fingerprint_file(path, algorithm) {
        Ok(fp) => fp,
        Err(e) => {
            warn!(
                target: TAG,
                "Couldn't fingerprint {:?}, storing an empty fingerprint: {}", path, e
            );
            String::new()
        }
    }
}

fn hash_range(f: &mut File, hasher: &mut Hasher, mut remaining: u64) -> TmsuResult<()> {
    let mut buf = [0u8; 8192];
    while remaining > 0 {
        let want = std::cmp::min(remaining, buf.len() as u64) as usize;
        let got = f.read(&mut buf[..want])?;
        if got == 0 {
            break;
        }
        hasher.update(&buf[..got]);
        remaining -= got as u64;
    }
    Ok(())
}
