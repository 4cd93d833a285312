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

//! Reconciles the index against the real filesystem.  Runs inside one
//! transaction: either every correction lands or none does.  Per-file IO
//! problems don't abort the run; they are collected and reported at the
//! end.

use super::{mtime_secs, OP_TAG};
use crate::common::err::{TmsuError, TmsuResult};
use crate::common::fingerprint::{fingerprint_file_lenient, Algorithm};
use crate::common::settings::Settings;
use crate::common::absolute_path;
use crate::sql;
use crate::sql::types::File;
use log::{debug, info, warn};
use rusqlite::Transaction;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct RepairReport {
    pub checked: usize,
    pub unchanged: usize,
    pub modified: usize,
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// Missing files kept because explicit taggings still reference them.
    pub missing: Vec<PathBuf>,
    /// Missing files removed because nothing referenced them any more.
    pub removed: Vec<PathBuf>,
    /// Per-file problems that didn't stop the run.
    pub errors: Vec<(PathBuf, String)>,
}

impl std::fmt::Display for RepairReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "checked: {}", self.checked)?;
        writeln!(f, "unchanged: {}", self.unchanged)?;
        writeln!(f, "modified: {}", self.modified)?;
        writeln!(f, "moved: {}", self.moved.len())?;
        writeln!(f, "missing (kept): {}", self.missing.len())?;
        write!(f, "missing (removed): {}", self.removed.len())
    }
}

pub fn repair(
    tx: &Transaction,
    settings: &Settings,
    root: Option<&Path>,
) -> TmsuResult<RepairReport> {
    let algorithm = settings.fingerprint_algorithm()?;
    let mut report = RepairReport::default();

    let root = match root {
        Some(r) => Some(absolute_path(r)?),
        None => None,
    };
    let rows = match &root {
        Some(r) => {
            let dir = r
                .to_str()
                .ok_or_else(|| TmsuError::InvalidPath(r.clone()))?;
            sql::files::files_under_dir(tx, dir)?
        }
        None => sql::files::all_files(tx)?,
    };
    info!(
        target: OP_TAG,
        "Repairing {} indexed files under {:?}", rows.len(), root
    );
    report.checked = rows.len();

    let mut missing_rows: Vec<File> = vec![];
    for row in &rows {
        let path = row.path();
        match std::fs::symlink_metadata(&path) {
            Ok(md) => {
                if md.len() == row.size && mtime_secs(&md) == row.mod_time {
                    report.unchanged += 1;
                } else {
                    debug!(target: OP_TAG, "{:?} was modified, re-indexing", path);
                    let fp = if md.file_type().is_symlink() || md.is_dir() {
                        String::new()
                    } else {
                        fingerprint_file_lenient(&path, algorithm)
                    };
                    sql::files::update_file_content(
                        tx,
                        row.id,
                        &fp,
                        mtime_secs(&md),
                        md.len(),
                    )?;
                    report.modified += 1;
                }
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => {
                missing_rows.push(row.clone());
            }
            Err(e) => {
                warn!(target: OP_TAG, "Couldn't stat {:?}: {}", path, e);
                report.errors.push((path, e.to_string()));
            }
        }
    }

    // missing files may have been moved: sweep the filesystem for unindexed
    // files and match them up by fingerprint
    let mut moves: HashMap<i64, PathBuf> = HashMap::new();
    if !missing_rows.is_empty() {
        let sweep_roots: Vec<PathBuf> = match &root {
            Some(r) => vec![r.clone()],
            // without an explicit root, look where the index last saw files
            None => {
                let mut dirs: Vec<PathBuf> = rows
                    .iter()
                    .map(|row| PathBuf::from(&row.directory))
                    .collect::<HashSet<_>>()
                    .into_iter()
                    .collect();
                dirs.sort();
                dirs
            }
        };

        let candidates = candidate_fingerprints(tx, &sweep_roots, algorithm, &mut report)?;

        let mut missing_by_fp: HashMap<&str, usize> = HashMap::new();
        for row in &missing_rows {
            *missing_by_fp.entry(row.fingerprint.as_str()).or_insert(0) += 1;
        }

        for row in &missing_rows {
            if row.fingerprint.is_empty() {
                continue;
            }
            let cands = match candidates.get(row.fingerprint.as_str()) {
                Some(c) => c,
                None => continue,
            };
            if cands.len() == 1 && missing_by_fp[row.fingerprint.as_str()] == 1 {
                moves.insert(row.id, cands[0].clone());
            } else {
                let err = TmsuError::AmbiguousMove(row.path(), cands.len());
                warn!(target: OP_TAG, "{}", err);
                report.errors.push((row.path(), err.to_string()));
            }
        }
    }

    for row in missing_rows {
        match moves.remove(&row.id) {
            Some(new_path) => {
                info!(
                    target: OP_TAG,
                    "{:?} moved to {:?}, rewriting", row.path(), new_path
                );
                let (dir, name) = crate::common::split_path(&new_path)?;
                sql::files::update_file_path(tx, row.id, &dir, &name)?;
                report.moved.push((row.path(), new_path));
            }
            None => {
                if sql::taggings::explicit_tag_count_of_file(tx, row.id)? == 0 {
                    debug!(
                        target: OP_TAG,
                        "{:?} is missing and untagged, removing", row.path()
                    );
                    sql::files::delete_file(tx, row.id)?;
                    report.removed.push(row.path());
                } else {
                    report.missing.push(row.path());
                }
            }
        }
    }

    Ok(report)
}

/// Fingerprints every regular file under the sweep roots that the index
/// doesn't already know, keyed by fingerprint.
fn candidate_fingerprints(
    tx: &Transaction,
    sweep_roots: &[PathBuf],
    algorithm: Algorithm,
    report: &mut RepairReport,
) -> TmsuResult<HashMap<String, Vec<PathBuf>>> {
    let indexed: HashSet<PathBuf> = sql::files::all_files(tx)?
        .iter()
        .map(File::path)
        .collect();

    let mut candidates: HashMap<String, Vec<PathBuf>> = HashMap::new();
    for sweep_root in sweep_roots {
        for entry in WalkDir::new(sweep_root).into_iter() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| sweep_root.clone());
                    report.errors.push((path, e.to_string()));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path().to_path_buf();
            if indexed.contains(&path) {
                continue;
            }
            let fp = fingerprint_file_lenient(&path, algorithm);
            if !fp.is_empty() {
                candidates.entry(fp).or_default().push(path);
            }
        }
    }

    // ascending path order keeps ambiguity reporting deterministic
    for paths in candidates.values_mut() {
        paths.sort();
    }
    Ok(candidates)
}
