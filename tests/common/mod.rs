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

#![allow(dead_code)]

use rusqlite::Connection;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tmsu::common::err::TmsuResult;
use tmsu::common::ops;
use tmsu::common::ops::repair::RepairReport;
use tmsu::common::settings::{config, Settings};
use tmsu::query;
use tmsu::sql;
use tmsu::sql::types::File;

pub type TestResult = Result<(), Box<dyn Error>>;

/// A scratch store plus a scratch file tree, with wrappers that run each
/// operation in its own transaction the way the CLI handlers do.
pub struct TestHelper {
    pub settings: Settings,
    pub conn: Connection,
    files_dir: PathBuf,
    // dropping this wipes the scratch tree, so hold it last
    tmp: tempfile::TempDir,
}

impl TestHelper {
    pub fn new(config_toml: Option<&str>) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = Settings::new(tmp.path().to_owned()).unwrap();

        let mut config_sources: Vec<Box<dyn ::config::Source + Send + Sync>> = vec![];
        if let Some(toml) = config_toml {
            config_sources.push(Box::new(::config::File::from_str(
                toml,
                ::config::FileFormat::Toml,
            )));
        }
        settings.update_config(config::build(config_sources));

        let conn = sql::open_store(&settings).unwrap();
        let files_dir = tmp.path().join("files");
        fs::create_dir_all(&files_dir).unwrap();

        TestHelper {
            settings,
            conn,
            files_dir,
            tmp,
        }
    }

    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    /// Creates a scratch file and returns its canonical path, which is the
    /// form the store records.
    pub fn create_file(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.files_dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        fs::canonicalize(&path).unwrap()
    }

    pub fn tag(&mut self, path: &Path, tags: &[&str]) -> TmsuResult<File> {
        let settings = &self.settings;
        sql::with_transaction(&mut self.conn, |tx| {
            ops::tag::tag_file(tx, settings, path, tags)
        })
    }

    pub fn untag(&mut self, path: &Path, tags: &[&str]) -> TmsuResult<()> {
        sql::with_transaction(&mut self.conn, |tx| {
            ops::untag::untag_file(tx, path, tags, false)
        })
    }

    pub fn untag_all(&mut self, path: &Path) -> TmsuResult<()> {
        sql::with_transaction(&mut self.conn, |tx| {
            ops::untag::untag_file(tx, path, &[], true)
        })
    }

    pub fn imply(&mut self, tag: &str, implied: &[&str]) -> TmsuResult<()> {
        sql::with_transaction(&mut self.conn, |tx| {
            ops::imply::add_implications(tx, tag, implied)
        })
    }

    pub fn unimply(&mut self, tag: &str, implied: &[&str]) -> TmsuResult<()> {
        sql::with_transaction(&mut self.conn, |tx| {
            ops::imply::remove_implications(tx, tag, implied)
        })
    }

    pub fn delete_tags(&mut self, tags: &[&str]) -> TmsuResult<()> {
        sql::with_transaction(&mut self.conn, |tx| ops::delete::delete_tags(tx, tags))
    }

    pub fn rename_tag(&mut self, old: &str, new: &str) -> TmsuResult<()> {
        sql::with_transaction(&mut self.conn, |tx| {
            ops::rename::rename_tag(tx, old, new).map(|_| ())
        })
    }

    pub fn merge_tags(&mut self, srcs: &[&str], dst: &str) -> TmsuResult<()> {
        sql::with_transaction(&mut self.conn, |tx| ops::merge::merge_tags(tx, srcs, dst))
    }

    pub fn copy_tag(&mut self, src: &str, dst: &str) -> TmsuResult<()> {
        sql::with_transaction(&mut self.conn, |tx| {
            ops::copy::copy_tag(tx, src, dst).map(|_| ())
        })
    }

    pub fn repair(&mut self, root: Option<&Path>) -> TmsuResult<RepairReport> {
        let settings = &self.settings;
        sql::with_transaction(&mut self.conn, |tx| {
            ops::repair::repair(tx, settings, root)
        })
    }

    /// Evaluates a query expression and returns the matching paths, sorted.
    pub fn files_matching(&self, expr: &str) -> Vec<PathBuf> {
        let parsed = query::parse(expr).unwrap();
        let ids = query::file_ids_matching(&self.conn, &parsed).unwrap();
        let mut paths: Vec<PathBuf> = sql::files::files_by_ids(&self.conn, &ids)
            .unwrap()
            .iter()
            .map(File::path)
            .collect();
        paths.sort();
        paths
    }

    /// The effective tags of a file as (name, implied) pairs, name-ordered.
    pub fn tags_of(&self, path: &Path) -> Vec<(String, bool)> {
        let abs = tmsu::common::absolute_path(path).unwrap();
        let (dir, name) = tmsu::common::split_path(&abs).unwrap();
        let file = sql::files::file_by_path(&self.conn, &dir, &name)
            .unwrap()
            .unwrap_or_else(|| panic!("{:?} isn't indexed", abs));
        sql::taggings::effective_tags_of_file(&self.conn, file.id)
            .unwrap()
            .into_iter()
            .map(|et| (et.tag.name, et.implied))
            .collect()
    }

    pub fn tag_names_of(&self, path: &Path) -> Vec<String> {
        self.tags_of(path).into_iter().map(|(name, _)| name).collect()
    }

    pub fn all_tag_names(&self) -> Vec<String> {
        sql::tags::all_tags(&self.conn)
            .unwrap()
            .into_iter()
            .map(|tag| tag.name)
            .collect()
    }

    pub fn file_count(&self) -> i64 {
        sql::files::file_count(&self.conn).unwrap()
    }

    pub fn indexed_file(&self, path: &Path) -> Option<File> {
        let (dir, name) = tmsu::common::split_path(path).unwrap();
        sql::files::file_by_path(&self.conn, &dir, &name).unwrap()
    }

    pub fn assert_files(&self, expr: &str, expected: &[&Path]) {
        let mut expected: Vec<PathBuf> = expected.iter().map(|p| p.to_path_buf()).collect();
        expected.sort();
        assert_eq!(self.files_matching(expr), expected, "query: {}", expr);
    }
}
