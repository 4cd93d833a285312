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

//! Tests of the directory projection itself, driven below the kernel
//! interface: the same listing functions the FUSE callbacks use.

use super::TestHelper;
use tmsu::fuse::fs::readdir::{
    query_dir_entries, render_leaf_names, root_entries, tag_dir_entries, ProjectedEntry,
};

fn names(entries: &[ProjectedEntry]) -> Vec<String> {
    entries.iter().map(|e| e.name().to_string()).collect()
}

fn subdirs(entries: &[ProjectedEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|e| match e {
            ProjectedEntry::TagSubdir(name) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

fn leaves(entries: &[ProjectedEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|e| match e {
            ProjectedEntry::FileLink { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

/// Three files with overlapping tags: A{jazz,flac}, B{jazz,mp3}, C{rock,mp3}.
fn seeded() -> TestHelper {
    let mut th = TestHelper::new(None);
    let a = th.create_file("A.flac", b"a");
    let b = th.create_file("B.mp3", b"b");
    let c = th.create_file("C.mp3", b"c");
    th.tag(&a, &["jazz", "flac"]).unwrap();
    th.tag(&b, &["jazz", "mp3"]).unwrap();
    th.tag(&c, &["rock", "mp3"]).unwrap();
    th
}

#[test]
fn test_root_lists_every_tag() {
    let th = seeded();
    let entries = root_entries(&th.conn).unwrap();
    assert_eq!(names(&entries), vec!["flac", "jazz", "mp3", "rock"]);
}

#[test]
fn test_tag_dir_lists_files_and_narrowing_tags() {
    let th = seeded();
    let entries = tag_dir_entries(&th.conn, &["jazz".to_string()])
        .unwrap()
        .expect("jazz exists");

    assert_eq!(leaves(&entries), vec!["A.flac", "B.mp3"]);
    // only tags that co-occur on some jazz file qualify as sub-directories
    assert_eq!(subdirs(&entries), vec!["flac", "mp3"]);
}

#[test]
fn test_intersection_narrows() {
    let th = seeded();
    let entries = tag_dir_entries(&th.conn, &["jazz".to_string(), "mp3".to_string()])
        .unwrap()
        .expect("both tags exist");

    assert_eq!(leaves(&entries), vec!["B.mp3"]);
    assert!(subdirs(&entries).is_empty());
}

#[test]
fn test_unknown_tag_in_path_is_enoent() {
    let th = seeded();
    assert!(tag_dir_entries(&th.conn, &["nosuch".to_string()])
        .unwrap()
        .is_none());
}

#[test]
fn test_intersection_includes_implied_tags() {
    let mut th = seeded();
    th.imply("jazz", &["music"]).unwrap();

    let entries = tag_dir_entries(&th.conn, &["music".to_string()])
        .unwrap()
        .expect("implied tag is a directory");
    assert_eq!(leaves(&entries), vec!["A.flac", "B.mp3"]);
}

#[test]
fn test_collision_suffixes_follow_file_id_order() {
    let mut th = TestHelper::new(None);
    let first = th.create_file("x/song.mp3", b"first");
    let second = th.create_file("y/song.mp3", b"second");
    let row_first = th.tag(&first, &["t"]).unwrap();
    let row_second = th.tag(&second, &["t"]).unwrap();
    assert!(row_first.id < row_second.id);

    let entries = tag_dir_entries(&th.conn, &["t".to_string()])
        .unwrap()
        .unwrap();
    assert_eq!(leaves(&entries), vec!["song.mp3.1", "song.mp3.2"]);
}

#[test]
fn test_render_leaf_names_without_collision() {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.txt", b"a");
    th.tag(&a, &["t"]).unwrap();

    let row = th.indexed_file(&a).unwrap();
    let rendered = render_leaf_names(&[row]);
    assert_eq!(rendered[0].0, "a.txt");
}

#[test]
fn test_query_dir_evaluates_expressions() {
    let th = seeded();
    let entries = query_dir_entries(&th.conn, "flac OR rock").unwrap();
    assert_eq!(names(&entries), vec!["A.flac", "C.mp3"]);

    let none = query_dir_entries(&th.conn, "jazz rock").unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_query_dir_rejects_malformed_expressions() {
    let th = seeded();
    assert!(query_dir_entries(&th.conn, "(jazz").is_err());
}

#[test]
fn test_tag_shadowing_the_reserved_dir_is_suffixed() {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.txt", b"a");
    th.tag(&a, &["queries"]).unwrap();

    let entries = root_entries(&th.conn).unwrap();
    assert_eq!(names(&entries), vec!["queries_"]);
}
