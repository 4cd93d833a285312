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

use super::{TestHelper, TestResult};
use std::path::PathBuf;
use tmsu::query;

/// Three files with overlapping tags, used by most query tests.
fn seeded() -> (TestHelper, PathBuf, PathBuf, PathBuf) {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.flac", b"flac a");
    let b = th.create_file("b.mp3", b"mp3 b");
    let c = th.create_file("c.mp3", b"mp3 c");
    th.tag(&a, &["jazz", "flac"]).unwrap();
    th.tag(&b, &["jazz", "mp3"]).unwrap();
    th.tag(&c, &["rock", "mp3"]).unwrap();
    (th, a, b, c)
}

#[test]
fn test_single_tag() {
    let (th, a, b, _c) = seeded();
    th.assert_files("jazz", &[&a, &b]);
}

#[test]
fn test_and_is_intersection() {
    let (th, _a, b, _c) = seeded();
    th.assert_files("jazz mp3", &[&b]);
    th.assert_files("jazz AND mp3", &[&b]);
}

#[test]
fn test_and_commutes() {
    let (th, _a, _b, _c) = seeded();
    assert_eq!(th.files_matching("jazz mp3"), th.files_matching("mp3 jazz"));
}

#[test]
fn test_or_is_union() {
    let (th, a, b, c) = seeded();
    th.assert_files("flac OR rock", &[&a, &c]);
    th.assert_files("jazz OR rock", &[&a, &b, &c]);
}

#[test]
fn test_not_is_complement() {
    let (th, a, _b, _c) = seeded();
    th.assert_files("NOT mp3", &[&a]);
    th.assert_files("-mp3", &[&a]);
}

#[test]
fn test_double_negation_is_identity() {
    let (th, _a, _b, _c) = seeded();
    assert_eq!(
        th.files_matching("NOT NOT jazz"),
        th.files_matching("jazz")
    );
}

#[test]
fn test_precedence_and_parens() {
    let (th, a, b, c) = seeded();
    // AND binds tighter: jazz AND flac, OR rock
    th.assert_files("jazz flac OR rock", &[&a, &c]);
    th.assert_files("jazz (flac OR rock)", &[&a]);
    th.assert_files("(jazz OR rock) mp3", &[&b, &c]);
}

#[test]
fn test_negation_inside_intersection() {
    let (th, a, _b, _c) = seeded();
    th.assert_files("jazz -mp3", &[&a]);
}

#[test]
fn test_unknown_tag_is_empty_set() {
    let (th, _a, _b, _c) = seeded();
    th.assert_files("nosuchtag", &[]);
    th.assert_files("jazz nosuchtag", &[]);

    let expr = query::parse("jazz nosuchtag").unwrap();
    assert_eq!(
        query::unknown_tag_names(&th.conn, &expr).unwrap(),
        vec!["nosuchtag".to_string()]
    );
}

#[test]
fn test_queries_see_implied_tags() -> TestResult {
    let (mut th, a, b, _c) = seeded();
    th.imply("jazz", &["music"])?;

    th.assert_files("music", &[&a, &b]);
    th.assert_files("music mp3", &[&b]);
    Ok(())
}

#[test]
fn test_malformed_expressions_error() {
    for bad in &["", "(jazz", "jazz )", "AND", "jazz OR", "a = b"] {
        assert!(query::parse(bad).is_err(), "parsed {:?}", bad);
    }
}
