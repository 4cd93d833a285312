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
use std::path::Path;

#[test]
fn test_tag_and_query_back() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");

    th.tag(&song, &["music", "mp3"])?;

    th.assert_files("mp3", &[&song]);
    th.assert_files("music", &[&song]);
    assert_eq!(th.tag_names_of(&song), vec!["mp3", "music"]);
    Ok(())
}

#[test]
fn test_tagging_is_idempotent() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");

    th.tag(&song, &["music"])?;
    th.tag(&song, &["music"])?;

    assert_eq!(th.tag_names_of(&song), vec!["music"]);
    assert_eq!(th.file_count(), 1);
    Ok(())
}

#[test]
fn test_untag() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");
    th.tag(&song, &["music", "mp3"])?;

    th.untag(&song, &["music"])?;

    th.assert_files("mp3", &[&song]);
    assert_eq!(th.tag_names_of(&song), vec!["mp3"]);
    Ok(())
}

#[test]
fn test_untagging_last_tag_drops_the_file() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");
    th.tag(&song, &["music"])?;

    th.untag(&song, &["music"])?;

    assert_eq!(th.file_count(), 0);
    Ok(())
}

#[test]
fn test_untag_all() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");
    th.tag(&song, &["music", "mp3", "jazz"])?;

    th.untag_all(&song)?;

    assert_eq!(th.file_count(), 0);
    Ok(())
}

#[test]
fn test_tagging_a_missing_file_fails() {
    let mut th = TestHelper::new(None);
    let ghost = th.files_dir().join("nope.txt");
    assert!(th.tag(&ghost, &["music"]).is_err());
}

#[test]
fn test_untagging_an_unindexed_file_fails() {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");
    assert!(th.untag(&song, &["music"]).is_err());
}

#[test]
fn test_invalid_tag_names_are_rejected() {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");

    for bad in &["", "a/b", "semi-final", "x,y", "(x)", "a=b", " padded", "padded "] {
        assert!(th.tag(&song, &[bad]).is_err(), "accepted {:?}", bad);
    }
    // a rejected tagging rolls the whole transaction back
    assert_eq!(th.file_count(), 0);
}

#[test]
fn test_rename_tag() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");
    th.tag(&song, &["muzik"])?;

    th.rename_tag("muzik", "music")?;

    assert_eq!(th.all_tag_names(), vec!["music"]);
    th.assert_files("music", &[&song]);
    assert!(th.rename_tag("nope", "other").is_err());
    Ok(())
}

#[test]
fn test_rename_refuses_an_existing_name() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");
    th.tag(&song, &["music", "audio"])?;

    assert!(th.rename_tag("music", "audio").is_err());
    Ok(())
}

#[test]
fn test_delete_tag_cascades() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");
    let doc = th.create_file("b.txt", b"notes");
    th.tag(&song, &["music", "keep"])?;
    th.tag(&doc, &["music"])?;

    th.delete_tags(&["music"])?;

    // the song keeps its other tag; the doc lost its only tag and left
    // the index
    assert_eq!(th.tag_names_of(&song), vec!["keep"]);
    assert_eq!(th.file_count(), 1);
    assert_eq!(th.all_tag_names(), vec!["keep"]);
    Ok(())
}

#[test]
fn test_merge_tags() -> TestResult {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.mp3", b"a");
    let b = th.create_file("b.mp3", b"b");
    th.tag(&a, &["rnr"])?;
    th.tag(&b, &["rock"])?;

    th.merge_tags(&["rnr"], "rock")?;

    assert!(!th.all_tag_names().contains(&"rnr".to_string()));
    th.assert_files("rock", &[&a, &b]);
    Ok(())
}

#[test]
fn test_copy_tag() -> TestResult {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.mp3", b"a");
    th.tag(&a, &["music"])?;

    th.copy_tag("music", "sound")?;

    th.assert_files("music", &[&a]);
    th.assert_files("sound", &[&a]);
    assert!(th.copy_tag("music", "sound").is_err());
    Ok(())
}

#[test]
fn test_symlink_to_a_file_indexes_its_target() -> TestResult {
    let mut th = TestHelper::new(None);
    let target = th.create_file("real.txt", b"content");
    let link = th.files_dir().join("link.txt");
    std::os::unix::fs::symlink(&target, &link)?;

    // the link canonicalises to its target before being stored
    th.tag(&link, &["linked"])?;
    th.assert_files("linked", &[&target]);
    Ok(())
}

#[test]
fn test_dangling_symlink_indexes_with_empty_fingerprint() -> TestResult {
    let mut th = TestHelper::new(None);
    let link = th.files_dir().join("link.txt");
    std::os::unix::fs::symlink("/nonexistent/target", &link)?;

    th.tag(&link, &["linked"])?;

    let row = th.indexed_file(&link).expect("link should be indexed");
    assert_eq!(row.fingerprint, "");
    Ok(())
}

#[test]
fn test_duplicate_files_share_a_fingerprint() -> TestResult {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.bin", b"same bytes");
    let b = th.create_file("b.bin", b"same bytes");
    let c = th.create_file("c.bin", b"other bytes");
    th.tag(&a, &["t"])?;
    th.tag(&b, &["t"])?;
    th.tag(&c, &["t"])?;

    let dupes = tmsu::sql::files::duplicate_files(&th.conn, None)?;
    let paths: Vec<_> = dupes.iter().map(|f| f.path()).collect();
    assert_eq!(paths, vec![a, b]);
    Ok(())
}

#[test]
fn test_duplicate_files_scoped_to_a_directory() -> TestResult {
    let mut th = TestHelper::new(None);
    let a = th.create_file("x/a.bin", b"same bytes");
    let b = th.create_file("x/sub/b.bin", b"same bytes");
    let c = th.create_file("y/c.bin", b"same bytes");
    th.tag(&a, &["t"])?;
    th.tag(&b, &["t"])?;
    th.tag(&c, &["t"])?;

    let scope = a.parent().unwrap().to_str().unwrap().to_owned();
    let dupes = tmsu::sql::files::duplicate_files(&th.conn, Some(scope.as_str()))?;
    let paths: Vec<_> = dupes.iter().map(|f| f.path()).collect();
    // the outside copy neither appears nor counts towards the grouping
    assert_eq!(paths, vec![a, b]);
    Ok(())
}

#[test]
fn test_duplicate_grouping_respects_the_scope() -> TestResult {
    let mut th = TestHelper::new(None);
    let inside = th.create_file("x/only.bin", b"cross-scope bytes");
    let outside = th.create_file("y/other.bin", b"cross-scope bytes");
    th.tag(&inside, &["t"])?;
    th.tag(&outside, &["t"])?;

    // duplicates exist globally, but not within the scoped directory
    let scope = inside.parent().unwrap().to_str().unwrap().to_owned();
    assert!(
        tmsu::sql::files::duplicate_files(&th.conn, Some(scope.as_str()))?.is_empty()
    );
    assert_eq!(
        tmsu::sql::files::duplicate_files(&th.conn, None)?.len(),
        2
    );
    Ok(())
}

#[test]
fn test_relative_paths_normalise() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("sub/a.mp3", b"ID3");

    // route through a lexically messy version of the same path
    let messy = song.parent().unwrap().join("../sub/./a.mp3");
    th.tag(&messy, &["music"])?;

    th.assert_files("music", &[&song]);
    Ok(())
}

#[test]
fn test_store_reopens() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3");
    th.tag(&song, &["music"])?;

    // a second connection sees committed state and the same schema version
    let conn2 = tmsu::sql::open_store(&th.settings)?;
    let tags = tmsu::sql::tags::all_tags(&conn2)?;
    assert_eq!(tags.len(), 1);
    assert_eq!(
        tmsu::sql::migrations::schema_version(&conn2)?,
        tmsu::sql::migrations::SCHEMA_VERSION
    );
    Ok(())
}

#[test]
fn test_fingerprint_algorithm_config() -> TestResult {
    let th = TestHelper::new(Some("fingerprintAlgorithm = \"MD5\""));
    assert_eq!(
        th.settings.fingerprint_algorithm()?,
        tmsu::common::fingerprint::Algorithm::Md5
    );
    Ok(())
}

#[test]
fn test_db_path_override() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let mut settings = tmsu::common::settings::Settings::new(tmp.path().to_owned())?;
    let sources: Vec<Box<dyn ::config::Source + Send + Sync>> = vec![Box::new(
        ::config::File::from_str("db = \"/somewhere/else.db\"", ::config::FileFormat::Toml),
    )];
    settings.update_config(tmsu::common::settings::config::build(sources));
    assert_eq!(settings.db_file(), Path::new("/somewhere/else.db"));

    // without the override the database lives under $HOME/.tmsu
    let mut plain = tmsu::common::settings::Settings::new(tmp.path().to_owned())?;
    let no_sources: Vec<Box<dyn ::config::Source + Send + Sync>> = vec![];
    plain.update_config(tmsu::common::settings::config::build(no_sources));
    assert_eq!(
        plain.db_file(),
        tmp.path().join(".tmsu").join("default.db")
    );
    Ok(())
}
