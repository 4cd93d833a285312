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
use tmsu::sql;

#[test]
fn test_implied_tags_become_effective() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3 jazz");
    th.tag(&song, &["music", "mp3"])?;

    th.imply("mp3", &["audio"])?;

    assert_eq!(
        th.tags_of(&song),
        vec![
            ("audio".to_string(), true),
            ("mp3".to_string(), false),
            ("music".to_string(), false),
        ]
    );
    th.assert_files("audio", &[&song]);
    Ok(())
}

#[test]
fn test_implication_applies_to_later_taggings() -> TestResult {
    let mut th = TestHelper::new(None);
    th.imply("mp3", &["audio"])?;

    let song = th.create_file("a.mp3", b"ID3 jazz");
    th.tag(&song, &["mp3"])?;

    th.assert_files("audio", &[&song]);
    Ok(())
}

#[test]
fn test_transitive_implication() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3");
    th.imply("mp3", &["audio"])?;
    th.imply("audio", &["media"])?;
    th.tag(&song, &["mp3"])?;

    let names = th.tag_names_of(&song);
    assert_eq!(names, vec!["audio", "media", "mp3"]);
    Ok(())
}

#[test]
fn test_implication_cycle_terminates() -> TestResult {
    let mut th = TestHelper::new(None);
    let file = th.create_file("f.txt", b"x");
    th.imply("a", &["b"])?;
    th.imply("b", &["c"])?;
    th.imply("c", &["a"])?;

    th.tag(&file, &["a"])?;

    assert_eq!(th.tag_names_of(&file), vec!["a", "b", "c"]);
    th.assert_files("c", &[&file]);
    Ok(())
}

#[test]
fn test_explicit_tag_never_recorded_implicit() -> TestResult {
    let mut th = TestHelper::new(None);
    let file = th.create_file("f.txt", b"x");
    th.imply("a", &["b"])?;
    th.tag(&file, &["a", "b"])?;

    // b is explicit, so the closure must not shadow it with an implicit row
    assert_eq!(
        th.tags_of(&file),
        vec![("a".to_string(), false), ("b".to_string(), false)]
    );
    Ok(())
}

#[test]
fn test_removing_implication_retracts_implicit_tags() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3");
    th.imply("mp3", &["audio"])?;
    th.tag(&song, &["mp3"])?;
    th.assert_files("audio", &[&song]);

    th.unimply("mp3", &["audio"])?;

    th.assert_files("audio", &[]);
    assert_eq!(th.tag_names_of(&song), vec!["mp3"]);
    Ok(())
}

#[test]
fn test_untagging_retracts_implied_tags() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3");
    th.imply("mp3", &["audio"])?;
    th.tag(&song, &["mp3", "keep"])?;

    th.untag(&song, &["mp3"])?;

    assert_eq!(th.tag_names_of(&song), vec!["keep"]);
    Ok(())
}

#[test]
fn test_deleting_a_tag_removes_its_implications() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3");
    th.imply("mp3", &["audio"])?;
    th.tag(&song, &["mp3", "keep"])?;

    th.delete_tags(&["audio"])?;

    // no tagging or implication mentions the deleted tag any more
    assert_eq!(th.tag_names_of(&song), vec!["keep", "mp3"]);
    assert!(sql::implications::all_implications(&th.conn)?.is_empty());
    Ok(())
}

#[test]
fn test_deleting_the_implying_tag() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3");
    th.imply("mp3", &["audio"])?;
    th.tag(&song, &["mp3", "keep"])?;

    th.delete_tags(&["mp3"])?;

    assert_eq!(th.tag_names_of(&song), vec!["keep"]);
    assert!(sql::implications::all_implications(&th.conn)?.is_empty());
    Ok(())
}

#[test]
fn test_implicit_source_is_deterministic() -> TestResult {
    let mut th = TestHelper::new(None);
    let file = th.create_file("f.txt", b"x");
    // two explicit tags both imply "shared"; the source label must come
    // from the lower tag id
    th.imply("first", &["shared"])?;
    th.imply("second", &["shared"])?;
    let row = th.tag(&file, &["first", "second"])?;

    let first_id = sql::tags::tag_by_name(&th.conn, "first")?.unwrap().id;
    let pairs = sql::implications::implicit_pairs_of_file(&th.conn, row.id)?;
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].1, first_id);
    Ok(())
}

#[test]
fn test_merge_carries_implications() -> TestResult {
    let mut th = TestHelper::new(None);
    let song = th.create_file("a.mp3", b"ID3");
    th.imply("mp3", &["audio"])?;
    th.tag(&song, &["mp3"])?;

    th.merge_tags(&["mp3"], "mpeg3")?;

    // the implication follows the merge, so mpeg3 still implies audio
    assert_eq!(th.tag_names_of(&song), vec!["audio", "mpeg3"]);
    Ok(())
}

#[test]
fn test_implications_list() -> TestResult {
    let mut th = TestHelper::new(None);
    th.imply("mp3", &["audio", "media"])?;

    let listed: Vec<(String, String)> = sql::implications::all_implications(&th.conn)?
        .into_iter()
        .map(|i| (i.implying.name, i.implied.name))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("mp3".to_string(), "audio".to_string()),
            ("mp3".to_string(), "media".to_string()),
        ]
    );
    Ok(())
}
