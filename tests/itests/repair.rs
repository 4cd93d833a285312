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
use std::fs;

#[test]
fn test_repair_of_an_untouched_tree_is_a_noop() -> TestResult {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.txt", b"a");
    let b = th.create_file("b.txt", b"b");
    th.tag(&a, &["t"])?;
    th.tag(&b, &["t"])?;

    let report = th.repair(None)?;

    assert_eq!(report.checked, 2);
    assert_eq!(report.unchanged, 2);
    assert_eq!(report.modified, 0);
    assert!(report.moved.is_empty());
    assert!(report.missing.is_empty());
    assert!(report.removed.is_empty());
    assert!(report.errors.is_empty());
    Ok(())
}

#[test]
fn test_repair_refreshes_modified_files() -> TestResult {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.txt", b"before");
    let row_before = th.tag(&a, &["t"])?;

    fs::write(&a, b"after, and longer")?;
    let report = th.repair(None)?;

    assert_eq!(report.modified, 1);
    let row_after = th.indexed_file(&a).unwrap();
    assert_ne!(row_before.fingerprint, row_after.fingerprint);
    assert_eq!(row_after.size, b"after, and longer".len() as u64);
    // taggings survive a content change
    th.assert_files("t", &[&a]);
    Ok(())
}

#[test]
fn test_repair_follows_a_move() -> TestResult {
    let mut th = TestHelper::new(None);
    let old = th.create_file("x/f.dat", b"some payload");
    th.tag(&old, &["payload"])?;

    let new = th.files_dir().join("y/f.dat");
    fs::create_dir_all(new.parent().unwrap())?;
    fs::rename(&old, &new)?;
    let new = fs::canonicalize(&new)?;

    let root = th.files_dir().to_owned();
    let report = th.repair(Some(root.as_path()))?;

    assert_eq!(report.moved, vec![(old, new.clone())]);
    assert!(report.missing.is_empty());
    th.assert_files("payload", &[&new]);
    Ok(())
}

#[test]
fn test_ambiguous_move_is_reported_not_guessed() -> TestResult {
    let mut th = TestHelper::new(None);
    let old = th.create_file("x/f.dat", b"same payload");
    th.tag(&old, &["payload"])?;

    // two identical candidates appear where the original vanished
    fs::remove_file(&old)?;
    th.create_file("y/f1.dat", b"same payload");
    th.create_file("y/f2.dat", b"same payload");

    let root = th.files_dir().to_owned();
    let report = th.repair(Some(root.as_path()))?;

    assert!(report.moved.is_empty());
    // kept: it still carries an explicit tagging
    assert_eq!(report.missing, vec![old.clone()]);
    assert!(report
        .errors
        .iter()
        .any(|(path, _)| path == &old));
    Ok(())
}

#[test]
fn test_missing_tagged_file_is_kept() -> TestResult {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.txt", b"a");
    th.tag(&a, &["keep"])?;

    fs::remove_file(&a)?;
    let report = th.repair(None)?;

    assert_eq!(report.missing, vec![a.clone()]);
    assert!(report.removed.is_empty());
    assert_eq!(th.file_count(), 1);
    Ok(())
}

#[test]
fn test_missing_untagged_file_is_removed() -> TestResult {
    let mut th = TestHelper::new(None);
    // a fileless, tagless row as an interrupted client could leave behind
    tmsu::sql::with_transaction(&mut th.conn, |tx| {
        Ok(tmsu::sql::files::add_file(tx, "/nonexistent", "ghost.txt", "abc123", 0, 3).map(|_| ())?)
    })?;
    assert_eq!(th.file_count(), 1);

    let report = th.repair(None)?;

    assert_eq!(report.removed.len(), 1);
    assert!(report.missing.is_empty());
    assert_eq!(th.file_count(), 0);
    Ok(())
}

#[test]
fn test_deleting_the_last_tag_purges_a_missing_file() -> TestResult {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.txt", b"a");
    th.tag(&a, &["t"])?;

    fs::remove_file(&a)?;
    let report = th.repair(None)?;
    assert_eq!(report.missing.len(), 1);

    th.delete_tags(&["t"])?;
    assert_eq!(th.file_count(), 0);

    let after = th.repair(None)?;
    assert_eq!(after.checked, 0);
    Ok(())
}

#[test]
fn test_repair_is_idempotent() -> TestResult {
    let mut th = TestHelper::new(None);
    let a = th.create_file("a.txt", b"before");
    th.tag(&a, &["t"])?;
    fs::write(&a, b"after")?;

    let first = th.repair(None)?;
    assert_eq!(first.modified, 1);
    let row_first = th.indexed_file(&a).unwrap();

    let second = th.repair(None)?;
    assert_eq!(second.checked, 1);
    assert_eq!(second.unchanged, 1);
    assert_eq!(second.modified, 0);
    assert_eq!(th.indexed_file(&a).unwrap(), row_first);
    Ok(())
}

#[test]
fn test_repair_scoped_to_a_root() -> TestResult {
    let mut th = TestHelper::new(None);
    let inside = th.create_file("in/a.txt", b"a");
    let outside = th.create_file("out/b.txt", b"b");
    th.tag(&inside, &["t"])?;
    th.tag(&outside, &["t"])?;

    fs::write(&outside, b"changed!")?;
    let scope = inside.parent().unwrap().to_owned();
    let report = th.repair(Some(scope.as_path()))?;

    // only the scoped row was examined, so the outside change went unseen
    assert_eq!(report.checked, 1);
    assert_eq!(report.unchanged, 1);
    let row = th.indexed_file(&outside).unwrap();
    assert_eq!(row.size, 1);
    Ok(())
}
