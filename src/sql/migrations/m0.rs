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
use rusqlite::Result as SqliteResult;
use rusqlite::{Transaction, NO_PARAMS};

pub fn migrate(tx: &Transaction) -> SqliteResult<()> {
    // our metadata table for future proofing
    tx.execute(
        "CREATE TABLE IF NOT EXISTS tmsu_meta (
            schema_version INTEGER NOT NULL DEFAULT 0,
            app_version TEXT NOT NULL
        )",
        NO_PARAMS,
    )?;

    tx.execute(
        "INSERT INTO tmsu_meta (schema_version, app_version) VALUES (0, '0.0.0')",
        NO_PARAMS,
    )?;

    // files as they exist on the real filesystem.  (directory, name) is the
    // identity; the fingerprint is empty when the content couldn't be read
    tx.execute(
        "CREATE TABLE IF NOT EXISTS file (
            id INTEGER PRIMARY KEY NOT NULL,
            directory TEXT NOT NULL,
            name TEXT NOT NULL,
            fingerprint TEXT NOT NULL,
            mod_time INTEGER NOT NULL,
            size INTEGER NOT NULL,
            UNIQUE (directory, name)
        )",
        NO_PARAMS,
    )?;

    // repair resolves moves by fingerprint, so make that lookup cheap
    tx.execute(
        "CREATE INDEX IF NOT EXISTS idx_file_fingerprint ON file (fingerprint)",
        NO_PARAMS,
    )?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS tag (
            id INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE
        )",
        NO_PARAMS,
    )?;

    // explicit taggings, created directly by the user
    tx.execute(
        "CREATE TABLE IF NOT EXISTS file_tag (
            file_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (file_id, tag_id),
            FOREIGN KEY (file_id) REFERENCES file (id) ON DELETE CASCADE,
            FOREIGN KEY (tag_id) REFERENCES tag (id) ON DELETE CASCADE
        )",
        NO_PARAMS,
    )?;

    tx.execute(
        "CREATE INDEX IF NOT EXISTS idx_file_tag_tag ON file_tag (tag_id)",
        NO_PARAMS,
    )?;

    // tag_id implies implied_tag_id.  cycles are legal; the closure engine
    // carries a visited set
    tx.execute(
        "CREATE TABLE IF NOT EXISTS implication (
            tag_id INTEGER NOT NULL,
            implied_tag_id INTEGER NOT NULL,
            PRIMARY KEY (tag_id, implied_tag_id),
            FOREIGN KEY (tag_id) REFERENCES tag (id) ON DELETE CASCADE,
            FOREIGN KEY (implied_tag_id) REFERENCES tag (id) ON DELETE CASCADE
        )",
        NO_PARAMS,
    )?;

    // the materialised closure: effective-minus-explicit, labelled with the
    // explicit tag each row was first reached from
    tx.execute(
        "CREATE TABLE IF NOT EXISTS implicit_file_tag (
            file_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            source_tag_id INTEGER NOT NULL,
            PRIMARY KEY (file_id, tag_id),
            FOREIGN KEY (file_id) REFERENCES file (id) ON DELETE CASCADE,
            FOREIGN KEY (tag_id) REFERENCES tag (id) ON DELETE CASCADE,
            FOREIGN KEY (source_tag_id) REFERENCES tag (id) ON DELETE CASCADE
        )",
        NO_PARAMS,
    )?;

    tx.execute(
        "CREATE INDEX IF NOT EXISTS idx_implicit_file_tag_tag ON implicit_file_tag (tag_id)",
        NO_PARAMS,
    )?;

    Ok(())
}
