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

use crate::common::err::{TmsuError, TmsuResult};
use crate::common::settings::Settings;
use log::{error, trace, warn};
use rusqlite::{Connection, Result, Transaction, TransactionBehavior, NO_PARAMS};

pub mod files;
pub mod implications;
pub mod migrations;
pub mod taggings;
pub mod tags;
pub mod tpool;
pub mod types;

pub const SQL_TAG: &str = "sql";
pub const MAX_CONN: u32 = 50;

// Sizes cast back and forth between u64 and i64 here because sqlite only
// natively stores i64.  The bytes round-trip unchanged, so casting back
// yields the original value.

/// Returns a correct connection with a very permissive contention handler
pub fn get_conn<P: AsRef<std::path::Path>>(db_path: P) -> Result<Connection> {
    trace!(target: SQL_TAG, "Opening {:?}", db_path.as_ref());
    let conn = Connection::open(&db_path)?;

    // so we get cascading deletes in our relationship tables
    conn.execute("PRAGMA foreign_keys = 1", NO_PARAMS)?;
    conn.busy_handler(Some(|num| -> bool {
        if num >= MAX_CONN as i32 {
            error!(target: SQL_TAG, "Timed out waiting for connection lock");
            false
        } else {
            warn!(
                target: SQL_TAG,
                "Sqlite database contention!  Tried {} times to acquire lock.  Trying again soon...",
                num + 1
            );
            std::thread::sleep(std::time::Duration::from_millis(100));
            true
        }
    }))?;
    Ok(conn)
}

/// Opens the configured database, creating the schema on first use and
/// refusing databases written by a newer schema generation.
pub fn open_store(settings: &Settings) -> TmsuResult<Connection> {
    let db_file = settings.db_file();
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = get_conn(&db_file)?;
    migrations::migrate(&mut conn, &crate::common::version_str())?;

    let schema_version = migrations::schema_version(&conn)?;
    if schema_version > migrations::SCHEMA_VERSION {
        return Err(TmsuError::Fatal(format!(
            "database {:?} uses schema version {} but this tmsu only understands up to {}; \
             upgrade tmsu or point TMSU_DB at a compatible database",
            db_file,
            schema_version,
            migrations::SCHEMA_VERSION
        )));
    }
    Ok(conn)
}

/// Brackets a mutating operation in exactly one transaction: commit on a
/// clean return, rollback when the closure propagates an error.
pub fn with_transaction<T, F>(conn: &mut Connection, f: F) -> TmsuResult<T>
where
    F: FnOnce(&Transaction) -> TmsuResult<T>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let val = f(&tx)?;
    tx.commit()?;
    Ok(val)
}

/// A convenience method that builds a string of sqlite placeholders
pub(crate) fn make_params(num: usize, offset: usize) -> String {
    let mut param_offset = offset + 1;
    let mut params = vec![];
    for _ in 0..num {
        params.push(format!("?{}", param_offset));
        param_offset += 1;
    }
    params.join(",")
}
