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
use log::debug;
use rusqlite::{params, OptionalExtension, Transaction, TransactionBehavior, NO_PARAMS};
use rusqlite::{Connection, Result as SqliteResult};

mod m0;
type MigrationFunction = Box<dyn Fn(&Transaction) -> SqliteResult<()>>;

const TAG: &str = "migrations";

/// The schema generation this build reads and writes.
pub const SCHEMA_VERSION: i64 = 0;

pub fn schema_version(conn: &Connection) -> SqliteResult<i64> {
    conn.query_row("SELECT schema_version FROM tmsu_meta", NO_PARAMS, |row| {
        row.get(0)
    })
}

pub fn migrate(conn: &mut Connection, app_version: &str) -> SqliteResult<()> {
    let maybe_table: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='tmsu_meta'",
            NO_PARAMS,
            |row| Ok(row.get(0)?),
        )
        .optional()?;

    // no tables? create
    if maybe_table.is_none() {
        debug!(target: TAG, "Running initial migration");
        let tx = conn.transaction_with_behavior(TransactionBehavior::Exclusive)?;
        m0::migrate(&tx)?;
        tx.commit()?;
    }

    let current = schema_version(conn)?;
    debug!(target: TAG, "Currently on database version {}", current);

    #[allow(unused_mut)]
    let mut migrations: Vec<MigrationFunction> = vec![];
    //migrations.push(Box::new(m1::migrate));

    for (i, mig) in migrations.iter().skip(current as usize).enumerate() {
        debug!(target: TAG, "Running migration {}", (i as i64) + current);
        let tx = conn.transaction_with_behavior(TransactionBehavior::Exclusive)?;
        mig(&tx)?;
        tx.execute(
            "UPDATE tmsu_meta SET schema_version=?1",
            params![(i as i64) + current + 1],
        )?;
        tx.commit()?;
    }

    conn.execute(
        "UPDATE tmsu_meta SET app_version=?1",
        params![app_version],
    )?;

    Ok(())
}
