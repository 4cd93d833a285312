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
use super::TAG;
use crate::common::ops;
use crate::common::settings::Settings;
use crate::sql;
use clap::ArgMatches;
use log::info;
use std::error::Error;

pub fn handle(args: &ArgMatches, settings: Settings) -> Result<(), Box<dyn Error>> {
    info!(target: TAG, "Running imply");

    if args.is_present("list") {
        let conn = sql::open_store(&settings)?;
        for implication in sql::implications::all_implications(&conn)? {
            println!(
                "{} -> {}",
                implication.implying.name, implication.implied.name
            );
        }
        return Ok(());
    }

    let tag = args.value_of("tag").expect("tag is required!");
    let implied: Vec<&str> = args
        .values_of("implied")
        .expect("implied tags are required!")
        .collect();

    let mut conn = sql::open_store(&settings)?;
    sql::with_transaction(&mut conn, |tx| {
        if args.is_present("delete") {
            ops::imply::remove_implications(tx, tag, &implied)
        } else {
            ops::imply::add_implications(tx, tag, &implied)
        }
    })?;
    Ok(())
}
