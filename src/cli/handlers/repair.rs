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
use std::path::Path;

pub fn handle(args: &ArgMatches, settings: Settings) -> Result<(), Box<dyn Error>> {
    info!(target: TAG, "Running repair");
    let root = args.value_of("path").map(Path::new);

    let mut conn = sql::open_store(&settings)?;
    let report = sql::with_transaction(&mut conn, |tx| {
        ops::repair::repair(tx, &settings, root)
    })?;

    println!("{}", report);
    for (old, new) in &report.moved {
        println!("moved: {} -> {}", old.display(), new.display());
    }
    for path in &report.missing {
        println!("missing: {}", path.display());
    }
    for (path, problem) in &report.errors {
        eprintln!("{}: {}", path.display(), problem);
    }
    Ok(())
}
