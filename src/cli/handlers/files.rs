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
use crate::common::settings::Settings;
use crate::query;
use crate::sql;
use clap::ArgMatches;
use log::{info, warn};
use std::error::Error;

pub fn handle(args: &ArgMatches, settings: Settings) -> Result<(), Box<dyn Error>> {
    info!(target: TAG, "Running files");
    let parts: Vec<&str> = args.values_of("query").expect("query is required!").collect();
    let expr = query::parse(&parts.join(" "))?;

    let conn = sql::open_store(&settings)?;

    // an unknown tag in the expression means no results, even where the
    // expression would otherwise complement to every file
    let unknown = query::unknown_tag_names(&conn, &expr)?;
    if !unknown.is_empty() {
        warn!(
            target: TAG,
            "Query mentions unknown tags {:?}, reporting no files", unknown
        );
        return Ok(());
    }

    let file_ids = query::file_ids_matching(&conn, &expr)?;
    let mut files = sql::files::files_by_ids(&conn, &file_ids)?;
    files.sort_by(|a, b| a.path().cmp(&b.path()));
    for file in files {
        println!("{}", file.path().display());
    }
    Ok(())
}
