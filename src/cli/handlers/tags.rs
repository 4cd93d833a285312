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
use crate::common::err::TmsuError;
use crate::common::settings::Settings;
use crate::common::{absolute_path, split_path};
use crate::sql;
use clap::ArgMatches;
use log::info;
use std::error::Error;
use std::path::Path;

pub fn handle(args: &ArgMatches, settings: Settings) -> Result<(), Box<dyn Error>> {
    info!(target: TAG, "Running tags");
    let conn = sql::open_store(&settings)?;

    let files: Vec<&str> = match args.values_of("files") {
        Some(values) => values.collect(),
        None => {
            for tag in sql::tags::all_tags(&conn)? {
                println!("{}", tag.name);
            }
            return Ok(());
        }
    };

    for file in files {
        let abs = absolute_path(Path::new(file))?;
        let (dir, name) = split_path(&abs)?;
        let row = sql::files::file_by_path(&conn, &dir, &name)?
            .ok_or_else(|| TmsuError::FileNotFound(abs.clone()))?;

        println!("{}:", abs.display());
        for effective in sql::taggings::effective_tags_of_file(&conn, row.id)? {
            if effective.implied {
                println!("  {} (implied)", effective.tag.name);
            } else {
                println!("  {}", effective.tag.name);
            }
        }
    }
    Ok(())
}
