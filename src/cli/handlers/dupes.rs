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
use crate::common::absolute_path;
use crate::sql;
use clap::ArgMatches;
use log::info;
use std::error::Error;
use std::path::Path;

pub fn handle(args: &ArgMatches, settings: Settings) -> Result<(), Box<dyn Error>> {
    info!(target: TAG, "Running dupes");
    let conn = sql::open_store(&settings)?;

    let root = match args.value_of("path") {
        Some(path) => {
            let abs = absolute_path(Path::new(path))?;
            let dir = abs
                .to_str()
                .ok_or_else(|| TmsuError::InvalidPath(abs.clone()))?
                .to_owned();
            Some(dir)
        }
        None => None,
    };

    let mut last_fingerprint: Option<String> = None;
    let mut first_group = true;
    for file in sql::files::duplicate_files(&conn, root.as_deref())? {
        if last_fingerprint.as_deref() != Some(file.fingerprint.as_str()) {
            if !first_group {
                println!();
            }
            first_group = false;
            last_fingerprint = Some(file.fingerprint.clone());
        }
        println!("{}", file.path().display());
    }
    Ok(())
}
