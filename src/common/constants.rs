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

pub const VERSION: (&str, &str, &str) = (
    env!("CARGO_PKG_VERSION_MAJOR"),
    env!("CARGO_PKG_VERSION_MINOR"),
    env!("CARGO_PKG_VERSION_PATCH"),
);
pub const ENV_PREFIX: &str = "TMSU";
pub const APP_NAME: &str = "tmsu";

/// Directory under $HOME that holds databases and configuration.
pub const DATA_DIR_NAME: &str = ".tmsu";
pub const DB_FILE_EXT: &str = "db";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// the query grammar claims these characters, so tag names may not use them
pub const RESERVED_TAG_CHARS: &str = "/()=<>,-";

/// Top-level VFS entry holding on-demand query directories.  A user tag with
/// the same name is presented with this suffix appended.
pub const QUERIES_DIR_NAME: &str = "queries";
pub const RESERVED_NAME_SUFFIX: &str = "_";

pub const DEFAULT_CONFIG_TOML: &str = r###"
database = "default"
fingerprintAlgorithm = "SHA256"

[mount]
allow_other = false
"###;
