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

use crate::common::constants;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_database() -> String {
    "default".to_string()
}

fn default_algorithm() -> String {
    "SHA256".to_string()
}

#[derive(Serialize, Deserialize, Clone, Default)]
pub struct Mount {
    /// Passes `allow_other` to the kernel so other users can read the mount.
    #[serde(default)]
    pub allow_other: bool,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    /// Name of the database under the data directory.
    #[serde(default = "default_database")]
    pub database: String,

    /// Full database path override.  The TMSU_DB environment variable lands
    /// here through the environment config source.
    #[serde(default)]
    pub db: Option<PathBuf>,

    // the config crate lowercases keys from some sources, hence the alias
    #[serde(
        rename = "fingerprintAlgorithm",
        alias = "fingerprintalgorithm",
        default = "default_algorithm"
    )]
    pub fingerprint_algorithm: String,

    #[serde(default)]
    pub mount: Mount,
}

/// Builds the merged configuration: built-in defaults, then the supplied
/// sources (config file, CLI overrides), then `TMSU_*` environment
/// variables.
pub fn build<T>(source: T) -> ::config::Config
where
    T: config::Source + Send + Sync + 'static,
{
    let mut merged_config = config::Config::new();

    merged_config
        .merge(config::File::from_str(
            constants::DEFAULT_CONFIG_TOML,
            config::FileFormat::Toml,
        ))
        .expect("Unable to merge default config")
        .merge(source)
        .expect("Unable to merge app config")
        .merge(config::Environment::with_prefix(constants::ENV_PREFIX))
        .expect("Unable to merge settings from environment variables");

    merged_config
}
