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
use crate::common::err::TmsuResult;
use crate::common::fingerprint::Algorithm;
use log::debug;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod config;

const TAG: &str = "settings";

/// Settings combine the merged configuration (defaults, config file,
/// environment) with the platform location of the data directory.  The
/// frozen `Config` lives behind an `RwLock` so the VFS threads can read it
/// while the CLI bootstrap is still layering sources.
pub struct Settings {
    config: RwLock<Option<config::Config>>,
    merged_config: ::config::Config,
    home_dir: PathBuf,
}

fn ensure_dir(path: impl AsRef<Path>) -> std::io::Result<()> {
    if !path.as_ref().exists() {
        debug!(
            target: TAG,
            "Dir {} doesn't exist, creating",
            path.as_ref().display()
        );
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

impl Settings {
    pub fn new(home_dir: PathBuf) -> TmsuResult<Self> {
        let settings = Settings {
            config: Default::default(),
            merged_config: Default::default(),
            home_dir,
        };
        ensure_dir(settings.data_dir())?;
        Ok(settings)
    }

    pub fn update_config<T>(&mut self, source: T)
    where
        T: ::config::Source + Send + Sync + 'static,
    {
        let mut guard = self.config.write();
        self.merged_config
            .merge(source)
            .expect("Couldn't merge in new config");
        let frozen = self
            .merged_config
            .clone()
            .try_into()
            .expect("Couldn't freeze config");
        *guard = Some(frozen);
    }

    pub fn get_config(&self) -> config::Config {
        let guard = self.config.read();
        guard.as_ref().expect("Config not set!").clone()
    }

    /// `$HOME/.tmsu`, holding databases and the config file.
    pub fn data_dir(&self) -> PathBuf {
        self.home_dir.join(constants::DATA_DIR_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir().join(constants::CONFIG_FILE_NAME)
    }

    /// The database file this process operates on.  A `db` override (the
    /// TMSU_DB environment variable) wins over the named database.
    pub fn db_file(&self) -> PathBuf {
        let conf = self.get_config();
        match conf.db {
            Some(path) => path,
            None => self
                .data_dir()
                .join(format!("{}.{}", conf.database, constants::DB_FILE_EXT)),
        }
    }

    pub fn fingerprint_algorithm(&self) -> TmsuResult<Algorithm> {
        Algorithm::from_str(&self.get_config().fingerprint_algorithm)
    }
}
