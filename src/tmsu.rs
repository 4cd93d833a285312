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

//! This is the entrypoint for the commandline interface to the tag store

#![warn(clippy::all, clippy::cargo)]
#![allow(
    clippy::multiple_crate_versions,
    clippy::implicit_return,
    clippy::missing_docs_in_private_items,
    clippy::wildcard_enum_match_arm
)]

use std::error::Error;

use clap::{App, Arg};

use std::sync::Arc;
use tmsu::cli::handlers;
use tmsu::common;
use tmsu::common::settings::{config, Settings};

fn main() -> Result<(), Box<dyn Error>> {
    let version_str = common::version_str();
    let app = App::new("tmsu")
        .version(&*version_str)
        .about("Tags files and finds them back by tag, query or virtual filesystem")
        .settings(&[clap::AppSettings::ArgRequiredElseHelp])
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        );

    let attached_app = tmsu::cli::commands::add_subcommands(app);
    let matches = attached_app.get_matches();

    if let Some(level) = common::log::verbosity_level(matches.occurrences_of("verbosity")) {
        common::log::setup_logger(level, vec![std::io::stdout().into()])?;
    }

    let base_dirs = Arc::new(
        directories::BaseDirs::new().ok_or("Couldn't determine the home directory")?,
    );
    let mut settings = Settings::new(base_dirs.home_dir().to_owned())?;

    let mut config_sources: Vec<Box<dyn ::config::Source + Send + Sync>> = vec![];
    let conf_file = settings.config_file();
    if conf_file.exists() {
        config_sources.push(Box::new(::config::File::from(conf_file)));
    }

    let conf = config::build(config_sources);
    settings.update_config(conf);

    match matches.subcommand() {
        ("tag", Some(args)) => handlers::tag::handle(args, settings),
        ("untag", Some(args)) => handlers::untag::handle(args, settings),
        ("tags", Some(args)) => handlers::tags::handle(args, settings),
        ("files", Some(args)) => handlers::files::handle(args, settings),
        ("imply", Some(args)) => handlers::imply::handle(args, settings),
        ("rename", Some(args)) => handlers::rename::handle(args, settings),
        ("merge", Some(args)) => handlers::merge::handle(args, settings),
        ("copy", Some(args)) => handlers::copy::handle(args, settings),
        ("delete", Some(args)) => handlers::delete::handle(args, settings),
        ("dupes", Some(args)) => handlers::dupes::handle(args, settings),
        ("repair", Some(args)) => handlers::repair::handle(args, settings),
        ("mount", Some(args)) => handlers::mount::handle(args, settings),
        _ => Err("Command not found".into()),
    }
}
