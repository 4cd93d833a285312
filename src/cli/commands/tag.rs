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
use clap::{Arg, SubCommand};

pub(super) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(
        SubCommand::with_name("tag")
            .about("Applies tags to a file, indexing it on first use")
            .arg(
                Arg::with_name("file")
                    .required(true)
                    .help("The file to tag. It can be a relative path.")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("tags")
                    .required(true)
                    .help("The tags to apply. Tags are created on first use.")
                    .min_values(1)
                    .takes_value(true),
            ),
    )
}
