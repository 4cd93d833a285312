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
        SubCommand::with_name("files")
            .about("Lists the files matching a tag expression")
            .arg(
                Arg::with_name("query")
                    .long_help(
                        r#"
A tag expression.  Juxtaposition is AND; OR, NOT, `-tag` and parentheses
work as expected:

    tmsu files jazz flac
    tmsu files "(rock OR jazz) -live"
"#
                        .trim(),
                    )
                    .required(true)
                    .min_values(1)
                    .takes_value(true),
            ),
    )
}
