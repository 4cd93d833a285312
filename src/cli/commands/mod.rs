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

mod copy;
mod delete;
mod dupes;
mod files;
mod imply;
mod merge;
mod mount;
mod rename;
mod repair;
mod tag;
mod tags;
mod untag;

pub fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    let app = tag::add_subcommands(app);
    let app = untag::add_subcommands(app);
    let app = tags::add_subcommands(app);
    let app = files::add_subcommands(app);
    let app = imply::add_subcommands(app);
    let app = rename::add_subcommands(app);
    let app = merge::add_subcommands(app);
    let app = copy::add_subcommands(app);
    let app = delete::add_subcommands(app);
    let app = dupes::add_subcommands(app);
    let app = repair::add_subcommands(app);
    mount::add_subcommands(app)
}
