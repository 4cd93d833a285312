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

pub fn setup_logger(
    level: log::LevelFilter,
    outputs: Vec<fern::Output>,
) -> Result<(), fern::InitError> {
    let mut logger = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}[Thread: {:?}][{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S%.3f]"),
                std::thread::current().id(),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level);

    for output in outputs {
        logger = logger.chain(output);
    }

    logger.apply()?;

    Ok(())
}

/// Maps repeated `-v` flags to a log level.  No flag keeps logging off.
pub fn verbosity_level(occurrences: u64) -> Option<log::LevelFilter> {
    match occurrences {
        0 => None,
        1 => Some(log::LevelFilter::Info),
        2 => Some(log::LevelFilter::Debug),
        _ => Some(log::LevelFilter::Trace),
    }
}
