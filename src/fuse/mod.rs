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

//! Mount lifecycle for the virtual filesystem.  The session runs in the
//! background while we wait for a termination signal, then unmounts before
//! the process exits so the kernel isn't left holding a dead mount.

use crate::common::err::TmsuResult;
use crate::common::settings::Settings;
use crate::sql::tpool::ThreadConnPool;
use fuser::MountOption;
use log::info;
use signal_hook::iterator::Signals;
use std::path::Path;
use std::sync::Arc;

pub mod err;
pub mod fs;
pub mod inode;

const TAG: &str = "mount";

pub fn mount(settings: &Settings, mountpoint: &Path) -> TmsuResult<()> {
    let conn_pool = Arc::new(ThreadConnPool::new(settings.db_file()));
    let uid = unsafe { libc::getuid() };
    let gid = unsafe { libc::getgid() };
    let filesystem = fs::TagFilesystem::new(conn_pool, uid, gid);

    let mut options = vec![
        MountOption::RO,
        MountOption::FSName(crate::common::constants::APP_NAME.to_string()),
        MountOption::AutoUnmount,
    ];
    if settings.get_config().mount.allow_other {
        options.push(MountOption::AllowOther);
    }

    let session = fuser::spawn_mount2(filesystem, mountpoint, &options)?;
    info!(
        target: TAG,
        "Mounted tag filesystem at {:?}, waiting for SIGINT/SIGTERM", mountpoint
    );

    let signals = Signals::new(&[signal_hook::SIGINT, signal_hook::SIGTERM])?;
    if let Some(signal) = signals.forever().next() {
        info!(target: TAG, "Caught signal {}, unmounting", signal);
    }

    // dropping the session unmounts and flushes kernel state
    drop(session);
    Ok(())
}
