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

use fuser::{FileAttr, FileType};
use std::time::{Duration, SystemTime};

const BLOCK_SIZE: u32 = 512;

fn base_attr(ino: u64, kind: FileType, perm: u16, uid: u32, gid: u32, mtime: SystemTime) -> FileAttr {
    FileAttr {
        ino,
        size: 0,
        blocks: 0,
        atime: mtime,
        mtime,
        ctime: mtime,
        crtime: mtime,
        kind,
        perm,
        nlink: 1,
        uid,
        gid,
        rdev: 0,
        blksize: BLOCK_SIZE,
        flags: 0,
    }
}

/// Directories in the projection are read-only by construction.
pub(super) fn dir_attr(ino: u64, uid: u32, gid: u32, mtime: SystemTime) -> FileAttr {
    let mut attr = base_attr(ino, FileType::Directory, 0o555, uid, gid, mtime);
    attr.nlink = 2;
    attr
}

/// File leaves are symlinks to the real file; size is the link target
/// length, as the kernel expects of a symlink.
pub(super) fn link_attr(
    ino: u64,
    uid: u32,
    gid: u32,
    target_len: u64,
    mod_time: i64,
) -> FileAttr {
    let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(mod_time.max(0) as u64);
    let mut attr = base_attr(ino, FileType::Symlink, 0o777, uid, gid, mtime);
    attr.size = target_len;
    attr.blocks = 1;
    attr
}
