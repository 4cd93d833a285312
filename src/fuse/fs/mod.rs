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

//! The kernel-facing filesystem shim.  Every callback resolves its inode to
//! a projection node, runs a read-only query against the store, and replies.
//! Each operation sees a snapshot; nothing here subscribes to index changes.

use super::err::VfsShimError;
use super::inode::{InodeTable, Node, QUERIES_INO};
use crate::common::constants::QUERIES_DIR_NAME;
use crate::sql;
use crate::sql::tpool::ThreadConnPool;
use fuser::{
    FileAttr, FileType, Filesystem, ReplyAttr, ReplyData, ReplyDirectory, ReplyEmpty,
    ReplyEntry, ReplyStatfs, Request,
};
use log::{debug, info};
use percent_encoding::percent_decode_str;
use rusqlite::Connection;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

mod getattr;
pub mod readdir;

use readdir::ProjectedEntry;

const OP_TAG: &str = "vfs_op";
const TTL: Duration = Duration::from_secs(1);

pub struct TagFilesystem {
    conn_pool: Arc<ThreadConnPool>,
    inodes: InodeTable,
    uid: u32,
    gid: u32,
    mounted_at: SystemTime,
}

type VfsResult<T> = Result<T, VfsShimError>;

impl TagFilesystem {
    pub fn new(conn_pool: Arc<ThreadConnPool>, uid: u32, gid: u32) -> Self {
        TagFilesystem {
            conn_pool,
            inodes: InodeTable::new(),
            uid,
            gid,
            mounted_at: SystemTime::now(),
        }
    }

    fn dir_attr(&self, ino: u64) -> FileAttr {
        getattr::dir_attr(ino, self.uid, self.gid, self.mounted_at)
    }

    fn link_attr(&self, conn: &Connection, ino: u64, file_id: i64) -> VfsResult<FileAttr> {
        let file = sql::files::file_by_id(conn, file_id)?.ok_or_else(VfsShimError::not_found)?;
        let target_len = file.path().as_os_str().len() as u64;
        Ok(getattr::link_attr(
            ino,
            self.uid,
            self.gid,
            target_len,
            file.mod_time,
        ))
    }

    fn lookup_impl(&self, parent: u64, name: &str) -> VfsResult<(u64, FileAttr)> {
        debug!(target: OP_TAG, "lookup of {:?} under {}", name, parent);
        let parent_node = self
            .inodes
            .get(parent)
            .ok_or_else(VfsShimError::not_found)?;

        let conn_lock = self.conn_pool.get_conn();
        let guard = conn_lock.lock();
        let conn = guard.borrow();

        match parent_node {
            Node::Root => {
                if name == QUERIES_DIR_NAME {
                    return Ok((QUERIES_INO, self.dir_attr(QUERIES_INO)));
                }
                // the escaped form of a tag shadowed by a reserved entry
                // resolves first; otherwise take the name literally
                let unescaped = readdir::unescape_root_name(name);
                let resolved = match sql::tags::tag_by_name(&conn, unescaped)? {
                    Some(tag) => Some(tag.name),
                    None if unescaped != name => {
                        sql::tags::tag_by_name(&conn, name)?.map(|tag| tag.name)
                    }
                    None => None,
                };
                match resolved {
                    Some(tag_name) => {
                        let ino = self.inodes.intern(parent, name, || Node::TagDir {
                            name: tag_name,
                            parent,
                        });
                        Ok((ino, self.dir_attr(ino)))
                    }
                    None => Err(VfsShimError::not_found()),
                }
            }
            Node::Queries => {
                let decoded = percent_decode_str(name)
                    .decode_utf8()
                    .map_err(|_| VfsShimError::not_found())?
                    .into_owned();
                // only parseable expressions materialise as directories
                crate::query::parse(&decoded)?;
                let ino = self
                    .inodes
                    .intern(parent, name, || Node::QueryDir { expr: decoded });
                Ok((ino, self.dir_attr(ino)))
            }
            Node::TagDir { .. } => {
                let tags = self
                    .inodes
                    .tag_path(parent)
                    .ok_or_else(VfsShimError::not_found)?;

                // a narrowing tag directory wins over a file leaf of the
                // same name
                if !tags.iter().any(|t| t.as_str() == name)
                    && sql::tags::tag_by_name(&conn, name)?.is_some()
                {
                    let tag_name = name.to_owned();
                    let ino = self.inodes.intern(parent, name, || Node::TagDir {
                        name: tag_name,
                        parent,
                    });
                    return Ok((ino, self.dir_attr(ino)));
                }

                let entries = readdir::tag_dir_entries(&conn, &tags)?
                    .ok_or_else(VfsShimError::not_found)?;
                self.lookup_leaf(&conn, parent, name, &entries)
            }
            Node::QueryDir { expr } => {
                let entries = readdir::query_dir_entries(&conn, &expr)?;
                self.lookup_leaf(&conn, parent, name, &entries)
            }
            Node::Link { .. } => Err(VfsShimError::not_found()),
        }
    }

    fn lookup_leaf(
        &self,
        conn: &Connection,
        parent: u64,
        name: &str,
        entries: &[ProjectedEntry],
    ) -> VfsResult<(u64, FileAttr)> {
        for entry in entries {
            if let ProjectedEntry::FileLink {
                name: leaf_name,
                file_id,
            } = entry
            {
                if leaf_name == name {
                    let file_id = *file_id;
                    let ino = self
                        .inodes
                        .intern(parent, name, || Node::Link { file_id, parent });
                    let attr = self.link_attr(conn, ino, file_id)?;
                    return Ok((ino, attr));
                }
            }
        }
        Err(VfsShimError::not_found())
    }

    fn getattr_impl(&self, ino: u64) -> VfsResult<FileAttr> {
        match self.inodes.get(ino).ok_or_else(VfsShimError::not_found)? {
            Node::Root | Node::Queries | Node::TagDir { .. } | Node::QueryDir { .. } => {
                Ok(self.dir_attr(ino))
            }
            Node::Link { file_id, .. } => {
                let conn_lock = self.conn_pool.get_conn();
                let guard = conn_lock.lock();
                let conn = guard.borrow();
                self.link_attr(&conn, ino, file_id)
            }
        }
    }

    fn readdir_impl(&self, ino: u64) -> VfsResult<Vec<(u64, FileType, String)>> {
        info!(target: OP_TAG, "Listing directory inode {}", ino);
        let node = self.inodes.get(ino).ok_or_else(VfsShimError::not_found)?;

        let mut out = vec![
            (ino, FileType::Directory, ".".to_string()),
            (self.inodes.parent_of(ino), FileType::Directory, "..".to_string()),
        ];

        let conn_lock = self.conn_pool.get_conn();
        let guard = conn_lock.lock();
        let conn = guard.borrow();

        let entries = match node {
            Node::Root => {
                out.push((QUERIES_INO, FileType::Directory, QUERIES_DIR_NAME.to_string()));
                readdir::root_entries(&conn)?
            }
            // query directories spring into being on lookup, so the
            // reserved directory itself lists empty
            Node::Queries => vec![],
            Node::TagDir { .. } => {
                let tags = self
                    .inodes
                    .tag_path(ino)
                    .ok_or_else(VfsShimError::not_found)?;
                readdir::tag_dir_entries(&conn, &tags)?.ok_or_else(VfsShimError::not_found)?
            }
            Node::QueryDir { expr } => readdir::query_dir_entries(&conn, &expr)?,
            Node::Link { .. } => {
                return Err(VfsShimError::with_errno(libc::ENOTDIR));
            }
        };

        for entry in entries {
            match entry {
                ProjectedEntry::TagSubdir(display_name) => {
                    let tag_name = readdir::unescape_root_name(&display_name).to_owned();
                    let child = self.inodes.intern(ino, &display_name, || Node::TagDir {
                        name: tag_name,
                        parent: ino,
                    });
                    out.push((child, FileType::Directory, display_name));
                }
                ProjectedEntry::FileLink { name, file_id } => {
                    let child = self
                        .inodes
                        .intern(ino, &name, || Node::Link { file_id, parent: ino });
                    out.push((child, FileType::Symlink, name));
                }
            }
        }
        Ok(out)
    }

    fn readlink_impl(&self, ino: u64) -> VfsResult<Vec<u8>> {
        match self.inodes.get(ino).ok_or_else(VfsShimError::not_found)? {
            Node::Link { file_id, .. } => {
                let conn_lock = self.conn_pool.get_conn();
                let guard = conn_lock.lock();
                let conn = guard.borrow();
                let file = sql::files::file_by_id(&conn, file_id)?
                    .ok_or_else(VfsShimError::not_found)?;
                Ok(file.path().as_os_str().to_string_lossy().into_owned().into_bytes())
            }
            _ => Err(VfsShimError::not_found()),
        }
    }
}

impl Filesystem for TagFilesystem {
    fn lookup(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
        let name = match name.to_str() {
            Some(s) => s,
            None => {
                reply.error(libc::ENOENT);
                return;
            }
        };
        match self.lookup_impl(parent, name) {
            Ok((_ino, attr)) => reply.entry(&TTL, &attr, 0),
            Err(e) => reply.error(e.errno()),
        }
    }

    fn getattr(&mut self, _req: &Request<'_>, ino: u64, reply: ReplyAttr) {
        match self.getattr_impl(ino) {
            Ok(attr) => reply.attr(&TTL, &attr),
            Err(e) => reply.error(e.errno()),
        }
    }

    fn readdir(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        let entries = match self.readdir_impl(ino) {
            Ok(entries) => entries,
            Err(e) => {
                reply.error(e.errno());
                return;
            }
        };

        for (i, (child, kind, name)) in entries.into_iter().enumerate().skip(offset as usize) {
            if reply.add(child, (i + 1) as i64, kind, name) {
                break;
            }
        }
        reply.ok();
    }

    fn readlink(&mut self, _req: &Request<'_>, ino: u64, reply: ReplyData) {
        match self.readlink_impl(ino) {
            Ok(target) => reply.data(&target),
            Err(e) => reply.error(e.errno()),
        }
    }

    fn statfs(&mut self, _req: &Request<'_>, _ino: u64, reply: ReplyStatfs) {
        reply.statfs(0, 0, 0, 0, 0, 512, 255, 512);
    }

    fn access(&mut self, _req: &Request<'_>, _ino: u64, _mask: i32, reply: ReplyEmpty) {
        // the projection is world-readable and read-only; the RO mount
        // option already rejects writes
        reply.ok();
    }
}
