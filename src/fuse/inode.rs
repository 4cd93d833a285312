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

//! The kernel addresses the filesystem by inode, while the projection is
//! really keyed by tag paths and query expressions.  This table hands out
//! stable inode numbers for the nodes the kernel has seen.  Inodes 1-99
//! are reserved for well-known entries; everything else is allocated on
//! first lookup.

use parking_lot::RwLock;
use std::collections::HashMap;

pub const ROOT_INO: u64 = 1;
pub const QUERIES_INO: u64 = 2;
const DYNAMIC_START: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Root,
    /// The reserved top-level `queries` directory.
    Queries,
    /// One tag component of an intersection path.
    TagDir { name: String, parent: u64 },
    /// An on-demand query directory under `queries/`.
    QueryDir { expr: String },
    /// A file leaf, shown under the directory it was resolved in.
    Link { file_id: i64, parent: u64 },
}

struct Inner {
    nodes: HashMap<u64, Node>,
    by_name: HashMap<(u64, String), u64>,
    next: u64,
}

pub struct InodeTable {
    inner: RwLock<Inner>,
}

impl InodeTable {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_INO, Node::Root);
        nodes.insert(QUERIES_INO, Node::Queries);
        InodeTable {
            inner: RwLock::new(Inner {
                nodes,
                by_name: HashMap::new(),
                next: DYNAMIC_START,
            }),
        }
    }

    pub fn get(&self, ino: u64) -> Option<Node> {
        self.inner.read().nodes.get(&ino).cloned()
    }

    /// Returns the inode already assigned to `name` under `parent`, or
    /// assigns a fresh one to the node `make` builds.
    pub fn intern<F>(&self, parent: u64, name: &str, make: F) -> u64
    where
        F: FnOnce() -> Node,
    {
        let key = (parent, name.to_owned());
        let mut inner = self.inner.write();
        if let Some(&ino) = inner.by_name.get(&key) {
            return ino;
        }
        let ino = inner.next;
        inner.next += 1;
        inner.nodes.insert(ino, make());
        inner.by_name.insert(key, ino);
        ino
    }

    /// The tag components leading to a directory inode: empty for the root,
    /// `None` for nodes that aren't tag directories.
    pub fn tag_path(&self, ino: u64) -> Option<Vec<String>> {
        let inner = self.inner.read();
        let mut components = vec![];
        let mut cur = ino;
        loop {
            match inner.nodes.get(&cur)? {
                Node::Root => break,
                Node::TagDir { name, parent } => {
                    components.push(name.clone());
                    cur = *parent;
                }
                _ => return None,
            }
        }
        components.reverse();
        Some(components)
    }

    pub fn parent_of(&self, ino: u64) -> u64 {
        match self.inner.read().nodes.get(&ino) {
            Some(Node::TagDir { parent, .. }) | Some(Node::Link { parent, .. }) => *parent,
            Some(Node::QueryDir { .. }) => QUERIES_INO,
            _ => ROOT_INO,
        }
    }
}

impl Default for InodeTable {
    fn default() -> Self {
        Self::new()
    }
}
