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

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::ThreadId;

use crate::sql;
use log::trace;
use parking_lot::{Mutex, RwLock};
use rusqlite::Connection;
use std::path::PathBuf;

// the pool is shared amongst threads, hence Arc
// Mutex + RefCell because creating a transaction requires a mutable &Connection
type ConnMap = Arc<RwLock<HashMap<ThreadId, Arc<Mutex<RefCell<Connection>>>>>>;

const TAG: &str = "db_thread_pool";

/// Lazily creates database connections with strict thread-affinity.  VFS
/// callbacks can run from whatever thread the kernel session uses; each
/// thread gets its own read connection and re-uses it.
pub struct ThreadConnPool {
    pool: ConnMap,
    db_path: PathBuf,
}

impl ThreadConnPool {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            pool: Arc::new(RwLock::new(HashMap::new())),
            db_path,
        }
    }

    pub fn raw_conn(&self) -> Connection {
        sql::get_conn(&self.db_path).expect("Couldn't create db connection")
    }

    pub fn get_conn(&self) -> Arc<Mutex<RefCell<Connection>>> {
        let tid = std::thread::current().id();
        trace!(target: TAG, "Attempting to get a db connection");

        let read_guard = self.pool.read();
        match read_guard.get(&tid) {
            // we have one already?  just clone the Arc
            Some(val) => Arc::clone(val),
            None => {
                // no race here: every thread only ever inserts under its own
                // thread id, so dropping the read lock before taking the
                // write lock can't lose an entry
                drop(read_guard);

                trace!(target: TAG, "No existing db connection, creating");
                let new_conn = Arc::new(Mutex::new(RefCell::new(self.raw_conn())));
                let mut write_guard = self.pool.write();
                write_guard.insert(tid, Arc::clone(&new_conn));
                new_conn
            }
        }
    }
}
