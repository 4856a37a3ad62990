//! ReadPool: round-robin read-only connections.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use sensus_core::constants::MAX_READ_POOL_SIZE;
use sensus_core::errors::StorageError;

use super::pragmas::{apply_read_pragmas, probe};

/// A pool of read-only SQLite connections with round-robin selection.
pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    /// Open read-only connections to an existing database file.
    ///
    /// Nothing is created or written: a missing or non-database file is
    /// `ConnectionFailed`.
    pub fn open(path: &Path, pool_size: usize) -> Result<Self, StorageError> {
        Self::open_with(pool_size, || {
            Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
        })
    }

    /// Open connections to a shared-cache in-memory database by URI.
    /// Readers see the writer's data for as long as the writer stays open.
    pub fn open_shared_memory(uri: &str, pool_size: usize) -> Result<Self, StorageError> {
        Self::open_with(pool_size, || {
            Connection::open_with_flags(
                uri,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
        })
    }

    fn open_with<F>(pool_size: usize, open: F) -> Result<Self, StorageError>
    where
        F: Fn() -> rusqlite::Result<Connection>,
    {
        let size = pool_size.clamp(1, MAX_READ_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = open().map_err(|e| StorageError::ConnectionFailed {
                message: e.to_string(),
            })?;
            probe(&conn)?;
            apply_read_pragmas(&conn)?;
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Execute a closure with a read connection (round-robin).
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let guard = self.connections[idx]
            .lock()
            .map_err(|_| StorageError::SqliteError {
                message: "read pool lock poisoned".to_string(),
            })?;
        f(&guard)
    }

    pub fn size(&self) -> usize {
        self.connections.len()
    }
}
