//! Connection management: write-serialized + read-pooled.

pub mod pool;
pub mod pragmas;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use sensus_core::errors::StorageError;
use sensus_core::types::{AggregationReport, ColumnSpec, CongregantRecord, EvolutionOutcome};

use self::pool::ReadPool;
use self::pragmas::{apply_pragmas, probe};
use crate::{aggregation, evolution, queries, schema};

static MEMORY_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Owns the single write connection and the read connection pool.
///
/// Opening bootstraps the base `congregants` table only; columns arrive
/// through [`DatabaseManager::evolve`].
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: ReadPool,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database file, apply pragmas, bootstrap the base table.
    pub fn open(path: &Path, read_pool_size: usize) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(|e| StorageError::ConnectionFailed {
            message: format!("{}: {e}", path.display()),
        })?;
        probe(&writer)?;
        apply_pragmas(&writer)?;
        schema::bootstrap(&writer)?;

        let readers = ReadPool::open(path, read_pool_size)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database (for testing).
    ///
    /// Uses a uniquely named shared-cache URI so pooled readers observe the
    /// writer's data.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let n = MEMORY_DB_COUNTER.fetch_add(1, Ordering::Relaxed);
        let uri = format!(
            "file:sensus-mem-{}-{n}?mode=memory&cache=shared",
            std::process::id()
        );
        let writer = Connection::open_with_flags(
            &uri,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StorageError::ConnectionFailed {
            message: e.to_string(),
        })?;
        apply_pragmas(&writer)?;
        schema::bootstrap(&writer)?;

        let readers = ReadPool::open_shared_memory(&uri, 1)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            path: None,
        })
    }

    /// Execute a write operation with the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "write lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Execute a read operation with a pooled read connection.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        self.readers.with_conn(f)
    }

    /// Apply column specs in order on the writer connection.
    pub fn evolve(&self, specs: &[ColumnSpec]) -> Result<Vec<EvolutionOutcome>, StorageError> {
        self.with_writer(|conn| evolution::apply_with(conn, specs))
    }

    /// Build a fresh census report on a pooled reader.
    pub fn summarize(&self) -> Result<AggregationReport, StorageError> {
        self.with_reader(aggregation::summarize)
    }

    /// Register a congregant. Returns the store-assigned id.
    pub fn register(&self, record: &CongregantRecord) -> Result<i64, StorageError> {
        self.with_writer(|conn| queries::congregants::insert_congregant(conn, record))
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn reader_count(&self) -> usize {
        self.readers.size()
    }
}
