use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use super::error::StoreError;

/**
    Persistent package metadata store with a bounded row count.

    One row per package name, holding the raw serialized metadata blob
    and a last-access timestamp. Both reads and writes refresh the
    timestamp, and every write is followed by an eviction pass that
    drops the least-recently-touched rows beyond `max_count`.

    The backing database is opened lazily on first use, so the store
    stays usable after `clear_all` - the next operation simply
    recreates the file and schema.
*/
#[derive(Debug, Clone)]
pub struct PackageStore {
    path: PathBuf,
    max_count: i64,
    conn: Arc<Mutex<Option<Connection>>>,
}

impl PackageStore {
    /**
        Creates a store over the database file at `path`.

        No I/O happens here - the file is opened on first access.
        A `max_count` of zero or less disables eviction.
    */
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, max_count: i64) -> Self {
        Self {
            path: path.into(),
            max_count,
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /**
        Looks up the stored blob for `name`.

        A hit refreshes the row's last-access timestamp before
        returning. A miss is `Ok(None)` - an expected outcome,
        not an error.
    */
    pub fn get(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let now = now_timestamp();
        self.with_conn(|conn| {
            let blob: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT data FROM packages WHERE name = ?1",
                    params![name],
                    |row| row.get(0),
                )
                .optional()?;

            if blob.is_some() {
                conn.execute(
                    "UPDATE packages SET updated_at = ?1 WHERE name = ?2",
                    params![now, name],
                )?;
            }

            Ok(blob)
        })
    }

    /**
        Inserts (or replaces) the blob for `name` with a fresh
        timestamp, then runs the eviction pass.
    */
    pub fn put(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
        let now = now_timestamp();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO packages (name, data, updated_at) VALUES (?1, ?2, ?3)",
                params![name, data, now],
            )?;
            Ok(())
        })?;

        self.evict_excess(self.max_count)?;

        Ok(())
    }

    /**
        Deletes every row except the `max_count` most recently touched.

        Returns the number of rows removed. Does nothing when
        `max_count` is zero or less, or when the store is within
        bounds already.
    */
    pub fn evict_excess(&self, max_count: i64) -> Result<usize, StoreError> {
        if max_count <= 0 {
            return Ok(0);
        }

        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM packages", [], |row| row.get(0))?;
            if count <= max_count {
                return Ok(0);
            }

            // Timestamp resolution is seconds, so ties are broken by
            // rowid - the most recently inserted of the tied rows win.
            let deleted = conn.execute(
                "DELETE FROM packages WHERE name NOT IN (
                    SELECT name FROM packages
                        ORDER BY updated_at DESC, rowid DESC LIMIT ?1
                )",
                params![max_count],
            )?;

            debug!("Evicted {deleted} package records over the limit of {max_count}");

            Ok(deleted)
        })
    }

    /// Returns the current number of stored records.
    pub fn count(&self) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM packages", [], |row| row.get(0))?)
        })
    }

    /**
        Destroys the entire backing store file.

        The live connection is closed first. Any subsequent operation
        recreates the database and schema from scratch.
    */
    pub fn clear_all(&self) -> Result<(), StoreError> {
        let mut guard = self.conn.lock().map_err(|_| StoreError::Poisoned)?;

        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| StoreError::Database(e))?;
        }

        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed cache database at '{}'", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.conn.lock().map_err(|_| StoreError::Poisoned)?;

        if guard.is_none() {
            *guard = Some(open_database(&self.path)?);
        }

        // Guard was just filled if it was empty
        let conn = guard.as_ref().ok_or(StoreError::Poisoned)?;

        f(conn)
    }
}

fn open_database(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

    ensure_schema(&conn)?;

    Ok(conn)
}

fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS packages (
            name TEXT PRIMARY KEY,
            data BLOB NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_packages_updated_at
            ON packages(updated_at);",
    )?;

    Ok(())
}

fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store(max_count: i64) -> (TempDir, PackageStore) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("packages.sqlite3");
        (temp, PackageStore::open(path, max_count))
    }

    fn raw_conn(store: &PackageStore) -> Connection {
        Connection::open(&store.path).unwrap()
    }

    fn backdate(store: &PackageStore, name: &str, updated_at: i64) {
        raw_conn(store)
            .execute(
                "UPDATE packages SET updated_at = ?1 WHERE name = ?2",
                params![updated_at, name],
            )
            .unwrap();
    }

    fn stored_names(store: &PackageStore) -> Vec<String> {
        let conn = raw_conn(store);
        let mut stmt = conn.prepare("SELECT name FROM packages ORDER BY name").unwrap();
        let rows = stmt.query_map([], |row| row.get(0)).unwrap();
        rows.map(Result::unwrap).collect()
    }

    #[test]
    fn miss_returns_none() {
        let (_temp, store) = create_test_store(10);

        assert!(store.get("sample").unwrap().is_none());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn put_then_get_roundtrips() {
        let (_temp, store) = create_test_store(10);

        store.put("sample", b"{\"info\":{}}").unwrap();

        let blob = store.get("sample").unwrap();
        assert_eq!(blob.as_deref(), Some(b"{\"info\":{}}".as_slice()));
    }

    #[test]
    fn put_replaces_existing_row() {
        let (_temp, store) = create_test_store(10);

        store.put("sample", b"old").unwrap();
        store.put("sample", b"new").unwrap();

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.get("sample").unwrap().as_deref(), Some(b"new".as_slice()));
    }

    #[test]
    fn hit_refreshes_timestamp() {
        let (_temp, store) = create_test_store(10);

        store.put("sample", b"data").unwrap();
        backdate(&store, "sample", 1000);

        store.get("sample").unwrap();

        let updated_at: i64 = raw_conn(&store)
            .query_row(
                "SELECT updated_at FROM packages WHERE name = 'sample'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(updated_at > 1000);
    }

    #[test]
    fn eviction_keeps_row_count_bounded() {
        let (_temp, store) = create_test_store(30);

        for i in 0..100 {
            store.put(&format!("package-{i}"), b"data").unwrap();
        }

        assert_eq!(store.count().unwrap(), 30);
    }

    #[test]
    fn eviction_keeps_most_recently_touched() {
        let (_temp, store) = create_test_store(0);

        for i in 0..100 {
            let name = format!("package-{i}");
            store.put(&name, b"data").unwrap();
            backdate(&store, &name, 1000 + i);
        }

        let deleted = store.evict_excess(30).unwrap();
        assert_eq!(deleted, 70);

        let survivors = stored_names(&store);
        assert_eq!(survivors.len(), 30);
        for i in 70..100 {
            assert!(survivors.contains(&format!("package-{i}")));
        }
    }

    #[test]
    fn read_refresh_affects_eviction_order() {
        let (_temp, store) = create_test_store(0);

        for i in 0..15 {
            let name = format!("n{}", i + 1);
            store.put(&name, b"data").unwrap();
            backdate(&store, &name, 1000 + i);
        }

        // The read bumps n1 to now, far beyond the backdated rows
        store.get("n1").unwrap();
        store.evict_excess(10).unwrap();

        let survivors = stored_names(&store);
        assert_eq!(survivors.len(), 10);
        assert!(survivors.contains(&"n1".to_string()));
        for i in 2..=6 {
            assert!(!survivors.contains(&format!("n{i}")));
        }
    }

    #[test]
    fn zero_max_count_disables_eviction() {
        let (_temp, store) = create_test_store(0);

        for i in 0..50 {
            store.put(&format!("package-{i}"), b"data").unwrap();
        }

        assert_eq!(store.count().unwrap(), 50);
        assert_eq!(store.evict_excess(0).unwrap(), 0);
        assert_eq!(store.evict_excess(-1).unwrap(), 0);
    }

    #[test]
    fn clear_all_removes_backing_file() {
        let (_temp, store) = create_test_store(10);

        store.put("sample", b"data").unwrap();
        assert!(store.path.exists());

        store.clear_all().unwrap();
        assert!(!store.path.exists());

        // The next operation recreates an empty store with the same schema
        assert!(store.get("sample").unwrap().is_none());
        store.put("sample", b"data").unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn clear_all_on_untouched_store_is_fine() {
        let (_temp, store) = create_test_store(10);
        store.clear_all().unwrap();
    }
}
