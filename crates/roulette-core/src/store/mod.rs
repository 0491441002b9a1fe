//! `SQLite`-backed item store.
//!
//! The store holds the single wheel menu: an ordered list of
//! `(label, weight)` rows. Reads return the list in surrogate-id order;
//! updates replace the whole list inside one transaction (delete-all +
//! insert-all), so a concurrent reader observes either the fully-old or
//! the fully-new list, never a partial one.

// SQLite returns i64 for row counts, but they're always non-negative
// here. Mutex poisoning indicates a panic in another thread, which is
// unrecoverable.
#![allow(clippy::cast_sign_loss, clippy::missing_panics_doc)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OpenFlags, params};
use thiserror::Error;

use crate::item::{Item, ValidationError, validate_items};

/// Schema SQL embedded at compile time.
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The replacement list violates a store invariant. Nothing was
    /// written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database error from `SQLite`. Any open transaction has been
    /// rolled back.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// The item store backed by `SQLite`.
///
/// The connection lives behind a mutex; every operation is a single
/// quick round trip, so contention is not a concern for this service's
/// single-request-at-a-time semantics.
pub struct SqliteItemStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteItemStore {
    /// Opens or creates an item store at the specified path.
    ///
    /// If the database doesn't exist, it is created with the appropriate
    /// schema. WAL mode is enabled for concurrent reads.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Self::initialize_connection(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Creates an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_connection(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Initialize the connection with schema and pragmas.
    fn initialize_connection(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Returns all items in stable insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all(&self) -> Result<Vec<Item>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT label, weight
             FROM items
             ORDER BY id ASC",
        )?;

        let items = stmt
            .query_map([], |row| {
                Ok(Item {
                    label: row.get(0)?,
                    weight: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Atomically replaces the stored list with `new_items`.
    ///
    /// The list is validated first (non-empty, every label non-blank,
    /// every weight >= 1); an invalid list leaves the prior list intact.
    /// Delete and inserts run in one transaction, so on any failure no
    /// partial state is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an invalid list, or
    /// [`StoreError::Database`] if the transaction fails (in which case
    /// it has been rolled back).
    pub fn replace_all(&self, new_items: &[Item]) -> Result<(), StoreError> {
        validate_items(new_items)?;

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM items", [])?;

        {
            let mut stmt = tx.prepare("INSERT INTO items (label, weight) VALUES (?1, ?2)")?;
            for item in new_items {
                stmt.execute(params![item.label, item.weight])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Returns the number of stored items.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock().unwrap();

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;

        Ok(count as u64)
    }

    /// Inserts `items` if and only if the store is currently empty.
    ///
    /// Used at startup to give a fresh database a usable default menu.
    /// The emptiness check and the inserts share one transaction, so two
    /// racing seeders cannot both insert.
    ///
    /// Returns `true` if seeding happened.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an invalid seed list, or
    /// [`StoreError::Database`] if the transaction fails.
    pub fn seed_if_empty(&self, items: &[Item]) -> Result<bool, StoreError> {
        validate_items(items)?;

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let count: i64 = tx.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(false);
        }

        {
            let mut stmt = tx.prepare("INSERT INTO items (label, weight) VALUES (?1, ?2)")?;
            for item in items {
                stmt.execute(params![item.label, item.weight])?;
            }
        }

        tx.commit()?;
        Ok(true)
    }

    /// Verifies that WAL mode is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the journal mode cannot be queried.
    pub fn verify_wal_mode(&self) -> Result<bool, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mode: String = conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))?;

        Ok(mode.to_lowercase() == "wal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<Item> {
        vec![
            Item::new("hotpot", 30),
            Item::new("salad", 15),
            Item::new("noodles", 20),
            Item::new("burger", 10),
            Item::new("ramen", 25),
        ]
    }

    #[test]
    fn replace_then_get_round_trips_in_order() {
        let store = SqliteItemStore::in_memory().unwrap();

        store.replace_all(&menu()).unwrap();

        assert_eq!(store.get_all().unwrap(), menu());
        assert_eq!(store.count().unwrap(), 5);
    }

    #[test]
    fn replace_discards_the_prior_list_wholesale() {
        let store = SqliteItemStore::in_memory().unwrap();
        store.replace_all(&menu()).unwrap();

        let smaller = vec![Item::new("sushi", 1), Item::new("tacos", 3)];
        store.replace_all(&smaller).unwrap();

        assert_eq!(store.get_all().unwrap(), smaller);
    }

    #[test]
    fn order_survives_repeated_replace_cycles() {
        let store = SqliteItemStore::in_memory().unwrap();

        // AUTOINCREMENT ids keep growing across cycles; ordering must
        // still follow insertion order within the latest list.
        for _ in 0..3 {
            store.replace_all(&menu()).unwrap();
        }

        assert_eq!(store.get_all().unwrap(), menu());
    }

    #[test]
    fn empty_replacement_is_rejected_and_prior_list_intact() {
        let store = SqliteItemStore::in_memory().unwrap();
        store.replace_all(&menu()).unwrap();

        let err = store.replace_all(&[]).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::Empty)
        ));

        assert_eq!(store.get_all().unwrap(), menu());
    }

    #[test]
    fn zero_weight_replacement_is_rejected_and_prior_list_intact() {
        let store = SqliteItemStore::in_memory().unwrap();
        store.replace_all(&menu()).unwrap();

        let bad = vec![Item::new("sushi", 2), Item::new("tacos", 0)];
        let err = store.replace_all(&bad).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        assert_eq!(store.get_all().unwrap(), menu());
    }

    #[test]
    fn get_all_on_fresh_store_is_empty() {
        let store = SqliteItemStore::in_memory().unwrap();
        assert!(store.get_all().unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn seed_if_empty_populates_a_fresh_store_once() {
        let store = SqliteItemStore::in_memory().unwrap();

        assert!(store.seed_if_empty(&menu()).unwrap());
        assert_eq!(store.get_all().unwrap(), menu());

        // A second seed is a no-op.
        assert!(!store.seed_if_empty(&[Item::new("other", 1)]).unwrap());
        assert_eq!(store.get_all().unwrap(), menu());
    }

    #[test]
    fn seed_if_empty_leaves_an_existing_list_alone() {
        let store = SqliteItemStore::in_memory().unwrap();
        let existing = vec![Item::new("sushi", 7)];
        store.replace_all(&existing).unwrap();

        assert!(!store.seed_if_empty(&menu()).unwrap());
        assert_eq!(store.get_all().unwrap(), existing);
    }

    #[test]
    fn open_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.db");

        {
            let store = SqliteItemStore::open(&path).unwrap();
            assert!(store.verify_wal_mode().unwrap());
            store.replace_all(&menu()).unwrap();
        }

        let store = SqliteItemStore::open(&path).unwrap();
        assert_eq!(store.get_all().unwrap(), menu());
    }
}
