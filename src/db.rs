//! Database module for the fridge bot
//!
//! Provides persistence for grocery items. One row per item; the name is the
//! identity and is normalized before every read and write.

mod schema;

pub use schema::*;

use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // A panic while holding the lock cannot leave a half-applied statement
    // behind, so a poisoned connection is still usable.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Item Operations ====================

    /// Add an item to the fridge or the shopping list.
    ///
    /// Returns `false` when an item with the same normalized name already
    /// exists in either location.
    pub fn add_item(&self, name: &str, to_fridge: bool) -> DbResult<bool> {
        self.add_item_on(name, to_fridge, today())
    }

    /// Add an item, stamping fridge items with `date`
    pub fn add_item_on(&self, name: &str, to_fridge: bool, date: NaiveDate) -> DbResult<bool> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Ok(false);
        }
        let added_date = to_fridge.then(|| date.format(DATE_FORMAT).to_string());

        let inserted = self.conn().execute(
            "INSERT INTO products (name, in_fridge, added_date) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO NOTHING",
            params![name, to_fridge, added_date],
        )?;

        tracing::debug!(name = %name, to_fridge, inserted = inserted > 0, "add item");
        Ok(inserted > 0)
    }

    /// Delete an item from whichever list holds it
    pub fn remove_item(&self, name: &str) -> DbResult<bool> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Ok(false);
        }

        let deleted = self
            .conn()
            .execute("DELETE FROM products WHERE name = ?1", params![name])?;

        tracing::debug!(name = %name, deleted = deleted > 0, "remove item");
        Ok(deleted > 0)
    }

    /// Names of everything currently in the fridge, oldest first
    pub fn list_fridge(&self) -> DbResult<Vec<String>> {
        self.list_names(Location::Fridge)
    }

    /// Names of everything on the shopping list, oldest first
    pub fn list_shopping(&self) -> DbResult<Vec<String>> {
        self.list_names(Location::Shopping)
    }

    fn list_names(&self, location: Location) -> DbResult<Vec<String>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT name FROM products WHERE in_fridge = ?1 ORDER BY id ASC")?;

        let rows = stmt.query_map(params![location.in_fridge()], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Move an item from the shopping list into the fridge.
    ///
    /// Returns `true` only when the item exists and was on the shopping list.
    /// The check and the update happen in one statement.
    pub fn mark_bought(&self, name: &str) -> DbResult<bool> {
        self.mark_bought_on(name, today())
    }

    /// Mark an item bought, stamping it with `date`
    pub fn mark_bought_on(&self, name: &str, date: NaiveDate) -> DbResult<bool> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Ok(false);
        }

        let updated = self.conn().execute(
            "UPDATE products SET in_fridge = 1, added_date = ?1
             WHERE name = ?2 AND in_fridge = 0",
            params![date.format(DATE_FORMAT).to_string(), name],
        )?;

        tracing::debug!(name = %name, updated = updated > 0, "mark bought");
        Ok(updated > 0)
    }

    /// Look up a single item by name
    #[allow(dead_code)] // Used in tests
    pub fn get_item(&self, name: &str) -> DbResult<Option<Item>> {
        let name = normalize_name(name);
        let conn = self.conn();
        conn.query_row(
            "SELECT name, in_fridge, added_date FROM products WHERE name = ?1",
            params![name],
            |row| {
                Ok(Item {
                    name: row.get(0)?,
                    in_fridge: row.get(1)?,
                    added_date: row
                        .get::<_, Option<String>>(2)?
                        .as_deref()
                        .and_then(parse_date),
                })
            },
        )
        .optional()
        .map_err(DbError::from)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}
