//! SQLite-backed item store
//!
//! Handles database initialization, CRUD operations for review items,
//! the persisted scheduler config and the simulated current date.

use super::ItemStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{Grade, ReviewItem, SchedulerConfig, sm2};
use chrono::{Days, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const CONFIG_KEY: &str = "scheduler_config";
const CURRENT_DATE_KEY: &str = "current_date";

/// How long a connection waits for another writer before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const ITEM_COLUMNS: &str =
    "id, front, back, interval, repetition, ease_factor, next_review, created";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file and makes sure all tables exist.
    ///
    /// The simulated current date starts at `today` the first time a file is
    /// initialized and is kept afterwards.
    pub fn open(path: impl AsRef<Path>, today: NaiveDate) -> StoreResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        info!(path = %path.as_ref().display(), "opened item database");
        Self::init(conn, today)
    }

    pub fn open_in_memory(today: NaiveDate) -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?, today)
    }

    fn init(conn: Connection, today: NaiveDate) -> StoreResult<Self> {
        // seq keeps insertion order independent of the textual id
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS items (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                front TEXT NOT NULL,
                back TEXT NOT NULL,
                interval INTEGER NOT NULL DEFAULT 1,
                repetition INTEGER NOT NULL DEFAULT 0,
                ease_factor REAL NOT NULL DEFAULT 2.5,
                next_review TEXT NOT NULL,
                created TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS items_next_review ON items(next_review);
            CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;

        conn.execute(
            "INSERT OR IGNORE INTO app_state (key, value) VALUES (?1, ?2)",
            params![CURRENT_DATE_KEY, today],
        )?;

        Ok(Self { conn })
    }

    /// Retrieves the simulated current date.
    pub fn current_date(&self) -> StoreResult<NaiveDate> {
        let value: NaiveDate = self.conn.query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![CURRENT_DATE_KEY],
            |row| row.get(0),
        )?;
        Ok(value)
    }

    pub fn set_current_date(&self, date: NaiveDate) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
            params![CURRENT_DATE_KEY, date],
        )?;
        Ok(())
    }

    /// Moves the simulated date one day forward and returns it.
    pub fn advance_day(&self) -> StoreResult<NaiveDate> {
        let current = self.current_date()?;
        let next = current
            .checked_add_days(Days::new(1))
            .ok_or_else(|| StoreError::InvalidValue(format!("cannot advance past {current}")))?;
        self.set_current_date(next)?;
        info!(%next, "advanced current date");
        Ok(next)
    }

    /// The persisted scheduler config, or the default if none was saved yet.
    pub fn load_config(&self) -> StoreResult<SchedulerConfig> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![CONFIG_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Ok(SchedulerConfig::from_json_str(&raw)?),
            None => Ok(SchedulerConfig::default()),
        }
    }

    /// Validates and persists a config, replacing the previous one wholesale.
    pub fn save_config(&self, config: &SchedulerConfig) -> StoreResult<()> {
        let config = config.clone().validate()?;
        let raw = serde_json::to_string(&config)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
            params![CONFIG_KEY, raw],
        )?;
        info!("saved scheduler config");
        Ok(())
    }
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<ReviewItem> {
    Ok(ReviewItem {
        id: row.get(0)?,
        front: row.get(1)?,
        back: row.get(2)?,
        interval: row.get(3)?,
        repetition: row.get(4)?,
        ease_factor: row.get(5)?,
        next_review: row.get(6)?,
        created: row.get(7)?,
    })
}

fn select_item(conn: &Connection, id: &str) -> StoreResult<Option<ReviewItem>> {
    let item = conn
        .query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
            params![id],
            item_from_row,
        )
        .optional()?;
    Ok(item)
}

fn write_scheduling(conn: &Connection, item: &ReviewItem) -> StoreResult<()> {
    let changed = conn.execute(
        "UPDATE items
         SET interval = ?1, repetition = ?2, ease_factor = ?3, next_review = ?4
         WHERE id = ?5",
        params![
            item.interval,
            item.repetition,
            item.ease_factor,
            item.next_review,
            item.id
        ],
    )?;

    if changed == 0 {
        return Err(StoreError::NotFound(item.id.clone()));
    }
    Ok(())
}

impl ItemStore for SqliteStore {
    fn all_items(&self) -> StoreResult<Vec<ReviewItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY seq"))?;
        let items = stmt
            .query_map([], item_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn get_item(&self, id: &str) -> StoreResult<Option<ReviewItem>> {
        select_item(&self.conn, id)
    }

    fn insert_item(&mut self, item: &ReviewItem) -> StoreResult<()> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO items (id, front, back, interval, repetition, ease_factor, next_review, created)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.id,
                item.front,
                item.back,
                item.interval,
                item.repetition,
                item.ease_factor,
                item.next_review,
                item.created
            ],
        )?;

        if inserted == 0 {
            return Err(StoreError::Duplicate(item.id.clone()));
        }
        info!(id = %item.id, "added item");
        Ok(())
    }

    fn update_scheduling(&mut self, item: &ReviewItem) -> StoreResult<()> {
        write_scheduling(&self.conn, item)
    }

    fn delete_item(&mut self, id: &str) -> StoreResult<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        info!(id, "deleted item");
        Ok(())
    }

    /// Runs the read-schedule-write cycle inside an IMMEDIATE transaction so
    /// concurrent reviews of one item (from other connections) queue up
    /// behind each other.
    fn review_item(
        &mut self,
        id: &str,
        grade: Grade,
        config: &SchedulerConfig,
        now: NaiveDate,
    ) -> StoreResult<ReviewItem> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = select_item(&tx, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let next = sm2::schedule(&current, grade, config, now);
        write_scheduling(&tx, &next)?;
        tx.commit()?;

        debug!(
            id,
            %grade,
            interval = next.interval,
            repetition = next.repetition,
            ease_factor = next.ease_factor,
            next_review = %next.next_review,
            "reviewed item"
        );
        Ok(next)
    }

    fn due_items(&self, today: NaiveDate) -> StoreResult<Vec<ReviewItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE next_review <= ?1 ORDER BY seq"
        ))?;
        let items = stmt
            .query_map(params![today], item_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }
}
