//! Item storage.
//!
//! [`ItemStore`] is the seam between review sessions and persistence. A store
//! owns the authoritative copy of every item and applies each graded review as
//! one read-schedule-write step, so two reviews of the same item never both
//! start from the same old state.

pub mod db;
pub mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use crate::error::{StoreError, StoreResult};
use crate::models::{Grade, ReviewItem, SchedulerConfig, selector, sm2};
use chrono::NaiveDate;

pub trait ItemStore {
    /// Every stored item in insertion order.
    fn all_items(&self) -> StoreResult<Vec<ReviewItem>>;

    fn get_item(&self, id: &str) -> StoreResult<Option<ReviewItem>>;

    /// Adds a new item. Fails with [`StoreError::Duplicate`] if the id is taken.
    fn insert_item(&mut self, item: &ReviewItem) -> StoreResult<()>;

    /// Replaces interval, repetition, ease factor and next review of the stored
    /// item with the same id. Payload and creation date are left alone.
    fn update_scheduling(&mut self, item: &ReviewItem) -> StoreResult<()>;

    fn delete_item(&mut self, id: &str) -> StoreResult<()>;

    /// Grades the stored item and writes the result back.
    fn review_item(
        &mut self,
        id: &str,
        grade: Grade,
        config: &SchedulerConfig,
        now: NaiveDate,
    ) -> StoreResult<ReviewItem> {
        let current = self
            .get_item(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let next = sm2::schedule(&current, grade, config, now);
        self.update_scheduling(&next)?;
        Ok(next)
    }

    fn due_items(&self, today: NaiveDate) -> StoreResult<Vec<ReviewItem>> {
        Ok(selector::select_due(&self.all_items()?, today))
    }
}
