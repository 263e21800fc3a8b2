//! Review session management for spaced repetition practice.
//! Walks the due items in order and hands every grade to the item store.

use super::{Grade, ReviewItem, SchedulerConfig};
use crate::database::ItemStore;
use crate::error::StoreResult;
use chrono::NaiveDate;
use tracing::info;

/// Manages a review session with multiple rounds.
/// Items graded `Again` are shown again in the following round.
pub struct ReviewSession {
    items: Vec<ReviewItem>,
    current_round: Vec<usize>,
    failed: Vec<usize>,
    current_index: usize,
    show_answer: bool,
    round_number: usize,
    reviewed: usize,
}

impl ReviewSession {
    /// Creates a session over items that are due, in the order given.
    pub fn new(due_items: Vec<ReviewItem>) -> Self {
        let current_round = (0..due_items.len()).collect();
        Self {
            items: due_items,
            current_round,
            failed: Vec::new(),
            current_index: 0,
            show_answer: false,
            round_number: 1,
            reviewed: 0,
        }
    }

    /// Starts a session over everything the store reports as due on `today`.
    pub fn from_store<S: ItemStore + ?Sized>(store: &S, today: NaiveDate) -> StoreResult<Self> {
        Ok(Self::new(store.due_items(today)?))
    }

    pub fn current_item(&self) -> Option<&ReviewItem> {
        self.current_round
            .get(self.current_index)
            .and_then(|&idx| self.items.get(idx))
    }

    pub fn show_answer(&self) -> bool {
        self.show_answer
    }

    pub fn toggle_answer(&mut self) {
        self.show_answer = !self.show_answer;
    }

    /// Grades the current item through the store and moves on.
    ///
    /// Returns the rescheduled item, or `None` once the session is complete.
    /// On a store error the session stays on the same item.
    pub fn grade_current<S: ItemStore + ?Sized>(
        &mut self,
        grade: Grade,
        config: &SchedulerConfig,
        now: NaiveDate,
        store: &mut S,
    ) -> StoreResult<Option<ReviewItem>> {
        let Some(&idx) = self.current_round.get(self.current_index) else {
            return Ok(None);
        };

        let reviewed = store.review_item(&self.items[idx].id, grade, config, now)?;
        self.items[idx] = reviewed.clone();
        self.reviewed += 1;

        if grade == Grade::Again {
            self.failed.push(idx);
        }
        self.next_item();

        Ok(Some(reviewed))
    }

    fn next_item(&mut self) {
        self.show_answer = false;
        if self.current_index + 1 < self.current_round.len() {
            self.current_index += 1;
        } else {
            self.start_next_round();
        }
    }

    /// Starts a new round with the items that were forgotten.
    /// If there are none, the session is complete.
    fn start_next_round(&mut self) {
        self.current_round = std::mem::take(&mut self.failed);
        self.current_index = 0;

        if !self.current_round.is_empty() {
            self.round_number += 1;
            info!(
                round = self.round_number,
                items = self.current_round.len(),
                "starting retry round"
            );
        }
    }

    /// Items in the current round.
    pub fn total_count(&self) -> usize {
        self.current_round.len()
    }

    /// Items in the current round not graded yet.
    pub fn remaining_count(&self) -> usize {
        self.current_round.len() - self.current_index
    }

    /// Grading actions applied so far, across all rounds.
    pub fn reviewed_count(&self) -> usize {
        self.reviewed
    }

    pub fn round_number(&self) -> usize {
        self.round_number
    }

    /// Latest known state of every item in the session.
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    pub fn is_completed(&self) -> bool {
        self.current_item().is_none()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Review): {} cards to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}
