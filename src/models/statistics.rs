//! Aggregate progress numbers over a collection of items.
use super::ReviewItem;
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Repetition count from which an item counts as mastered.
pub const MASTERED_REPETITIONS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub new: usize,
    pub studied: usize,
    pub learning: usize,
    pub mastered: usize,
    pub average_ease_factor: f64,
    pub due_today: usize,
    pub due_this_week: usize,
    /// Percentage of items reviewed at least once, rounded.
    pub completion_rate: u32,
}

impl Statistics {
    pub fn from_items(items: &[ReviewItem], today: NaiveDate) -> Self {
        let total = items.len();
        let studied = items.iter().filter(|item| item.repetition > 0).count();
        let mastered = items
            .iter()
            .filter(|item| item.repetition >= MASTERED_REPETITIONS)
            .count();

        let average_ease_factor = if total > 0 {
            items.iter().map(|item| item.ease_factor).sum::<f64>() / total as f64
        } else {
            0.0
        };

        let week_end = today.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX);
        let due_today = items.iter().filter(|item| item.next_review == today).count();
        let due_this_week = items
            .iter()
            .filter(|item| item.next_review <= week_end)
            .count();

        let completion_rate = if total > 0 {
            (studied as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total,
            new: total - studied,
            studied,
            learning: studied - mastered,
            mastered,
            average_ease_factor,
            due_today,
            due_this_week,
            completion_rate,
        }
    }
}
