//! A learning item together with its scheduling state.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub id: String,
    pub front: String,
    pub back: String,
    pub interval: u32,
    pub repetition: u32,
    pub ease_factor: f64,
    pub next_review: NaiveDate,
    pub created: NaiveDate,
}

impl ReviewItem {
    /// A fresh item, due on the day it is created.
    pub fn new(front: impl Into<String>, back: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            front: front.into(),
            back: back.into(),
            interval: 1,
            repetition: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review: today,
            created: today,
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review <= today
    }
}
