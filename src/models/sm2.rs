//! SM-2 style spaced repetition scheduling with configurable parameters.
//!
//! Every review moves an item through the same steps:
//! - `Again` resets the repetition count and scales the interval by `again_multiplier`
//! - `Hard` scales the interval by `hard_multiplier` and lowers the ease factor
//! - `Good` and `Easy` use fixed onboarding intervals for the first two repetitions
//!   (`initial_interval`, then `second_interval`), then grow by the ease factor
//! - `Easy` raises the ease factor and adds `easy_multiplier` on top of it
//!
//! Afterwards the interval is clamped to `[min_interval, max_interval]`, the ease
//! factor to `[min_ease_factor, max_ease_factor]`, and the next review lands
//! `interval` days after `now`.

use super::{Grade, ReviewItem, SchedulerConfig};
use chrono::{Days, NaiveDate};

/// Computes the state of `item` after it was reviewed with `grade` on `now`.
///
/// Rounding is half away from zero (`f64::round`) and happens before clamping.
/// The ease factor used for interval growth is the one the item had before
/// this review.
pub fn schedule(
    item: &ReviewItem,
    grade: Grade,
    config: &SchedulerConfig,
    now: NaiveDate,
) -> ReviewItem {
    let ease = item.ease_factor;
    let adjustment = &config.ease_factor_adjustment;

    let (raw_interval, repetition, new_ease) = match grade {
        Grade::Again => (scale(item.interval, config.again_multiplier), 0, ease),
        Grade::Hard => (
            scale(item.interval, config.hard_multiplier),
            item.repetition.saturating_add(1),
            ease + adjustment.hard,
        ),
        Grade::Good => {
            let repetition = item.repetition.saturating_add(1);
            let interval = tiered_interval(item, repetition, config.good_multiplier, config);
            (interval, repetition, ease)
        }
        Grade::Easy => {
            let repetition = item.repetition.saturating_add(1);
            let interval = tiered_interval(item, repetition, config.easy_multiplier, config);
            (interval, repetition, ease + adjustment.easy)
        }
    };

    let interval = clamp_interval(raw_interval, config);

    ReviewItem {
        interval,
        repetition,
        ease_factor: clamp_ease(new_ease, config),
        next_review: add_days(now, interval),
        ..item.clone()
    }
}

fn tiered_interval(
    item: &ReviewItem,
    repetition: u32,
    grade_multiplier: f64,
    config: &SchedulerConfig,
) -> f64 {
    match repetition {
        1 => config.initial_interval as f64,
        2 => config.second_interval as f64,
        _ => scale(item.interval, item.ease_factor * grade_multiplier),
    }
}

fn scale(interval: u32, factor: f64) -> f64 {
    (interval as f64 * factor).round()
}

// f64::max/min discard a NaN operand, so a NaN product still lands in range.
fn clamp_interval(raw: f64, config: &SchedulerConfig) -> u32 {
    raw.max(config.min_interval as f64)
        .min(config.max_interval as f64) as u32
}

fn clamp_ease(ease: f64, config: &SchedulerConfig) -> f64 {
    ease.max(config.min_ease_factor).min(config.max_ease_factor)
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(days as u64))
        .unwrap_or(NaiveDate::MAX)
}
