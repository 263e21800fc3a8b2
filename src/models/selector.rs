//! Picking items out of a collection: due items for a session, text search for management.
use super::ReviewItem;
use chrono::NaiveDate;

/// Items whose next review is on or before `today`, in collection order.
pub fn select_due(items: &[ReviewItem], today: NaiveDate) -> Vec<ReviewItem> {
    items
        .iter()
        .filter(|item| item.is_due(today))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on either side of the card.
/// An empty or blank term matches everything.
pub fn search<'a>(items: &'a [ReviewItem], term: &str) -> Vec<&'a ReviewItem> {
    let needle = term.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item.front.to_lowercase().contains(&needle)
                || item.back.to_lowercase().contains(&needle)
        })
        .collect()
}
