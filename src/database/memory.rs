//! In-memory item store over a plain vector, for embedding and tests.
use super::ItemStore;
use crate::error::{StoreError, StoreResult};
use crate::models::ReviewItem;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Vec<ReviewItem>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<ReviewItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl ItemStore for MemoryStore {
    fn all_items(&self) -> StoreResult<Vec<ReviewItem>> {
        Ok(self.items.clone())
    }

    fn get_item(&self, id: &str) -> StoreResult<Option<ReviewItem>> {
        Ok(self.position(id).map(|idx| self.items[idx].clone()))
    }

    fn insert_item(&mut self, item: &ReviewItem) -> StoreResult<()> {
        if self.position(&item.id).is_some() {
            return Err(StoreError::Duplicate(item.id.clone()));
        }
        self.items.push(item.clone());
        Ok(())
    }

    fn update_scheduling(&mut self, item: &ReviewItem) -> StoreResult<()> {
        let idx = self
            .position(&item.id)
            .ok_or_else(|| StoreError::NotFound(item.id.clone()))?;
        let stored = &mut self.items[idx];
        stored.interval = item.interval;
        stored.repetition = item.repetition;
        stored.ease_factor = item.ease_factor;
        stored.next_review = item.next_review;
        Ok(())
    }

    fn delete_item(&mut self, id: &str) -> StoreResult<()> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.items.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grade, SchedulerConfig};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = MemoryStore::new();
        let item = ReviewItem::new("cześć", "hello", day(1));
        store.insert_item(&item).unwrap();

        assert_eq!(store.get_item(&item.id).unwrap(), Some(item.clone()));
        assert!(matches!(
            store.insert_item(&item),
            Err(StoreError::Duplicate(_))
        ));
    }

    #[test]
    fn test_update_only_touches_scheduling_fields() {
        let mut store = MemoryStore::new();
        let item = ReviewItem::new("cześć", "hello", day(1));
        store.insert_item(&item).unwrap();

        let mut changed = item.clone();
        changed.front = "something else".to_string();
        changed.interval = 6;
        changed.repetition = 2;
        changed.next_review = day(7);
        store.update_scheduling(&changed).unwrap();

        let stored = store.get_item(&item.id).unwrap().unwrap();
        assert_eq!(stored.front, "cześć");
        assert_eq!(stored.interval, 6);
        assert_eq!(stored.repetition, 2);
        assert_eq!(stored.next_review, day(7));
    }

    #[test]
    fn test_review_item_writes_back() {
        let mut store = MemoryStore::new();
        let item = ReviewItem::new("proszę", "please", day(1));
        store.insert_item(&item).unwrap();

        let config = SchedulerConfig::default();
        store.review_item(&item.id, Grade::Good, &config, day(1)).unwrap();
        let second = store.review_item(&item.id, Grade::Good, &config, day(2)).unwrap();

        assert_eq!(second.interval, 6);
        assert_eq!(store.get_item(&item.id).unwrap().unwrap(), second);
        assert!(store.due_items(day(7)).unwrap().is_empty());
        assert_eq!(store.due_items(day(8)).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_items() {
        let mut store = MemoryStore::new();
        let config = SchedulerConfig::default();

        assert!(matches!(
            store.review_item("nope", Grade::Easy, &config, day(1)),
            Err(StoreError::NotFound(_))
        ));
        assert!(store.delete_item("nope").is_err());
    }

    #[test]
    fn test_delete_keeps_order() {
        let items = vec![
            ReviewItem::new("a", "1", day(1)),
            ReviewItem::new("b", "2", day(1)),
            ReviewItem::new("c", "3", day(1)),
        ];
        let mut store = MemoryStore::from_items(items.clone());
        store.delete_item(&items[1].id).unwrap();

        let fronts: Vec<_> = store.items().iter().map(|i| i.front.as_str()).collect();
        assert_eq!(fronts, vec!["a", "c"]);
    }
}
