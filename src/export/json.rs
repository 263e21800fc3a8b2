//! JSON import/export of item collections.
//! Dates are written as plain `YYYY-MM-DD` so they survive any time zone.

use crate::error::StoreResult;
use crate::models::ReviewItem;
use std::fs;
use std::path::Path;
use tracing::info;

/// Exports items to a pretty-printed JSON file at the specified path.
pub fn export_json_to_path(items: &[ReviewItem], path: impl AsRef<Path>) -> StoreResult<()> {
    let json_string = serde_json::to_string_pretty(items)?;
    fs::write(path.as_ref(), json_string)?;
    info!(count = items.len(), path = %path.as_ref().display(), "exported items");
    Ok(())
}

/// Imports items from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(path: impl AsRef<Path>) -> StoreResult<Vec<ReviewItem>> {
    let contents = fs::read_to_string(path.as_ref())?;
    let items: Vec<ReviewItem> = serde_json::from_str(&contents)?;
    info!(count = items.len(), path = %path.as_ref().display(), "imported items");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::NaiveDate;

    fn create_test_items() -> Vec<ReviewItem> {
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let mut second = ReviewItem::new("goodbye", "do widzenia", today);
        second.interval = 6;
        second.repetition = 2;
        second.ease_factor = 2.35;
        second.next_review = NaiveDate::from_ymd_opt(2024, 7, 7).unwrap();
        vec![ReviewItem::new("hello", "cześć", today), second]
    }

    #[test]
    fn test_export_and_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let original = create_test_items();

        export_json_to_path(&original, &path).unwrap();
        let imported = import_json(&path).unwrap();

        assert_eq!(imported, original);
    }

    #[test]
    fn test_import_json() {
        let json_content = r#"[
  {
    "id": "1700000000000",
    "front": "test term",
    "back": "test definition",
    "interval": 15,
    "repetition": 3,
    "easeFactor": 2.5,
    "nextReview": "2024-08-16",
    "created": "2024-07-01"
  }
]"#;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.json");
        fs::write(&path, json_content).unwrap();

        let items = import_json(&path).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].front, "test term");
        assert_eq!(items[0].interval, 15);
        assert_eq!(
            items[0].next_review,
            NaiveDate::from_ymd_opt(2024, 8, 16).unwrap()
        );
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_json(dir.path().join("nonexistent_file_xyz123.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_json(&path), Err(StoreError::Json(_))));
    }
}
