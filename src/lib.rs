pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use database::{ItemStore, MemoryStore, SqliteStore};
pub use error::{ConfigError, StoreError};
pub use models::{Grade, ReviewItem, ReviewSession, SchedulerConfig, Statistics, sm2::schedule};
