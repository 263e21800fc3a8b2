pub mod grade;
pub mod review_item;
pub mod review_session;
pub mod scheduler_config;
pub mod selector;
pub mod sm2;
pub mod statistics;

pub use grade::Grade;
pub use review_item::ReviewItem;
pub use review_session::ReviewSession;
pub use scheduler_config::{EaseFactorAdjustment, SchedulerConfig};
pub use statistics::Statistics;
