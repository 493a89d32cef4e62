pub mod exercises;
pub mod health;
pub mod search;

pub use exercises::{create_exercise, delete_exercise, update_exercise};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use search::{lookup_exercise, search_exercises};
