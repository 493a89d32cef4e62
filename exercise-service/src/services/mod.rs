pub mod database;
pub mod exercise_api;
pub mod metrics;
pub mod ownership;
pub mod store;

pub use database::MongoDb;
pub use exercise_api::ExerciseApiClient;
pub use self::metrics::{get_metrics, init_metrics};
pub use ownership::require_ownership;
pub use store::{ExerciseStore, InMemoryExerciseStore};
