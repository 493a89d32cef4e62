use crate::models::{Exercise, ExercisePatch, NewExercise};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Persistence for exercise records. The store assigns identifiers and
/// manages both timestamps.
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    async fn insert(&self, fields: NewExercise, owner: &str) -> Result<Exercise, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>, AppError>;
    async fn update(&self, id: &str, patch: &ExercisePatch) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn health_check(&self) -> Result<(), AppError>;
}

/// Process-local store for development and tests.
#[derive(Default)]
pub struct InMemoryExerciseStore {
    exercises: RwLock<HashMap<String, Exercise>>,
}

impl InMemoryExerciseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExerciseStore for InMemoryExerciseStore {
    async fn insert(&self, fields: NewExercise, owner: &str) -> Result<Exercise, AppError> {
        let exercise = Exercise::new(ObjectId::new().to_hex(), fields, owner.to_string());
        self.exercises
            .write()
            .await
            .insert(exercise.id.clone(), exercise.clone());
        Ok(exercise)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>, AppError> {
        Ok(self.exercises.read().await.get(id).cloned())
    }

    async fn update(&self, id: &str, patch: &ExercisePatch) -> Result<(), AppError> {
        let mut exercises = self.exercises.write().await;
        let exercise = exercises
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Exercise not found")))?;
        exercise.apply(patch);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.exercises
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Exercise not found")))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
