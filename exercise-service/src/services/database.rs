use crate::models::{Exercise, ExercisePatch, NewExercise};
use crate::services::store::ExerciseStore;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document},
    options::IndexOptions,
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for exercise-service");

        let owner_index = IndexModel::builder()
            .keys(doc! { "owner": 1 })
            .options(
                IndexOptions::builder()
                    .name("owner_lookup".to_string())
                    .build(),
            )
            .build();

        self.exercises()
            .create_index(owner_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create owner index on exercises collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on exercises.owner");

        Ok(())
    }

    pub fn exercises(&self) -> Collection<Exercise> {
        self.db.collection("exercises")
    }
}

/// `$set` document for the fields present in `patch`, plus `updatedAt`.
fn set_document(patch: &ExercisePatch) -> Document {
    let mut set = doc! { "updatedAt": BsonDateTime::from_chrono(Utc::now()) };
    let fields = [
        ("name", &patch.name),
        ("type", &patch.exercise_type),
        ("muscle", &patch.muscle),
        ("equipment", &patch.equipment),
        ("difficulty", &patch.difficulty),
        ("instructions", &patch.instructions),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            set.insert(key, value.as_str());
        }
    }
    set
}

#[async_trait]
impl ExerciseStore for MongoDb {
    async fn insert(&self, fields: NewExercise, owner: &str) -> Result<Exercise, AppError> {
        let exercise = Exercise::new(ObjectId::new().to_hex(), fields, owner.to_string());
        self.exercises().insert_one(&exercise, None).await?;
        Ok(exercise)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>, AppError> {
        Ok(self.exercises().find_one(doc! { "_id": id }, None).await?)
    }

    async fn update(&self, id: &str, patch: &ExercisePatch) -> Result<(), AppError> {
        let result = self
            .exercises()
            .update_one(doc! { "_id": id }, doc! { "$set": set_document(patch) }, None)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(anyhow::anyhow!("Exercise not found")));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = self.exercises().delete_one(doc! { "_id": id }, None).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(anyhow::anyhow!("Exercise not found")));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
