use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

/// A record that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> &str;
}

/// Stored exercise document. `owner` is written once, at insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub muscle: String,
    pub equipment: String,
    pub difficulty: String,
    pub instructions: String,
    pub owner: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Exercise {
    pub fn new(id: String, fields: NewExercise, owner: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: fields.name,
            exercise_type: fields.exercise_type,
            muscle: fields.muscle,
            equipment: fields.equipment,
            difficulty: fields.difficulty,
            instructions: fields.instructions,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `patch` and bump `updated_at`.
    pub fn apply(&mut self, patch: &ExercisePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(exercise_type) = &patch.exercise_type {
            self.exercise_type = exercise_type.clone();
        }
        if let Some(muscle) = &patch.muscle {
            self.muscle = muscle.clone();
        }
        if let Some(equipment) = &patch.equipment {
            self.equipment = equipment.clone();
        }
        if let Some(difficulty) = &patch.difficulty {
            self.difficulty = difficulty.clone();
        }
        if let Some(instructions) = &patch.instructions {
            self.instructions = instructions.clone();
        }
        self.updated_at = Utc::now();
    }
}

impl Owned for Exercise {
    fn owner_id(&self) -> &str {
        &self.owner
    }
}

/// Caller-supplied content of a new exercise. Owner and timestamps are not
/// part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub name: String,
    pub exercise_type: String,
    pub muscle: String,
    pub equipment: String,
    pub difficulty: String,
    pub instructions: String,
}

/// Partial update. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExercisePatch {
    pub name: Option<String>,
    pub exercise_type: Option<String>,
    pub muscle: Option<String>,
    pub equipment: Option<String>,
    pub difficulty: Option<String>,
    pub instructions: Option<String>,
}

impl ExercisePatch {
    /// Build a patch from a raw JSON object.
    ///
    /// Only the six content fields are picked up; anything else, `owner`
    /// included, is dropped. Content fields must hold strings.
    pub fn from_fields(mut fields: Map<String, Value>) -> Result<Self, ValidationErrors> {
        fields.remove("owner");

        let mut errors = ValidationErrors::new();
        let mut take = |key: &'static str| match fields.remove(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(_) => {
                let mut error = ValidationError::new("type");
                error.message = Some(format!("{} must be a string", key).into());
                errors.add(key, error);
                None
            }
        };

        let patch = ExercisePatch {
            name: take("name"),
            exercise_type: take("type"),
            muscle: take("muscle"),
            equipment: take("equipment"),
            difficulty: take("difficulty"),
            instructions: take("instructions"),
        };

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ExercisePatch::default()
    }
}
