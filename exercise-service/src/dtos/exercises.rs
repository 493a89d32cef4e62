use crate::models::{Exercise, NewExercise};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExerciseRequest {
    #[validate(nested)]
    pub exercise: ExerciseInput,
}

/// Body of a create request. A client-supplied `owner` is not deserialized.
#[derive(Debug, Deserialize, Validate)]
pub struct ExerciseInput {
    #[validate(required, length(min = 1, message = "name is required"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[validate(required, length(min = 1, message = "type is required"))]
    pub exercise_type: Option<String>,
    #[validate(required, length(min = 1, message = "muscle is required"))]
    pub muscle: Option<String>,
    #[validate(required, length(min = 1, message = "equipment is required"))]
    pub equipment: Option<String>,
    #[validate(required, length(min = 1, message = "difficulty is required"))]
    pub difficulty: Option<String>,
    #[validate(required, length(min = 1, message = "instructions is required"))]
    pub instructions: Option<String>,
}

impl ExerciseInput {
    /// Convert a validated input. Returns `None` if a field is missing, which
    /// `validate()` has already ruled out.
    pub fn into_new_exercise(self) -> Option<NewExercise> {
        Some(NewExercise {
            name: self.name?,
            exercise_type: self.exercise_type?,
            muscle: self.muscle?,
            equipment: self.equipment?,
            difficulty: self.difficulty?,
            instructions: self.instructions?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateExerciseRequest {
    pub exercise: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct ExerciseEnvelope {
    pub exercise: ExerciseResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResponse {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Exercise> for ExerciseResponse {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name,
            exercise_type: exercise.exercise_type,
            muscle: exercise.muscle,
            equipment: exercise.equipment,
            difficulty: exercise.difficulty,
            instructions: exercise.instructions,
            owner: exercise.owner,
            created_at: exercise.created_at,
            updated_at: exercise.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_empty_fields_fail_validation() {
        let request: CreateExerciseRequest = serde_json::from_value(json!({
            "exercise": { "name": "", "type": "strength", "muscle": "legs" }
        }))
        .unwrap();

        let err = request.validate().unwrap_err().to_string();
        assert!(err.contains("name"));
        assert!(err.contains("equipment"));
        assert!(err.contains("instructions"));
    }

    #[test]
    fn complete_input_converts() {
        let request: CreateExerciseRequest = serde_json::from_value(json!({
            "exercise": {
                "name": "Squat",
                "type": "strength",
                "muscle": "legs",
                "equipment": "barbell",
                "difficulty": "medium",
                "instructions": "...",
                "owner": "someone-else"
            }
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        let new_exercise = request.exercise.into_new_exercise().unwrap();
        assert_eq!(new_exercise.exercise_type, "strength");
    }
}
