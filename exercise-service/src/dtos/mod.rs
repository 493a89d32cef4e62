pub mod exercises;

pub use exercises::{
    CreateExerciseRequest, ExerciseEnvelope, ExerciseInput, ExerciseResponse, SearchParams,
    UpdateExerciseRequest,
};
