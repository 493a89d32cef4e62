pub mod exercise;

pub use exercise::{Exercise, ExercisePatch, NewExercise, Owned};
