use serde::{Deserialize, Serialize};
use std::fmt;

pub type WorkoutId = i64;

/// A single exercise inside a workout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub exercise_id: i64,
    pub exercise_name: String,
    #[serde(default)]
    pub exercise_level: Option<String>,
    #[serde(default)]
    pub body_part: Option<String>,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
    /// Calories burned; older records may leave this empty.
    #[serde(default)]
    pub kcal: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Exercise {
    pub fn new(exercise_id: i64, exercise_name: impl Into<String>, kcal: i64) -> Self {
        Self {
            exercise_id,
            exercise_name: exercise_name.into(),
            exercise_level: None,
            body_part: None,
            image_url: None,
            kcal: Some(kcal),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub workout_id: WorkoutId,
    pub workout_name: String,
    /// Duration in minutes
    pub time: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Workout {
    pub fn new(workout_id: WorkoutId, workout_name: impl Into<String>, time: i64) -> Self {
        Self {
            workout_id,
            workout_name: workout_name.into(),
            time,
            description: String::new(),
            exercises: Vec::new(),
        }
    }

    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self
    }

    /// Total calories of all exercises; exercises without a value count as zero.
    pub fn total_kcal(&self) -> i64 {
        self.exercises.iter().map(|e| e.kcal.unwrap_or(0)).sum()
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} min, {} kcal)",
            self.workout_name,
            self.time,
            self.total_kcal()
        )?;
        for exercise in &self.exercises {
            match exercise.kcal {
                Some(kcal) => writeln!(f, "  - {} ({} kcal)", exercise.exercise_name, kcal)?,
                None => writeln!(f, "  - {}", exercise.exercise_name)?,
            }
        }
        Ok(())
    }
}
