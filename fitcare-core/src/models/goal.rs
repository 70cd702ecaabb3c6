use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::workout::Workout;

/// Server-assigned goal identifier.
pub type GoalId = i64;

/// Server-assigned member identifier.
pub type MemberId = i64;

/// A calorie budget for a member, as returned by the remote service.
///
/// `kcal` is the remaining budget. The service holds the authoritative value;
/// local copies are replaced with the server's representation after every
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub goal_id: GoalId,
    pub goal_name: String,
    pub date: NaiveDate,
    pub kcal: i64,
    pub user_id: MemberId,
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

impl Goal {
    pub fn new(
        goal_id: GoalId,
        goal_name: impl Into<String>,
        date: NaiveDate,
        kcal: i64,
        user_id: MemberId,
    ) -> Self {
        Self {
            goal_id,
            goal_name: goal_name.into(),
            date,
            kcal,
            user_id,
            workouts: Vec::new(),
        }
    }

    pub fn with_workouts(mut self, workouts: Vec<Workout>) -> Self {
        self.workouts = workouts;
        self
    }

    /// Sum of the calories burned by the attached workouts.
    pub fn workout_kcal(&self) -> i64 {
        self.workouts.iter().map(Workout::total_kcal).sum()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Goal: {}", self.goal_name)?;
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(f, "Date: {}", self.date)?;
        writeln!(f, "Remaining: {} kcal", self.kcal)?;

        if !self.workouts.is_empty() {
            writeln!(f, "Workouts:")?;
            for workout in &self.workouts {
                writeln!(f, "  - {} ({} kcal)", workout.workout_name, workout.total_kcal())?;
            }
        }

        Ok(())
    }
}
