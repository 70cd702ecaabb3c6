//! Remote fitness service contract.
//!
//! The service owns goals, workouts and product data. The ledger only needs a
//! small slice of it:
//! - read the current goal for a member on a date
//! - partially update a goal's kcal, receiving the full goal back
//! - search products by name, paginated
//! - attach/detach workouts to a goal

mod client;
mod error;

use async_trait::async_trait;
use chrono::NaiveDate;

pub use client::{HttpGoalApi, DEFAULT_TIMEOUT};
pub use error::ApiError;

use crate::models::{Goal, GoalId, MemberId, ProductPage, Workout, WorkoutId};

#[async_trait]
pub trait GoalApi: Send + Sync {
    async fn current_goal(&self, member_id: MemberId, date: NaiveDate) -> Result<Goal, ApiError>;

    /// Sets the goal's remaining kcal to an absolute value.
    async fn update_goal_kcal(&self, goal_id: GoalId, kcal: i64) -> Result<Goal, ApiError>;

    async fn search_products(&self, name: &str, page: u32) -> Result<ProductPage, ApiError>;

    async fn add_workout_to_goal(
        &self,
        goal_id: GoalId,
        workout_id: WorkoutId,
    ) -> Result<Goal, ApiError>;

    async fn remove_workout_from_goal(
        &self,
        goal_id: GoalId,
        workout_id: WorkoutId,
    ) -> Result<Goal, ApiError>;

    async fn list_workouts(&self) -> Result<Vec<Workout>, ApiError>;
}
