//! Test doubles for the remote service.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::api::{ApiError, GoalApi};
use crate::models::{
    Goal, GoalId, MemberId, Product, ProductPage, Workout, WorkoutId, PRODUCTS_PER_PAGE,
};

/// In-memory stand-in for the remote service holding a single goal.
pub struct FakeGoalApi {
    goal: Mutex<Goal>,
    workouts: Vec<Workout>,
    products: Vec<Product>,
    fail_updates: AtomicBool,
    kcal_updates: Mutex<Vec<(GoalId, i64)>>,
}

impl FakeGoalApi {
    pub fn new(goal: Goal) -> Self {
        Self {
            goal: Mutex::new(goal),
            workouts: Vec::new(),
            products: Vec::new(),
            fail_updates: AtomicBool::new(false),
            kcal_updates: Mutex::new(Vec::new()),
        }
    }

    pub fn with_workouts(mut self, workouts: Vec<Workout>) -> Self {
        self.workouts = workouts;
        self
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn goal(&self) -> Goal {
        self.goal.lock().unwrap().clone()
    }

    pub fn kcal_updates(&self) -> Vec<(GoalId, i64)> {
        self.kcal_updates.lock().unwrap().clone()
    }

    fn check_goal(&self, goal_id: GoalId) -> Result<(), ApiError> {
        if self.goal.lock().unwrap().goal_id != goal_id {
            return Err(ApiError::NotFound(format!("/goal/{}", goal_id)));
        }
        Ok(())
    }

    fn check_failure(&self, path: String) -> Result<(), ApiError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                url: path,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GoalApi for FakeGoalApi {
    async fn current_goal(&self, member_id: MemberId, date: NaiveDate) -> Result<Goal, ApiError> {
        let goal = self.goal();
        if goal.user_id != member_id {
            return Err(ApiError::NotFound(format!(
                "/goal/currentGoal/{}/{}",
                member_id, date
            )));
        }
        Ok(goal)
    }

    async fn update_goal_kcal(&self, goal_id: GoalId, kcal: i64) -> Result<Goal, ApiError> {
        self.check_goal(goal_id)?;
        self.check_failure(format!("/goal/{}", goal_id))?;

        self.kcal_updates.lock().unwrap().push((goal_id, kcal));
        let mut goal = self.goal.lock().unwrap();
        goal.kcal = kcal;
        Ok(goal.clone())
    }

    async fn search_products(&self, name: &str, page: u32) -> Result<ProductPage, ApiError> {
        let needle = name.to_lowercase();
        let content: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.product_name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        Ok(ProductPage {
            total_elements: content.len() as u64,
            total_pages: if content.is_empty() { 0 } else { 1 },
            number: page,
            size: PRODUCTS_PER_PAGE as u32,
            content: if page == 0 { content } else { Vec::new() },
        })
    }

    async fn add_workout_to_goal(
        &self,
        goal_id: GoalId,
        workout_id: WorkoutId,
    ) -> Result<Goal, ApiError> {
        self.check_goal(goal_id)?;
        let workout = self
            .workouts
            .iter()
            .find(|w| w.workout_id == workout_id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 400,
                url: format!("/goal/{}/add-workout", goal_id),
            })?;

        let mut goal = self.goal.lock().unwrap();
        goal.workouts.push(workout);
        Ok(goal.clone())
    }

    async fn remove_workout_from_goal(
        &self,
        goal_id: GoalId,
        workout_id: WorkoutId,
    ) -> Result<Goal, ApiError> {
        self.check_goal(goal_id)?;
        let mut goal = self.goal.lock().unwrap();
        goal.workouts.retain(|w| w.workout_id != workout_id);
        Ok(goal.clone())
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>, ApiError> {
        Ok(self.workouts.clone())
    }
}
