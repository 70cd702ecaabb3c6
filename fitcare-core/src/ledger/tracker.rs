use chrono::NaiveDate;

use super::{GramQuantity, LedgerError, Reconciler, Recorded, Removal};
use crate::models::{CalorieHistoryItem, ConsumedItem, Goal, MemberId, Product};

/// A member's tracking session: the current goal plus the reconciler that
/// mutates it.
///
/// After every successful add or remove the session adopts the goal the
/// server returned.
pub struct CalorieTracker {
    reconciler: Reconciler,
    goal: Option<Goal>,
}

impl CalorieTracker {
    pub fn new(reconciler: Reconciler) -> Self {
        Self {
            reconciler,
            goal: None,
        }
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    /// Fetches the member's goal for `date`. On failure the session has no goal.
    pub async fn load_goal(
        &mut self,
        member_id: MemberId,
        date: NaiveDate,
    ) -> Result<&Goal, LedgerError> {
        match self.reconciler.api().current_goal(member_id, date).await {
            Ok(goal) => {
                tracing::debug!("Current goal for member {}: {}", member_id, goal.goal_id);
                Ok(self.goal.insert(goal))
            }
            Err(e) => {
                tracing::warn!("Could not load goal for member {}: {}", member_id, e);
                self.goal = None;
                Err(e.into())
            }
        }
    }

    pub async fn add(
        &mut self,
        product: &Product,
        grams: GramQuantity,
    ) -> Result<Recorded, LedgerError> {
        let goal = self.goal.as_ref().ok_or(LedgerError::NoCurrentGoal)?;
        let recorded = self
            .reconciler
            .record_consumption(goal, product, grams)
            .await?;
        self.goal = Some(recorded.goal.clone());
        Ok(recorded)
    }

    pub async fn remove(&mut self, item_id: &str) -> Result<Removal, LedgerError> {
        let Some(goal) = self.goal.as_ref() else {
            tracing::warn!("No current goal, ignoring removal of {}", item_id);
            return Ok(Removal::NotFound);
        };

        let removal = self.reconciler.remove_consumption(goal, item_id).await?;
        if let Removal::Removed(removed) = &removal {
            self.goal = Some(removed.goal.clone());
        }
        Ok(removal)
    }

    /// History of the current goal; empty without a goal.
    pub fn history(&self) -> Result<Vec<CalorieHistoryItem>, LedgerError> {
        match &self.goal {
            Some(goal) => self.reconciler.load_history(goal.goal_id),
            None => Ok(Vec::new()),
        }
    }

    pub fn consumed_items(&self) -> Result<Vec<ConsumedItem>, LedgerError> {
        match &self.goal {
            Some(goal) => self.reconciler.consumed_items(goal.goal_id),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GoalApi;
    use crate::store::LedgerStores;
    use crate::testing::FakeGoalApi;
    use std::sync::Arc;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn tracker(kcal: i64) -> (CalorieTracker, Arc<FakeGoalApi>) {
        let api = Arc::new(FakeGoalApi::new(Goal::new(3, "Daily", date(), kcal, 11)));
        let reconciler = Reconciler::new(LedgerStores::memory(), api.clone());
        (CalorieTracker::new(reconciler), api)
    }

    #[tokio::test]
    async fn test_add_without_goal_fails() {
        let (mut tracker, api) = tracker(2000);

        let err = tracker
            .add(&Product::new(1, "Apple", 52), GramQuantity::default())
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::NoCurrentGoal));
        assert!(api.kcal_updates().is_empty());
    }

    #[tokio::test]
    async fn test_remove_without_goal_is_not_found() {
        let (mut tracker, _api) = tracker(2000);
        let removal = tracker.remove("1-1").await.unwrap();
        assert!(matches!(removal, Removal::NotFound));
    }

    #[tokio::test]
    async fn test_load_goal_for_other_member_clears_goal() {
        let (mut tracker, _api) = tracker(2000);
        tracker.load_goal(11, date()).await.unwrap();
        assert!(tracker.goal().is_some());

        let err = tracker.load_goal(99, date()).await.unwrap_err();
        assert!(matches!(err, LedgerError::Api(_)));
        assert!(tracker.goal().is_none());
    }

    #[tokio::test]
    async fn test_session_adopts_server_goal() {
        let (mut tracker, _api) = tracker(2000);
        tracker.load_goal(11, date()).await.unwrap();

        let recorded = tracker
            .add(&Product::new(4001, "Apple", 52), GramQuantity::new(150).unwrap())
            .await
            .unwrap();
        assert_eq!(tracker.goal().unwrap().kcal, 1922);

        // The second add deducts from the adopted value, not the original
        tracker
            .add(&Product::new(5002, "Pizza", 2200), GramQuantity::default())
            .await
            .unwrap();
        assert_eq!(tracker.goal().unwrap().kcal, -278);

        let removal = tracker.remove(&recorded.item.id).await.unwrap();
        assert!(matches!(removal, Removal::Removed(_)));
        assert_eq!(tracker.goal().unwrap().kcal, -200);

        let history = tracker.history().unwrap();
        let last = history.last().unwrap();
        assert_eq!((last.consumed_kcal, last.remaining_kcal), (2200, -200));
        assert_eq!(tracker.consumed_items().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_history_empty_without_goal() {
        let (tracker, _api) = tracker(2000);
        assert!(tracker.history().unwrap().is_empty());
        assert!(tracker.consumed_items().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_empty_for_fresh_goal() {
        let (mut tracker, _api) = tracker(2000);
        tracker.load_goal(11, date()).await.unwrap();
        assert!(tracker.history().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_picked_search_result() {
        let api = Arc::new(
            FakeGoalApi::new(Goal::new(3, "Daily", date(), 2000, 11)).with_products(vec![
                Product::new(4001, "Apple", 52),
                Product::new(4002, "Apple Pie", 237),
            ]),
        );
        let mut tracker = CalorieTracker::new(Reconciler::new(LedgerStores::memory(), api.clone()));
        tracker.load_goal(11, date()).await.unwrap();

        let page = api.search_products("apple", 0).await.unwrap();
        assert_eq!(page.content.len(), 2);
        let pie = page.pick(Some(4002)).unwrap();

        let recorded = tracker.add(pie, GramQuantity::new(200).unwrap()).await.unwrap();
        assert_eq!(recorded.item.kcal, 474);
        assert_eq!(recorded.item.product_name, "Apple Pie");
        assert_eq!(api.kcal_updates(), vec![(3, 1526)]);
    }

    #[tokio::test]
    async fn test_attached_workouts_survive_kcal_updates() {
        use crate::models::{Exercise, Workout};

        let run = Workout::new(5, "Run", 30).with_exercises(vec![Exercise::new(1, "Jog", 300)]);
        let api = Arc::new(
            FakeGoalApi::new(Goal::new(3, "Daily", date(), 2000, 11)).with_workouts(vec![run]),
        );
        let mut tracker = CalorieTracker::new(Reconciler::new(LedgerStores::memory(), api.clone()));

        let goal = api.add_workout_to_goal(3, 5).await.unwrap();
        assert_eq!(goal.workout_kcal(), 300);

        tracker.load_goal(11, date()).await.unwrap();
        tracker
            .add(&Product::new(4001, "Apple", 52), GramQuantity::default())
            .await
            .unwrap();
        let goal = tracker.goal().unwrap();
        assert_eq!(goal.kcal, 1948);
        assert_eq!(goal.workouts.len(), 1);

        let goal = api.remove_workout_from_goal(3, 5).await.unwrap();
        assert!(goal.workouts.is_empty());
        assert_eq!(api.list_workouts().await.unwrap().len(), 1);
    }
}
