use chrono::Utc;
use std::sync::Arc;

use super::{kcal_for_grams, rebuild_history, GramQuantity, HistoryOrigin, LedgerError};
use crate::api::GoalApi;
use crate::events::{LedgerEvent, LedgerEvents};
use crate::models::{CalorieHistoryItem, ConsumedItem, Goal, GoalId, Product};
use crate::store::{GoalStore, LedgerStores};

/// Result of recording a consumed item.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub item: ConsumedItem,
    /// True if the goal's remaining kcal dropped below zero
    pub will_exceed: bool,
    /// The goal as returned by the server
    pub goal: Goal,
    pub history: Vec<CalorieHistoryItem>,
}

#[derive(Debug, Clone)]
pub struct Removed {
    pub item: ConsumedItem,
    /// The goal as returned by the server
    pub goal: Goal,
    pub history: Vec<CalorieHistoryItem>,
}

/// Result of a removal request.
#[derive(Debug, Clone)]
pub enum Removal {
    Removed(Removed),
    /// No goal, or no item with that id; nothing was written
    NotFound,
}

/// Keeps the consumed-item list, the derived history and the remote goal
/// balance in step.
///
/// Local documents are written before the remote update. A failed remote
/// call leaves the local writes in place.
#[derive(Clone)]
pub struct Reconciler {
    stores: LedgerStores,
    api: Arc<dyn GoalApi>,
    events: LedgerEvents,
}

impl Reconciler {
    pub fn new(stores: LedgerStores, api: Arc<dyn GoalApi>) -> Self {
        Self {
            stores,
            api,
            events: LedgerEvents::new(),
        }
    }

    pub fn api(&self) -> &Arc<dyn GoalApi> {
        &self.api
    }

    pub fn events(&self) -> &LedgerEvents {
        &self.events
    }

    /// Logs `grams` of `product` against `goal` and deducts the calories
    /// remotely.
    pub async fn record_consumption(
        &self,
        goal: &Goal,
        product: &Product,
        grams: GramQuantity,
    ) -> Result<Recorded, LedgerError> {
        let goal_id = goal.goal_id;
        let kcal = kcal_for_grams(product.kcal_per_100g, grams.get());
        let will_exceed = goal.kcal - kcal < 0;
        let now = Utc::now();

        let item = ConsumedItem::new(product, grams.get(), kcal, now);

        let mut items = self.stores.consumed.get(goal_id)?;
        items.push(item.clone());
        self.stores.consumed.put(goal_id, &items)?;

        let existing = self.stores.history.get(goal_id)?;
        let history = match HistoryOrigin::of(&existing) {
            Some(origin) => rebuild_history(origin, &items),
            // First entry: the budget is the goal's kcal before this item
            None => rebuild_history(
                HistoryOrigin::new(now, goal.kcal),
                std::slice::from_ref(&item),
            ),
        };
        self.stores.history.put(goal_id, &history)?;

        let updated = self
            .api
            .update_goal_kcal(goal_id, goal.kcal - kcal)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Goal {} kcal update failed after local ledger write: {}",
                    goal_id,
                    e
                )
            })?;

        tracing::info!(
            "Recorded {} kcal ({}g {}) for goal {}, {} kcal remaining",
            kcal,
            grams.get(),
            product.product_name,
            goal_id,
            updated.kcal
        );
        if will_exceed {
            tracing::warn!("Goal {} budget exceeded", goal_id);
        }

        self.events.publish(LedgerEvent::ConsumptionRecorded {
            goal_id,
            item: item.clone(),
            will_exceed,
        });
        self.events.publish(LedgerEvent::GoalUpdated(updated.clone()));

        Ok(Recorded {
            item,
            will_exceed,
            goal: updated,
            history,
        })
    }

    /// Removes a consumed item and adds its calories back remotely.
    pub async fn remove_consumption(
        &self,
        goal: &Goal,
        item_id: &str,
    ) -> Result<Removal, LedgerError> {
        let goal_id = goal.goal_id;

        let mut items = self.stores.consumed.get(goal_id)?;
        let Some(position) = items.iter().position(|item| item.id == item_id) else {
            tracing::warn!("Consumed item {} not found for goal {}", item_id, goal_id);
            return Ok(Removal::NotFound);
        };
        let removed = items.remove(position);
        self.stores.consumed.put(goal_id, &items)?;

        let existing = self.stores.history.get(goal_id)?;
        let origin = match HistoryOrigin::of(&existing) {
            Some(origin) => origin,
            None => {
                // Only correct if this was the sole item ever recorded
                let initial_kcal = goal.kcal + removed.kcal;
                tracing::warn!(
                    "No history for goal {}, reconstructing initial budget as {} kcal",
                    goal_id,
                    initial_kcal
                );
                HistoryOrigin::new(Utc::now(), initial_kcal)
            }
        };
        let history = rebuild_history(origin, &items);
        self.stores.history.put(goal_id, &history)?;

        let updated = self
            .api
            .update_goal_kcal(goal_id, goal.kcal + removed.kcal)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Goal {} kcal update failed after local ledger write: {}",
                    goal_id,
                    e
                )
            })?;

        tracing::info!(
            "Removed {} ({} kcal) from goal {}, {} kcal remaining",
            removed.product_name,
            removed.kcal,
            goal_id,
            updated.kcal
        );

        self.events.publish(LedgerEvent::ConsumptionRemoved {
            goal_id,
            item: removed.clone(),
        });
        self.events.publish(LedgerEvent::GoalUpdated(updated.clone()));

        Ok(Removal::Removed(Removed {
            item: removed,
            goal: updated,
            history,
        }))
    }

    /// Snapshot of the goal's history; empty if nothing was recorded yet.
    pub fn load_history(&self, goal_id: GoalId) -> Result<Vec<CalorieHistoryItem>, LedgerError> {
        Ok(self.stores.history.get(goal_id)?)
    }

    pub fn consumed_items(&self, goal_id: GoalId) -> Result<Vec<ConsumedItem>, LedgerError> {
        Ok(self.stores.consumed.get(goal_id)?)
    }
}
