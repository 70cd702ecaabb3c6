//! Fitcare Core Library
//!
//! Calorie ledger, shared models and the remote API client used by the
//! Fitcare applications.

pub mod api;
pub mod events;
pub mod ledger;
pub mod models;
pub mod store;

#[cfg(test)]
mod testing;

pub use api::{ApiError, GoalApi, HttpGoalApi};
pub use events::{LedgerEvent, LedgerEvents};
pub use ledger::{
    kcal_for_grams, rebuild_history, CalorieTracker, GramQuantity, HistoryOrigin, LedgerError,
    Reconciler, Recorded, Removal, Removed,
};
pub use models::{
    CalorieHistoryItem, ConsumedItem, Exercise, Goal, GoalId, MemberId, Product, ProductPage,
    Workout, WorkoutId,
};
pub use store::{GoalStore, JsonFileStore, LedgerDocument, LedgerStores, MemoryStore, StoreError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
