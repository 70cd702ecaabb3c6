use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in a goal's running calorie total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalorieHistoryItem {
    pub date: DateTime<Utc>,
    pub initial_kcal: i64,
    pub consumed_kcal: i64,
    pub remaining_kcal: i64,
}

impl CalorieHistoryItem {
    /// The synthetic first entry of every history.
    pub fn zero_point(date: DateTime<Utc>, initial_kcal: i64) -> Self {
        Self {
            date,
            initial_kcal,
            consumed_kcal: 0,
            remaining_kcal: initial_kcal,
        }
    }

    pub fn at(date: DateTime<Utc>, initial_kcal: i64, consumed_kcal: i64) -> Self {
        Self {
            date,
            initial_kcal,
            consumed_kcal,
            remaining_kcal: initial_kcal - consumed_kcal,
        }
    }
}
