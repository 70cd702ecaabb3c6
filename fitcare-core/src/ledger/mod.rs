//! Consumption ledger.
//!
//! Per goal, three records describe what was eaten:
//! - the consumed-item list (local document)
//! - the running-total history derived from it (local document)
//! - the goal's remaining kcal (remote, authoritative)
//!
//! The history is always the chronological prefix sum of the consumed items,
//! prepended with a zero-point whose `initial_kcal` is fixed when the first
//! entry is written. It is rebuilt by full replay on every change.

mod reconciler;
mod tracker;

use chrono::{DateTime, Utc};

pub use reconciler::{Reconciler, Recorded, Removal, Removed};
pub use tracker::CalorieTracker;

use crate::api::ApiError;
use crate::models::{CalorieHistoryItem, ConsumedItem};
use crate::store::StoreError;

/// Gram quantity used when none (or garbage) is entered.
pub const DEFAULT_GRAMS: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Remote update failed: {0}")]
    Api(#[from] ApiError),

    #[error("Local storage error: {0}")]
    Store(#[from] StoreError),

    #[error("No current goal found")]
    NoCurrentGoal,

    #[error("Invalid gram quantity '{0}': must be greater than zero")]
    InvalidQuantity(String),

    #[error("Gram quantity '{0}' is too large")]
    QuantityOutOfRange(String),
}

/// A validated, positive gram quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GramQuantity(u32);

impl GramQuantity {
    pub fn new(grams: u32) -> Result<Self, LedgerError> {
        if grams == 0 {
            return Err(LedgerError::InvalidQuantity(grams.to_string()));
        }
        Ok(Self(grams))
    }

    /// Parses user input by its leading integer, so `12.5` is 12 g and
    /// `250g` is 250 g. Missing, empty or input without leading digits falls
    /// back to 100 g; zero and negative numbers are rejected.
    pub fn parse(input: Option<&str>) -> Result<Self, LedgerError> {
        let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };

        let (negative, unsigned) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        let digits = &unsigned[..end];

        if digits.is_empty() {
            tracing::debug!("Non-numeric gram input '{}', using {}g", raw, DEFAULT_GRAMS);
            return Ok(Self::default());
        }
        if negative || digits.bytes().all(|b| b == b'0') {
            return Err(LedgerError::InvalidQuantity(raw.to_string()));
        }

        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| LedgerError::QuantityOutOfRange(raw.to_string()))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for GramQuantity {
    fn default() -> Self {
        Self(DEFAULT_GRAMS)
    }
}

/// Calories for `grams` of a product, rounded half away from zero.
pub fn kcal_for_grams(kcal_per_100g: i64, grams: u32) -> i64 {
    (kcal_per_100g as f64 * grams as f64 / 100.0).round() as i64
}

/// Where a history starts: the zero-point's date and the fixed budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOrigin {
    pub date: DateTime<Utc>,
    pub initial_kcal: i64,
}

impl HistoryOrigin {
    pub fn new(date: DateTime<Utc>, initial_kcal: i64) -> Self {
        Self { date, initial_kcal }
    }

    /// Origin of an existing history, taken from its first entry.
    pub fn of(history: &[CalorieHistoryItem]) -> Option<Self> {
        history
            .first()
            .map(|first| Self::new(first.date, first.initial_kcal))
    }
}

/// Replays `items` in ascending date order against the origin's budget.
///
/// Items with equal dates keep their list order.
pub fn rebuild_history(origin: HistoryOrigin, items: &[ConsumedItem]) -> Vec<CalorieHistoryItem> {
    let mut sorted: Vec<&ConsumedItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.date);

    let mut history = Vec::with_capacity(items.len() + 1);
    history.push(CalorieHistoryItem::zero_point(origin.date, origin.initial_kcal));

    let mut consumed = 0;
    for item in sorted {
        consumed += item.kcal;
        history.push(CalorieHistoryItem::at(item.date, origin.initial_kcal, consumed));
    }

    history
}
