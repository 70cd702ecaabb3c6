//! Logical documents kept in local storage.

/// Local documents that hold per-goal ledger data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerDocument {
    /// goal id -> consumed items in insertion order
    ConsumedItems,
    /// goal id -> running-total history
    CalorieHistory,
}

impl LedgerDocument {
    /// Returns the filename for this document.
    pub fn filename(&self) -> &'static str {
        match self {
            LedgerDocument::ConsumedItems => "consumedItems.json",
            LedgerDocument::CalorieHistory => "calorieHistory.json",
        }
    }
}

impl std::fmt::Display for LedgerDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerDocument::ConsumedItems => write!(f, "consumedItems"),
            LedgerDocument::CalorieHistory => write!(f, "calorieHistory"),
        }
    }
}
