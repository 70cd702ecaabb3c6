//! In-memory store used in tests and for throwaway sessions.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{GoalStore, StoreError};
use crate::models::GoalId;

/// A store operation, recorded in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Get(GoalId),
    Put(GoalId),
}

/// Keeps per-goal sequences in memory and records every call.
#[derive(Debug)]
pub struct MemoryStore<T> {
    entries: Mutex<HashMap<GoalId, Vec<T>>>,
    ops: Mutex<Vec<StoreOp>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ops: Mutex::new(Vec::new()),
        }
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a goal's sequence without recording an operation.
    pub fn with_entry(self, goal_id: GoalId, values: Vec<T>) -> Self {
        lock(&self.entries).insert(goal_id, values);
        self
    }

    /// Returns the recorded operations.
    pub fn ops(&self) -> Vec<StoreOp> {
        lock(&self.ops).clone()
    }

    /// Reads a goal's sequence without recording an operation.
    pub fn snapshot(&self, goal_id: GoalId) -> Vec<T> {
        lock(&self.entries).get(&goal_id).cloned().unwrap_or_default()
    }
}

impl<T: Clone + Send> GoalStore<T> for MemoryStore<T> {
    fn get(&self, goal_id: GoalId) -> Result<Vec<T>, StoreError> {
        lock(&self.ops).push(StoreOp::Get(goal_id));
        Ok(self.snapshot(goal_id))
    }

    fn put(&self, goal_id: GoalId, values: &[T]) -> Result<(), StoreError> {
        lock(&self.ops).push(StoreOp::Put(goal_id));
        lock(&self.entries).insert(goal_id, values.to_vec());
        Ok(())
    }
}
