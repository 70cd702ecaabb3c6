//! Change notifications for ledger observers.
//!
//! Delivery is best effort: publishing with no subscribers drops the event,
//! and a receiver that falls more than the channel capacity behind sees
//! `RecvError::Lagged`. Separate processes sharing a data directory do not
//! see each other's events.

use tokio::sync::broadcast;

use crate::models::{ConsumedItem, Goal, GoalId};

/// Buffered events per channel.
const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    /// A food item was recorded against a goal
    ConsumptionRecorded {
        goal_id: GoalId,
        item: ConsumedItem,
        will_exceed: bool,
    },
    /// A food item was removed from a goal
    ConsumptionRemoved { goal_id: GoalId, item: ConsumedItem },
    /// The server returned a new representation of the goal
    GoalUpdated(Goal),
}

impl LedgerEvent {
    pub fn goal_id(&self) -> GoalId {
        match self {
            LedgerEvent::ConsumptionRecorded { goal_id, .. } => *goal_id,
            LedgerEvent::ConsumptionRemoved { goal_id, .. } => *goal_id,
            LedgerEvent::GoalUpdated(goal) => goal.goal_id,
        }
    }
}

/// Broadcast hub for ledger changes.
#[derive(Debug, Clone)]
pub struct LedgerEvents {
    sender: broadcast::Sender<LedgerEvent>,
}

impl LedgerEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribes to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event to all current subscribers.
    pub fn publish(&self, event: LedgerEvent) {
        // No subscribers is not an error
        if self.sender.send(event).is_err() {
            tracing::trace!("Ledger event dropped, no subscribers");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LedgerEvents {
    fn default() -> Self {
        Self::new()
    }
}
