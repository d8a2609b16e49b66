use std::time::{Duration, Instant};

use crate::model::ItemId;

/// Pause between checking an item off and moving it to history
pub const COMPLETION_DELAY: Duration = Duration::from_millis(500);

/// A checked item waiting for its archive deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCompletion {
    pub id: ItemId,
    pub content: String,
    pub due: Instant,
}

/// Deferred archive calls, fired from the UI loop's tick
#[derive(Debug, Clone)]
pub struct CompletionQueue {
    delay: Duration,
    pending: Vec<PendingCompletion>,
}

impl CompletionQueue {
    pub fn new(delay: Duration) -> Self {
        CompletionQueue {
            delay,
            pending: Vec::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule an archive. Returns false if the item is already pending.
    pub fn schedule(&mut self, id: ItemId, content: &str, now: Instant) -> bool {
        if self.contains(id) {
            return false;
        }
        self.pending.push(PendingCompletion {
            id,
            content: content.to_string(),
            due: now + self.delay,
        });
        true
    }

    pub fn cancel(&mut self, id: ItemId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return everything due at `now`, in scheduling order
    pub fn take_due(&mut self, now: Instant) -> Vec<PendingCompletion> {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        due
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }
}

impl Default for CompletionQueue {
    fn default() -> Self {
        CompletionQueue::new(COMPLETION_DELAY)
    }
}
