//! Ring-buffer log of recently executed layout actions and their results.
//!
//! Callers that queue an action (the agent loop, tests) read the outcome back
//! from here after the executor has run.

use bevy::prelude::*;

use super::{ActionResult, LayoutAction};

const MAX_ENTRIES: usize = 64;

#[derive(Resource, Debug, Clone, Default)]
pub struct ActionResultLog {
    entries: Vec<(LayoutAction, ActionResult)>,
    /// Entries ever pushed, including evicted ones.
    recorded: u64,
}

impl ActionResultLog {
    /// Record a new entry, evicting the oldest one when full.
    pub fn push(&mut self, action: LayoutAction, result: ActionResult) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push((action, result));
        self.recorded += 1;
    }

    /// Running count of pushed entries. Unlike [`len`](Self::len) it keeps
    /// growing once the log is full, so callers can tell whether anything
    /// new was recorded.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    /// The last `n` entries, oldest first.
    pub fn last_n(&self, n: usize) -> &[(LayoutAction, ActionResult)] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn last_result(&self) -> Option<&ActionResult> {
        self.entries.last().map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
