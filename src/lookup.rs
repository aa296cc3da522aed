//! Single-slot cancellation for the name lookup. Only the newest lookup may
//! deliver its result; starting another one or unmounting drops the earlier
//! result. The request itself still runs to completion.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug, Default)]
pub struct LookupSlot {
    generation: AtomicU64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookupTicket(u64);

impl LookupSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a lookup, invalidating any outstanding one.
    pub fn begin(&self) -> LookupTicket {
        LookupTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Unmount: the outstanding lookup's result will be dropped.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: LookupTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Hand back `result` only if `ticket` is still the current lookup.
    pub fn complete<T>(&self, ticket: LookupTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            debug!(ticket = ticket.0, "dropping stale lookup result");
            None
        }
    }
}
