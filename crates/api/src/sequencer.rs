// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! "Latest wins" bookkeeping for overlapping requests.
//!
//! Fetches are never cancelled. Instead each request takes a ticket when it
//! starts, and when it finishes it asks whether a newer request for the same
//! key has started since. Stale results are then discarded by the caller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Proof that a request started, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    key: String,
    seq: u64,
}

impl RequestTicket {
    /// The logical key this ticket was issued for.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Issues tickets and tracks the newest one per key.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: AtomicU64,
    latest: Mutex<HashMap<String, u64>>,
}

impl RequestSequencer {
    /// Creates a sequencer with no outstanding keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the start of a request for `key`.
    pub fn begin(&self, key: &str) -> RequestTicket {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        // Issued under the lock so map order matches issue order
        let seq: u64 = self.next.fetch_add(1, Ordering::SeqCst);
        latest.insert(key.to_string(), seq);
        RequestTicket {
            key: key.to_string(),
            seq,
        }
    }

    /// Marks the ticket's request as done and reports whether it was still
    /// the latest for its key.
    ///
    /// The key is forgotten once its latest request finishes, so the map
    /// only holds keys with a request in flight.
    pub fn finish(&self, ticket: &RequestTicket) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        let is_latest: bool = latest.get(&ticket.key) == Some(&ticket.seq);
        if is_latest {
            latest.remove(&ticket.key);
        }
        is_latest
    }

    /// Returns the number of keys with a request in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns whether no newer request for the ticket's key has started.
    #[must_use]
    pub fn is_latest(&self, ticket: &RequestTicket) -> bool {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ticket.key)
            .is_some_and(|&seq| seq == ticket.seq)
    }
}
