//! Single-slot in-flight request tracking.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// What happens to a response that settles after a newer activation began.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ConcurrencyPolicy {
    /// Only the most recently dispatched request may write to the region.
    #[default]
    LatestWins,
    /// Every settled request writes; whichever settles last stays visible.
    Unguarded,
}

impl ConcurrencyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcurrencyPolicy::LatestWins => "latest-wins",
            ConcurrencyPolicy::Unguarded => "unguarded",
        }
    }
}

/// Identifies one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets and remembers the newest one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new request; it becomes the current one.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Whether a response for `ticket` may be written under `policy`.
    pub fn may_write(&self, ticket: Ticket, policy: ConcurrencyPolicy) -> bool {
        match policy {
            ConcurrencyPolicy::LatestWins => self.is_current(ticket),
            ConcurrencyPolicy::Unguarded => true,
        }
    }
}
