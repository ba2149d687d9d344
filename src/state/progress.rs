//! Processed-count guard shared by concurrent detail handlers
//!
//! The counter is the sole gate deciding whether further detail requests do
//! work. It is owned by the coordinator and handed to handlers behind an
//! `Arc`; handlers never see a free-floating global.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Terminal outcome of a crawl run
///
/// Both variants end the run successfully. `TargetReached` is the expected
/// common case; `Drained` means the site had fewer matching articles than
/// requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run stopped before the requested item count was met, either
    /// because the frontier emptied or because it was cancelled
    Drained,

    /// The requested number of content-bearing records was emitted
    TargetReached,
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Drained => write!(f, "drained"),
            RunOutcome::TargetReached => write!(f, "target-reached"),
        }
    }
}

/// Thread-safe counter of content-bearing records emitted so far
///
/// `try_claim` is the only mutation and performs the read-check-increment
/// as a single atomic compare-and-increment, so concurrent detail handlers
/// can neither push the count past `max_items` nor double-spend a slot.
#[derive(Debug)]
pub struct ProcessedCounter {
    max_items: u64,
    count: AtomicU64,
    target_signaled: AtomicBool,
}

impl ProcessedCounter {
    /// Creates a counter for a run targeting `max_items` records
    pub fn new(max_items: u32) -> Self {
        Self {
            max_items: u64::from(max_items),
            count: AtomicU64::new(0),
            target_signaled: AtomicBool::new(false),
        }
    }

    /// Returns the number of records processed so far
    pub fn processed(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    /// Returns the requested item count
    pub fn max_items(&self) -> u64 {
        self.max_items
    }

    /// Returns true once the target has been met
    pub fn is_satisfied(&self) -> bool {
        self.processed() >= self.max_items
    }

    /// Attempts to claim one billable slot
    ///
    /// Returns true if the slot was claimed (count incremented), false if
    /// the target was already met. The check and the increment are one
    /// atomic step.
    pub fn try_claim(&self) -> bool {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                if current < self.max_items {
                    Some(current + 1)
                } else {
                    None
                }
            })
            .is_ok()
    }

    /// One-shot latch for the "target reached" status transition
    ///
    /// Returns true exactly once, on the first call made after the target
    /// is satisfied. Later calls (and calls before satisfaction) return
    /// false, so the transition can never re-fire.
    pub fn mark_target_reached(&self) -> bool {
        if !self.is_satisfied() {
            return false;
        }
        !self.target_signaled.swap(true, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_counter_is_unsatisfied() {
        let counter = ProcessedCounter::new(5);
        assert_eq!(counter.processed(), 0);
        assert!(!counter.is_satisfied());
    }

    #[test]
    fn test_claims_stop_at_max() {
        let counter = ProcessedCounter::new(3);
        assert!(counter.try_claim());
        assert!(counter.try_claim());
        assert!(counter.try_claim());
        assert!(counter.is_satisfied());

        // Every further claim fails and the count stays put
        assert!(!counter.try_claim());
        assert!(!counter.try_claim());
        assert_eq!(counter.processed(), 3);
    }

    #[test]
    fn test_target_signal_fires_once() {
        let counter = ProcessedCounter::new(1);

        // Not satisfied yet: no signal
        assert!(!counter.mark_target_reached());

        assert!(counter.try_claim());
        assert!(counter.mark_target_reached());

        // Idempotent afterwards
        assert!(!counter.mark_target_reached());
        assert!(!counter.mark_target_reached());
    }

    #[test]
    fn test_concurrent_claims_never_exceed_max() {
        let counter = Arc::new(ProcessedCounter::new(50));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let counter = Arc::clone(&counter);
            handles.push(std::thread::spawn(move || {
                let mut claimed = 0u64;
                for _ in 0..100 {
                    if counter.try_claim() {
                        claimed += 1;
                    }
                }
                claimed
            }));
        }

        let total: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 50);
        assert_eq!(counter.processed(), 50);
    }

    #[test]
    fn test_concurrent_signal_fires_once() {
        let counter = Arc::new(ProcessedCounter::new(1));
        assert!(counter.try_claim());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let counter = Arc::clone(&counter);
            handles.push(std::thread::spawn(move || counter.mark_target_reached()));
        }

        let fired: usize = handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_run_outcome_display() {
        assert_eq!(RunOutcome::Drained.to_string(), "drained");
        assert_eq!(RunOutcome::TargetReached.to_string(), "target-reached");
    }
}
