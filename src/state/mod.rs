//! Shared run state: processed-count guard and terminal outcomes

mod progress;

pub use progress::{ProcessedCounter, RunOutcome};
