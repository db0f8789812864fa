//! Bounded retry for letter steps.
//!
//! Each attempt is a fresh future built from the same closure. The counter
//! only decreases, so a step makes at most `tries` calls. No backoff is
//! applied between attempts.

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

use crate::letter::outcome::StepOutcome;

/// Default budget for the extractor, reviewer and improver.
pub const DEFAULT_TRIES: u32 = 2;

/// Runs `attempt` until it succeeds or `tries` attempts have failed.
/// A budget of 0 makes no call and returns the sentinel immediately.
pub async fn retry_with_budget<T, E, F, Fut>(
    step: &str,
    tries: u32,
    sentinel: &str,
    attempt: F,
) -> StepOutcome<T>
where
    E: Display,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut remaining = tries;

    while remaining > 0 {
        let attempt_number = tries - remaining + 1;
        match attempt().await {
            Ok(value) => return StepOutcome::Done(value),
            Err(e) => warn!("{step} attempt {attempt_number}/{tries} failed: {e}"),
        }
        remaining -= 1;
    }

    warn!("{step} exhausted its budget of {tries} attempts");
    StepOutcome::exhausted(sentinel)
}
