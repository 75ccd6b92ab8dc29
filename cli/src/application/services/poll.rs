//! Bounded polling with an explicit attempt counter.
//!
//! Every attempt waits one interval and then evaluates the caller's attempt
//! function. The loop ends when that function yields a value, when it fails,
//! or after exactly `attempts` evaluations.

use std::future::Future;
use std::time::Duration;

/// Interval between two probes of the platform.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// How many times to poll, and how long to wait before each attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    pub attempts: u32,
    pub interval: Duration,
}

impl PollBudget {
    #[must_use]
    pub fn new(attempts: u32, interval: Duration) -> Self {
        Self { attempts, interval }
    }
}

/// Result of a bounded poll that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The predicate held on attempt `attempts`.
    Satisfied { value: T, attempts: u32 },
    /// Every attempt ran and the predicate never held.
    Exhausted { attempts: u32 },
}

impl<T> PollOutcome<T> {
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied { .. })
    }
}

/// Poll `attempt` until it returns `Some`, at most `budget.attempts` times.
///
/// `attempt` receives the 1-based attempt number.
///
/// # Errors
///
/// Returns the first error produced by `attempt`; polling stops there.
pub async fn poll_until<T, E, F, Fut>(
    budget: PollBudget,
    mut attempt: F,
) -> Result<PollOutcome<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    for n in 1..=budget.attempts {
        tokio::time::sleep(budget.interval).await;
        if let Some(value) = attempt(n).await? {
            return Ok(PollOutcome::Satisfied { value, attempts: n });
        }
        tracing::trace!(attempt = n, of = budget.attempts, "predicate not yet satisfied");
    }
    Ok(PollOutcome::Exhausted {
        attempts: budget.attempts,
    })
}
