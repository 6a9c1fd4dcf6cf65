//! Retry policy for queue operations.

use std::time::Duration;

use rand::Rng;

/// Parameters for unbounded exponential backoff.
///
/// There is deliberately no retry cap: queue operations retry until they
/// succeed or the process is killed. The consumer prefers to stall over
/// dropping data during a transport outage. Tests inject a millisecond-scale
/// policy instead of the wall-clock default.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub floor: Duration,
    /// Upper bound on the delay between retries.
    pub ceiling: Duration,
    /// Upper bound on the random jitter added to each delay.
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    /// One second floor, one minute ceiling, up to 500 ms of jitter.
    fn default() -> Self {
        Self {
            floor: Duration::from_secs(1),
            ceiling: Duration::from_secs(60),
            jitter: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Starts a fresh backoff cursor at the floor delay.
    #[must_use]
    pub fn backoff(&self) -> Backoff {
        Backoff {
            delay: self.floor,
            policy: *self,
        }
    }
}

/// Cursor over a policy's delay sequence: doubles each step, capped at the
/// ceiling, with random jitter added on top.
#[derive(Debug, Clone)]
pub struct Backoff {
    delay: Duration,
    policy: RetryPolicy,
}

impl Backoff {
    /// Returns the delay to sleep before the next attempt and advances the
    /// cursor.
    pub fn next_delay(&mut self) -> Duration {
        let jitter_ms = u64::try_from(self.policy.jitter.as_millis()).unwrap_or(u64::MAX);
        let jitter = Duration::from_millis(rand::rng().random_range(0..=jitter_ms));
        let delay = self.delay.min(self.policy.ceiling) + jitter;
        self.delay = self.delay.saturating_mul(2);
        delay
    }
}
