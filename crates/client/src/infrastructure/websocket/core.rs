//! Runtime-agnostic pieces of the reconnect policy.
//!
//! Deliberately free of any socket or runtime dependency; the client owns the
//! actual connection and calls into this for the retry math.

use std::time::Duration;

use super::{MAX_RETRY_ATTEMPTS, RETRY_DELAY_MS, START_REQUEST_DELAY_MS};

/// Tunable knobs for the table connection.
///
/// `Default` is the production shape; tests shrink the delays.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub retry_delay: Duration,
    pub max_retries: u32,
    pub start_request_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
            max_retries: MAX_RETRY_ATTEMPTS,
            start_request_delay: Duration::from_millis(START_REQUEST_DELAY_MS),
        }
    }
}

/// Counts reconnect attempts within one session.
///
/// The counter survives socket re-creations and is reset only by a successful
/// open.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryState {
    attempts: u32,
}

impl RetryState {
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// A successful open clears the budget.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn is_exhausted(&self, config: &ClientConfig) -> bool {
        self.attempts >= config.max_retries
    }

    /// Consume one retry, returning the fixed delay to wait before dialing.
    ///
    /// Returns `None` once the bounded attempt count is used up.
    pub fn next_attempt(&mut self, config: &ClientConfig) -> Option<Duration> {
        if self.is_exhausted(config) {
            return None;
        }
        self.attempts += 1;
        Some(config.retry_delay)
    }
}
