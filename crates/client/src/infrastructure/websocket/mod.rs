//! WebSocket transport for the table connection.

mod bridge;
mod client;
mod core;

pub use bridge::{create_connection, Connection};
pub use client::TableClient;
pub use core::{ClientConfig, RetryState};

// Reconnection constants. No backoff and no jitter: a fixed delay and a hard
// attempt ceiling, after which the session is over until the user relaunches.
pub const RETRY_DELAY_MS: u64 = 3_000;
pub const MAX_RETRY_ATTEMPTS: u32 = 5;

/// Delay before the autonomous start request is sent after wiring up.
pub const START_REQUEST_DELAY_MS: u64 = 1_000;
