//! Resilience helpers.
//!
//! # Data Flow
//! ```text
//! Flaky setup step (e.g. sudo call while the node is still warming up):
//!     → retries.rs (run up to N attempts)
//!     → backoff.rs (RetryPolicy: exponential delay + jitter between attempts)
//! ```
//!
//! Per-call deadlines live next to the clients (`tokio::time::timeout`).

pub mod backoff;
pub mod retries;

pub use backoff::RetryPolicy;
pub use retries::retry;
