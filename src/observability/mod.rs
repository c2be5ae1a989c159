//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Library and CLI code:
//!     → logging.rs (tracing events, written to stderr)
//!
//! Tests and tooling:
//!     → metrics.rs (scrape a node's Prometheus endpoint)
//! ```
//!
//! # Design Decisions
//! - Stdout belongs to command output; logs never go there
//! - Default level is `warn` so a successful command prints no log lines
//! - Metrics are read from the node, not produced here

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, DEFAULT_LOG_LEVEL};
pub use metrics::{fetch_metrics, find_sample, MetricsError, MetricsResult};
