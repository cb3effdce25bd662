//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! locale middleware, upstream forwarding, server lifecycle
//!     → logging.rs (tracing events inside a per-request span carrying x-request-id)
//!     → metrics.rs (resolution outcomes per locale, upstream status and latency)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON for log shipping)
//!     → Prometheus scrape on observability.metrics_address (when enabled)
//! ```

pub mod logging;
pub mod metrics;
