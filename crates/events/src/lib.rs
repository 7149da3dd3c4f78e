//! Coldwatch event bus.
//!
//! The asynchronous seam between reading ingestion and alert evaluation:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`MonitorEvent`] — the canonical domain event envelope, including
//!   the threshold-violation notification consumed by the violation
//!   worker.

pub mod bus;

pub use bus::{EventBus, MonitorEvent, ThresholdViolatedPayload};
