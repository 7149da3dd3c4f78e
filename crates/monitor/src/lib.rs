//! Service layer of the cold-storage monitoring engine.
//!
//! Wires the pure domain logic (`coldwatch-core`), the persistence layer
//! (`coldwatch-db`), and the event bus (`coldwatch-events`) into the
//! operations exposed to schedulers, controllers, and CLIs:
//!
//! - [`ReadingIngestionService`] — accepts telemetry samples, resolves
//!   the active profile, classifies the reading, persists it, and hands
//!   violations off to the bus (fire-and-forget).
//! - [`ThresholdProfileService`] — profile CRUD, effective-dated
//!   assignment, and point-in-time resolution.
//! - [`AlertService`] — alert creation, deduplication, acknowledgment,
//!   and resolution.
//! - [`CorrectiveActionService`] — the remediation work-item state
//!   machine.
//! - [`ViolationWorker`] — background consumer turning violation events
//!   into alerts.

pub mod alerts;
pub mod corrective_actions;
pub mod error;
pub mod ingestion;
pub mod profiles;
pub mod violation_worker;

pub use alerts::AlertService;
pub use corrective_actions::CorrectiveActionService;
pub use error::MonitorError;
pub use ingestion::ReadingIngestionService;
pub use profiles::ThresholdProfileService;
pub use violation_worker::ViolationWorker;
