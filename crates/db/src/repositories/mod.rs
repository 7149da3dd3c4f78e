//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod alert_repo;
pub mod corrective_action_repo;
pub mod freezer_repo;
pub mod profile_assignment_repo;
pub mod reading_repo;
pub mod threshold_profile_repo;

pub use alert_repo::AlertRepo;
pub use corrective_action_repo::CorrectiveActionRepo;
pub use freezer_repo::FreezerRepo;
pub use profile_assignment_repo::ProfileAssignmentRepo;
pub use reading_repo::ReadingRepo;
pub use threshold_profile_repo::ThresholdProfileRepo;
