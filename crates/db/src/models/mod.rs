//! Entity models and DTOs.
//!
//! Row structs derive `FromRow` and `Serialize`; `Create*` DTOs carry the
//! caller-supplied columns for INSERTs.

pub mod alert;
pub mod corrective_action;
pub mod freezer;
pub mod profile_assignment;
pub mod reading;
pub mod threshold_profile;
