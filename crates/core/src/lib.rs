//! # HMS Core
//!
//! Core logic for recording patient vitals in the hospital management system.
//!
//! This crate contains pure data operations and record storage:
//! - The vitals engine: sanitising input, deriving BMI and MAP, validation, status bands
//! - Operator identity with closed role and permission enums
//! - JSON record storage under a sharded data directory
//!
//! **No API concerns**: HTTP servers, authentication and AI calls belong in `api-rest` and
//! `assist`.

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod operator;
pub mod store;
pub mod vitals;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{PatientId, RecordId};
pub use operator::{Operator, Permission, Role};
pub use store::{FileVitalsStore, StoredVitals, VitalsStore};
