//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod batch;
pub mod config;
pub mod error;
pub mod listing;
pub mod status;

pub use batch::{RestartBatch, partition};
pub use config::RestartConfig;
pub use error::{ConfigError, PreconditionError, RestartError, WaitPhase};
pub use listing::{InstanceListing, InstanceStatusLine, parse_instance_listing};
pub use status::{AppDescriptor, ApplicationStatus};
