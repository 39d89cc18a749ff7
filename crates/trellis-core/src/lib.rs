//! trellis-core: shared types, configuration, and error handling for the
//! trellis graph client.
//!
//! This crate provides the foundational pieces used by the graph client:
//! - Property values and property maps
//! - Node and relationship records returned to callers
//! - The `{status, message, entity}` outcome shape of every operation
//! - Connection configuration
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::GraphConfig;
pub use error::TrellisError;
pub use types::{NodeRecord, Outcome, PropertyMap, RelationRecord, Value};
