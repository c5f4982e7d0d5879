//! Infrastructure adapters and runtime bootstrap.

pub mod error;
pub mod files;
pub mod telemetry;
