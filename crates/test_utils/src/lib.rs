//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the payables test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `memory`: In-memory port implementations for service-level tests

pub mod builders;
pub mod fixtures;
pub mod memory;

pub use builders::*;
pub use fixtures::*;
pub use memory::*;
