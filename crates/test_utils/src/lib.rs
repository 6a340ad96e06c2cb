//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! brokerage finance test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates, amounts, and schedules
//! - `builders`: Builder patterns for schedules and stored records
//! - `assertions`: Custom assertion helpers for summaries and buckets
//! - `generators`: Property-based test data generators
//! - `logging`: One-time tracing subscriber for tests

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use logging::*;
