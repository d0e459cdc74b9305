//! Integration test utilities for the expense engine
//!
//! In-memory implementations of every port the engine depends on, plus
//! fixtures that wire them into a `ServiceContext`.

pub mod fixtures;

pub use fakes::*;
pub use fixtures::*;
