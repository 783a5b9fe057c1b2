//! Common test utilities and helpers.
//!
//! This module provides shared functionality for the integration tests:
//! - Custom assertions for mask invariants
//! - Input corpora and throwaway handlers

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
