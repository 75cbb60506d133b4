//! Shared test utilities for bujo integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Every helper runs against the fixed clock in
//! [`fixtures::now`] so results do not depend on when the suite runs.

pub mod assertions;
pub mod builders;
pub mod fake_photo_library;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fake_photo_library::*;
pub use fixtures::*;
