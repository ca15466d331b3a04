//! Scenario and property test suite for Tollgate.
//!
//! The integration tests under `tests/` drive the checkpoint crates through
//! their public API only. Shared fixtures live in [`helpers`].

pub mod helpers;
