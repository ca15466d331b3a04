//! # tollgate-core
//! Foundation types and traits shared by the Tollgate crates.
//!
//! The checkpoint logic itself lives in `tollgate-checkpoints`; this crate
//! only defines the vocabulary it speaks: hashes, network identifiers, the
//! block record and block index collaborators, and the error types.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
