//! Error types for the Tollgate checkpoint guard.
use thiserror::Error;

use crate::types::Hash256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("invalid hex: {0}")] InvalidHex(String),
    #[error("invalid length: {got} bytes, expected 32")] InvalidLength { got: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("checkpoint mismatch at height {height}: expected {expected}, got {got}")]
    Mismatch { height: u64, expected: Hash256, got: Hash256 },
    #[error("checkpoint table is empty")] EmptyTable,
    #[error("duplicate checkpoint height: {0}")] DuplicateHeight(u64),
    #[error("duplicate checkpoint hash: {0}")] DuplicateHash(Hash256),
    #[error("invalid checkpoint line {line}: {reason}")] InvalidLine { line: usize, reason: String },
}
