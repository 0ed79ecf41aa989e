//! The module contains the errors the engine can return.
//!
//! Every error belongs to the input boundary: a malformed runner, stake or
//! enum label. An incomplete selection is never an error, it counts as zero
//! points.
//!
//! - [`InvalidRunner`] returned when a runner number is not in `1..=18`.
//! - [`UnsupportedMethod`] returned for a bet type/method pair that cannot be
//!   purchased (e.g. a WIN box).
//!
//!  [`InvalidRunner`]: EngineError::InvalidRunner
//!  [`UnsupportedMethod`]: EngineError::UnsupportedMethod
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid runner: {0}")]
    InvalidRunner(String),
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
    #[error("Invalid bet type: {0}")]
    InvalidBetType(String),
    #[error("Invalid bet method: {0}")]
    InvalidMethod(String),
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),
    #[error("Invalid stake: {0}")]
    InvalidStake(String),
}
