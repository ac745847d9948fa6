//! The module contains the errors the engine can throw.
//!
//! Every error is a validation failure of the caller's input: the engine
//! never returns a partial allocation or a partial set of balances.
//!
//! - [`PercentageTotal`] thrown when percentages do not sum to 100.
//! - [`ZeroShares`] thrown when a shares split has no shares at all.
//! - [`UnknownSplitType`] thrown when the strategy name is not recognised.
//!
//!  [`PercentageTotal`]: EngineError::PercentageTotal
//!  [`ZeroShares`]: EngineError::ZeroShares
//!  [`UnknownSplitType`]: EngineError::UnknownSplitType
use thiserror::Error;

use crate::BasisPoints;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unknown split type: \"{0}\"")]
    UnknownSplitType(String),
    #[error("Percentages must sum to 100, got {0}")]
    PercentageTotal(BasisPoints),
    #[error("Total shares must be greater than zero")]
    ZeroShares,
    #[error("A split needs at least one participant")]
    NoParticipants,
}
