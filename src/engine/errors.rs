use thiserror::Error;

use crate::core::ArithmeticError;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EngineError {
    #[error("No sample of {sample_size} cards can be drawn from a deck of {deck_size}")]
    UndefinedProbability { deck_size: u64, sample_size: u64 },

    #[error("Arithmetic on invalid arguments: {0}")]
    Arithmetic(#[from] ArithmeticError),
}
