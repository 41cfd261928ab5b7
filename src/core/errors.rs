use thiserror::Error;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ArithmeticError {
    #[error("Binomial coefficient needs n >= k >= 0, got n = {n} and k = {k}")]
    InvalidArguments { n: u64, k: u64 },

    #[error("Counts must be non-negative integers that fit in 64 bits")]
    InvalidCount,

    #[error("Can't divide by zero")]
    DivisionByZero,

    #[error("Ratio can't be represented as a float")]
    Unrepresentable,
}
