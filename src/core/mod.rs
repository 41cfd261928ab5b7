/// Errors from the arithmetic layer.
mod errors;
/// Export `ArithmeticError`
pub use self::errors::ArithmeticError;

/// Exact binomial coefficients and the helpers around them.
mod binomial;
/// Export `binomial`, `to_count` and `ratio_to_f64`
pub use self::binomial::{binomial, ratio_to_f64, to_count};

/// Code to walk every combination of per group counts.
mod count_iter;
/// Export `CountIter`
pub use self::count_iter::CountIter;

/// Display helpers for probabilities.
mod format;
/// Export `format_probability`
pub use self::format::format_probability;
