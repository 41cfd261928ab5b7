//! The probability engine.
//!
//! Given a `GroupRegistry`, walk every combination of per group draw
//! counts that fits each group's bounds, count the deals that produce each
//! combination exactly, and divide the total by the number of possible
//! deals. All counting is done on exact integers; only the final ratio is
//! turned into a float.

/// Module for `Calculator` and the results it produces.
mod calculator;
/// Export `Calculator`, `Calculation` and `CombinationOutcome`
pub use self::calculator::{calculate, Calculation, Calculator, CombinationOutcome};

/// Errors the engine can return.
mod errors;
/// Export `EngineError`
pub use self::errors::EngineError;
