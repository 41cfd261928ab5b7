use num::{BigInt, BigRational, BigUint, One, ToPrimitive, Zero};

use super::ArithmeticError;

/// Exact binomial coefficient `C(n, k)`, the number of ways to choose
/// `k` cards out of `n` without regard to order.
///
/// This uses the multiplicative formula over `min(k, n - k)` terms.
/// After step `i` the running value is exactly `C(n, i + 1)`, so every
/// division is exact and nothing is ever rounded.
///
/// # Errors
///
/// Returns `ArithmeticError::InvalidArguments` if `k > n`. While `C(n, k)`
/// is zero in that case, nothing in the engine should ever ask for it, so
/// it's treated as a broken invariant upstream rather than silently zero.
///
/// # Example
/// ```
/// use draw_odds::core::binomial;
/// use num::BigUint;
///
/// assert_eq!(binomial(40, 5).unwrap(), BigUint::from(658_008u32));
/// assert!(binomial(3, 5).is_err());
/// ```
pub fn binomial(n: u64, k: u64) -> Result<BigUint, ArithmeticError> {
    if k > n {
        return Err(ArithmeticError::InvalidArguments { n, k });
    }

    let k = k.min(n - k);
    let mut result = BigUint::one();
    for i in 0..k {
        result *= n - i;
        result /= i + 1;
    }
    Ok(result)
}

/// Convert any integer into a card count.
///
/// Negative values, and values that don't fit in a `u64`, are rejected.
/// Non-integer types don't implement `TryInto<u64>` so they can't even be
/// passed in.
pub fn to_count<N: TryInto<u64>>(value: N) -> Result<u64, ArithmeticError> {
    value.try_into().map_err(|_| ArithmeticError::InvalidCount)
}

/// Divide two exact integers and return the closest `f64`.
///
/// The quotient is rounded once, as a rational, so it stays accurate even
/// when both sides are far too wide for `f64` or the result is tiny.
pub fn ratio_to_f64(numer: &BigUint, denom: &BigUint) -> Result<f64, ArithmeticError> {
    if denom.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }

    let ratio = BigRational::new_raw(BigInt::from(numer.clone()), BigInt::from(denom.clone()));
    match ratio.to_f64() {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(ArithmeticError::Unrepresentable),
    }
}
