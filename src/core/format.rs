/// Render a probability for display.
///
/// `factor` scales the value first, so `100` gives a percentage. Values
/// that would round to zero at `decimals` places are written in scientific
/// notation instead, so tiny odds stay readable.
///
/// ```
/// use draw_odds::core::format_probability;
///
/// assert_eq!("33.755", format_probability(0.337_551, 3, 100));
/// assert_eq!("1.234e-5", format_probability(0.000_012_34, 3, 1));
/// ```
pub fn format_probability(value: f64, decimals: usize, factor: u32) -> String {
    let scaled = value * f64::from(factor);
    let threshold = 10f64.powi(-(decimals.min(i32::MAX as usize) as i32));
    if scaled >= threshold {
        format!("{scaled:.decimals$}")
    } else {
        format!("{scaled:.decimals$e}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point() {
        assert_eq!("0.500", format_probability(0.5, 3, 1));
        assert_eq!("50.000", format_probability(0.5, 3, 100));
        assert_eq!("1", format_probability(1.0, 0, 1));
    }

    #[test]
    fn test_scientific_when_too_small() {
        assert_eq!("5.00e-4", format_probability(0.0005, 2, 1));
        assert_eq!("0.000e0", format_probability(0.0, 3, 1));
    }
}
