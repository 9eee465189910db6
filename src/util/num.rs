/// Number of significant digits shown when a number is displayed.
pub const DISPLAY_PRECISION: usize = 10;

/// Significant digits in the exact decimal expansion of any `f64`.
const EXACT_DIGITS: usize = 767;

/// Formats a number the way results are shown to the user.
///
/// Values are rounded to [`DISPLAY_PRECISION`] significant digits, a tie
/// going to the larger magnitude. Decimal exponents from -6 to 9 use fixed
/// notation, anything else uses exponential notation (`1.000000000e+21`).
/// Fixed results lose their trailing zeros, and integral results their
/// decimal point.
///
/// ## Example
/// ```
/// use abacus::util::num::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
/// assert_eq!(format_number(1_234_567_890.5), "1234567891");
/// assert_eq!(format_number(1e21), "1.000000000e+21");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(f64::NAN), "NaN");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let (digits, exponent) = significant_digits(value.abs());

    if !(-6..10).contains(&exponent) {
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{}.{}e{exponent_sign}{}",
                       &digits[..1],
                       &digits[1..],
                       exponent.unsigned_abs());
    }

    let (integral, fraction) = if exponent < 0 {
        let zeros = "0".repeat(usize::try_from(-exponent - 1).unwrap_or(0));
        ("0".to_string(), format!("{zeros}{digits}"))
    } else {
        let split = usize::try_from(exponent + 1).unwrap_or(0);
        (digits[..split].to_string(), digits[split..].to_string())
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{sign}{integral}")
    } else {
        format!("{sign}{integral}.{fraction}")
    }
}

/// Rounds a positive finite number to [`DISPLAY_PRECISION`] significant
/// digits, returning them with the decimal exponent of the first one.
///
/// The digits come from the exact decimal expansion, so only a true tie
/// (a `5` followed by nothing but zeros) rounds up as a tie.
fn significant_digits(magnitude: f64) -> (String, i32) {
    let exact = format!("{magnitude:.prec$e}", prec = EXACT_DIGITS - 1);
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);

    let mut digits: Vec<u8> = mantissa.bytes()
                                      .filter(u8::is_ascii_digit)
                                      .map(|b| b - b'0')
                                      .collect();
    let round_up = digits.get(DISPLAY_PRECISION).is_some_and(|&next| next >= 5);
    digits.resize(DISPLAY_PRECISION, 0);

    if round_up {
        match digits.iter().rposition(|&d| d != 9) {
            Some(i) => {
                digits[i] += 1;
                digits[i + 1..].fill(0);
            },
            None => {
                digits.fill(0);
                digits[0] = 1;
                exponent += 1;
            },
        }
    }

    (digits.iter().map(|d| char::from(b'0' + d)).collect(), exponent)
}

/// Folds a `0b`, `0o` or `0x` literal into its numeric value.
///
/// Returns `None` when the prefix is unknown or a digit does not belong to
/// the radix. Digits are accumulated in `f64`, so very long literals lose
/// precision instead of overflowing.
///
/// ## Example
/// ```
/// use abacus::util::num::parse_radix_literal;
///
/// assert_eq!(parse_radix_literal("0x1F"), Some(31.0));
/// assert_eq!(parse_radix_literal("0o17"), Some(15.0));
/// assert_eq!(parse_radix_literal("0b101"), Some(5.0));
/// assert_eq!(parse_radix_literal("0b102"), None);
/// ```
#[must_use]
pub fn parse_radix_literal(text: &str) -> Option<f64> {
    let (radix, digits) = match text.get(..2)? {
        "0b" | "0B" => (2, &text[2..]),
        "0o" | "0O" => (8, &text[2..]),
        "0x" | "0X" => (16, &text[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return None;
    }

    digits.chars().try_fold(0.0, |acc, c| {
                      c.to_digit(radix)
                       .map(|digit| acc * f64::from(radix) + f64::from(digit))
                  })
}

/// Converts a collection length to a number value.
///
/// Lengths above 2^53 cannot be represented exactly; they never occur for
/// vectors that fit in memory.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_notation_bounds() {
        assert_eq!(format_number(1_234_567_890.0), "1234567890");
        assert_eq!(format_number(12_345_678_901.0), "1.234567890e+10");
        assert_eq!(format_number(0.000_001_5), "0.0000015");
        assert_eq!(format_number(0.000_000_15), "1.500000000e-7");
    }

    #[test]
    fn rounding_to_ten_digits() {
        assert_eq!(format_number(2.0_f64.sqrt()), "1.414213562");
        assert_eq!(format_number(-12.5), "-12.5");
        assert_eq!(format_number(100.0), "100");
    }

    #[test]
    fn ties_round_to_the_larger_magnitude() {
        assert_eq!(format_number(1_234_567_890.5), "1234567891");
        assert_eq!(format_number(123_456_789.25), "123456789.3");
        assert_eq!(format_number(12_345_678_905.0), "1.234567891e+10");
        assert_eq!(format_number(-123_456_789.25), "-123456789.3");
        assert_eq!(format_number(9_999_999_999.5), "1.000000000e+10");
    }

    #[test]
    fn only_exact_ties_round_up() {
        // The first is stored just below its halfway point, the second just above.
        assert_eq!(format_number(1.000_000_001_5), "1.000000001");
        assert_eq!(format_number(1.000_000_003_5), "1.000000004");
        assert_eq!(format_number(2.0_f64.powi(-30)), "9.313225746e-10");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }
}
