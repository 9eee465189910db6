/// Numeric formatting and conversion helpers.
///
/// This module owns the single place where numbers are turned into text
/// (ten significant digits, switching to exponential notation for very large
/// and very small magnitudes) and the folding of `0b`/`0o`/`0x` literals into
/// `f64`.
pub mod num;
