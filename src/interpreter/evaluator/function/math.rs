/// Wraps a one-argument `f64` method as a numeric builtin.
///
/// The generated functions read the first argument only; the arity check
/// made before the call guarantees there is one.
///
/// # Example
/// ```
/// use abacus::interpreter::evaluator::function::math::sin;
///
/// let r = sin(&[std::f64::consts::FRAC_PI_2]);
/// assert_eq!(r, 1.0);
/// ```
macro_rules! unary_numeric {
    ($($fname:ident => $method:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $fname(args: &[f64]) -> f64 {
                args[0].$method()
            }
        )*
    };
}

unary_numeric! {
    sin => sin,
    cos => cos,
    tan => tan,
    asin => asin,
    acos => acos,
    atan => atan,
    ceil => ceil,
    floor => floor,
    int => trunc,
    log => ln,
}

/// The angle of the point `(x, y)`, called as `ATAN2(Y, X)`.
///
/// # Example
/// ```
/// use abacus::interpreter::evaluator::function::math::atan2;
///
/// assert_eq!(atan2(&[1.0, 0.0]), std::f64::consts::FRAC_PI_2);
/// ```
#[must_use]
pub fn atan2(args: &[f64]) -> f64 {
    args[0].atan2(args[1])
}

/// A uniformly distributed number in `[0, 1)`.
#[must_use]
pub fn rnd(_args: &[f64]) -> f64 {
    rand::random::<f64>()
}
