use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts an `i64` to `f32` for mixed integer/float arithmetic.
///
/// Integers beyond 2^24 in magnitude round to the nearest representable float,
/// which matches the promotion rules of the expression language.
///
/// ## Example
/// ```
/// use sift::util::num::i64_to_f32;
///
/// assert_eq!(i64_to_f32(3), 3.0);
/// assert_eq!(i64_to_f32(-7), -7.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn i64_to_f32(value: i64) -> f32 {
    value as f32
}

/// Converts an integral `f32` to `i64`, rejecting `NaN`, infinities, and
/// values outside the `i64` range.
///
/// ## Errors
/// Returns `RuntimeError::InvalidArgument` attributed to `function` when the
/// value cannot be represented.
///
/// ## Example
/// ```
/// use sift::util::num::f32_to_i64_checked;
///
/// assert_eq!(f32_to_i64_checked(42.0, "round").unwrap(), 42);
/// assert!(f32_to_i64_checked(f32::NAN, "round").is_err());
/// assert!(f32_to_i64_checked(1e30, "round").is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn f32_to_i64_checked(value: f32, function: &str) -> EvalResult<i64> {
    if !value.is_finite() || value < i64::MIN as f32 || value >= i64::MAX as f32 {
        return Err(RuntimeError::InvalidArgument { function: function.to_string(),
                                                   details:  format!("{value:?} does not fit in an integer"), });
    }
    Ok(value as i64)
}

/// Converts a `usize` count to `i64`, saturating at `i64::MAX`.
///
/// ## Example
/// ```
/// use sift::util::num::usize_to_i64;
///
/// assert_eq!(usize_to_i64(12), 12);
/// ```
#[must_use]
pub fn usize_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Parses hexadecimal digits (without the `0x` prefix) into an `i64`.
///
/// Up to sixteen digits are accepted; values above `i64::MAX` wrap into the
/// negative range, so `FFFFFFFFFFFFFFFF` reads as `-1`.
///
/// ## Example
/// ```
/// use sift::util::num::parse_hex;
///
/// assert_eq!(parse_hex("ff"), Some(255));
/// assert_eq!(parse_hex("FFFFFFFFFFFFFFFF"), Some(-1));
/// assert_eq!(parse_hex("1FFFFFFFFFFFFFFFF"), None);
/// ```
#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub fn parse_hex(digits: &str) -> Option<i64> {
    u64::from_str_radix(digits, 16).ok().map(|v| v as i64)
}

/// Parses integer text in decimal or `0x` hexadecimal notation, with an
/// optional leading sign.
///
/// ## Example
/// ```
/// use sift::util::num::parse_integer_text;
///
/// assert_eq!(parse_integer_text("-42"), Some(-42));
/// assert_eq!(parse_integer_text("0x1F"), Some(31));
/// assert_eq!(parse_integer_text("1.5"), None);
/// ```
#[must_use]
pub fn parse_integer_text(text: &str) -> Option<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(digits) => parse_hex(digits)?,
        None if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) => {
            body.parse::<u64>()
                .ok()
                .and_then(|v| if negative && v == i64::MIN.unsigned_abs() {
                              Some(i64::MIN)
                          } else {
                              i64::try_from(v).ok()
                          })?
        },
        None => return None,
    };
    Some(if negative { magnitude.wrapping_neg() } else { magnitude })
}
