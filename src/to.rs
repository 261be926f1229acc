//! Text to number conversion with exact range checks.
//!
//! Both helpers reject empty text, trailing garbage, and values outside the
//! target width. A leading `+` is accepted; surrounding whitespace is not.

use std::num::ParseIntError;
use std::str::FromStr;

/// Parse `text` as an integer of width `T`.
pub fn int_from_str<T>(text: &str) -> Option<T>
where
    T: FromStr<Err = ParseIntError>,
{
    text.parse::<T>().ok()
}

/// A floating-point width the option engine can store.
pub trait FloatWidth: Copy {
    /// Largest finite magnitude of the width, widened to `f64`.
    const MAX_MAGNITUDE: f64;

    fn narrow(value: f64) -> Self;
}

impl FloatWidth for f32 {
    const MAX_MAGNITUDE: f64 = f32::MAX as f64;

    fn narrow(value: f64) -> Self {
        value as f32
    }
}

impl FloatWidth for f64 {
    const MAX_MAGNITUDE: f64 = f64::MAX;

    fn narrow(value: f64) -> Self {
        value
    }
}

/// Parse `text` as a float of width `T`.
///
/// Text that overflows to infinity (including a literal `inf`) is rejected,
/// as is any magnitude beyond the range of `T`. NaN passes through.
pub fn float_from_str<T: FloatWidth>(text: &str) -> Option<T> {
    let num = text.parse::<f64>().ok()?;
    if num.is_infinite() || num.abs() > T::MAX_MAGNITUDE {
        return None;
    }
    Some(T::narrow(num))
}
