// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value validators shared by every typed property setter.
//!
//! The validators are free functions: each property view calls the one it
//! needs before writing into the state document.
//!
//! # Examples
//!
//! ```
//! use wled_lib::validate::{verify_bool, verify_byte_range, verify_range};
//!
//! assert!(verify_bool(1));
//! assert!(!verify_bool(""));
//! assert_eq!(verify_byte_range(128).unwrap(), 128);
//! assert!(verify_byte_range(0).is_err());
//! assert_eq!(verify_range(3, 0, 3).unwrap(), 3);
//! ```

use serde_json::Value;

use crate::error::ValueError;

/// Lowest value accepted by [`verify_byte_range`].
pub const BYTE_MIN: i64 = 1;

/// Highest value accepted by [`verify_byte_range`].
pub const BYTE_MAX: i64 = 255;

/// Truthiness of a value.
///
/// Zero, empty text, empty collections, `None` and JSON `null` are falsy.
/// Everything else is truthy.
pub trait Truthy {
    /// Returns whether the value is truthy.
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_int {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthy_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        }
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

/// Coerces a value to a boolean by truthiness. Never fails.
#[must_use]
pub fn verify_bool<T: Truthy>(value: T) -> bool {
    value.is_truthy()
}

/// Validates an 8-bit setting, which must lie in `1..=255`.
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` if the value is outside `[1, 255]`.
pub fn verify_byte_range(value: impl Into<i64>) -> Result<u8, ValueError> {
    let value = verify_range(value, BYTE_MIN, BYTE_MAX)?;
    u8::try_from(value).map_err(|_| ValueError::OutOfRange {
        min: BYTE_MIN,
        max: BYTE_MAX,
        actual: value,
    })
}

/// Validates that a value lies in `min..=max`.
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` if the value is outside `[min, max]`.
pub fn verify_range(value: impl Into<i64>, min: i64, max: i64) -> Result<i64, ValueError> {
    let value = value.into();
    if !(min..=max).contains(&value) {
        return Err(ValueError::OutOfRange {
            min,
            max,
            actual: value,
        });
    }
    Ok(value)
}

/// Coerces text to an integer, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns `ValueError::NotAnInteger` if the text is not a base-10 integer.
pub fn coerce_int(text: &str) -> Result<i64, ValueError> {
    text.trim()
        .parse()
        .map_err(|_| ValueError::NotAnInteger(text.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn byte_range_accepts_exactly_one_to_255() {
        for v in -5_i64..=300 {
            let result = verify_byte_range(v);
            if (1..=255).contains(&v) {
                assert_eq!(i64::from(result.unwrap()), v);
            } else {
                assert_eq!(
                    result,
                    Err(ValueError::OutOfRange {
                        min: 1,
                        max: 255,
                        actual: v
                    })
                );
            }
        }
    }

    #[test]
    fn byte_range_accepts_narrow_integer_types() {
        assert_eq!(verify_byte_range(200_u8).unwrap(), 200);
        assert_eq!(verify_byte_range(17_i32).unwrap(), 17);
        assert!(verify_byte_range(0_u16).is_err());
    }

    #[test]
    fn range_is_inclusive() {
        assert_eq!(verify_range(0, 0, 3).unwrap(), 0);
        assert_eq!(verify_range(3, 0, 3).unwrap(), 3);
        assert!(verify_range(-1, 0, 3).is_err());
        assert!(verify_range(4, 0, 3).is_err());
        assert_eq!(verify_range(-7, -10, -5).unwrap(), -7);
    }

    #[test]
    fn range_with_min_above_max_rejects_everything() {
        assert!(verify_range(5, 10, 0).is_err());
    }

    #[test]
    fn bool_truthiness() {
        assert!(verify_bool(true));
        assert!(!verify_bool(false));
        assert!(verify_bool(5));
        assert!(!verify_bool(0_u8));
        assert!(verify_bool(-1_i64));
        assert!(!verify_bool(0.0_f64));
        assert!(verify_bool("off"));
        assert!(!verify_bool(""));
        assert!(!verify_bool(String::new()));
        assert!(!verify_bool(None::<bool>));
        assert!(verify_bool(Some(1)));
        assert!(!verify_bool(Vec::<u8>::new()));
    }

    #[test]
    fn bool_truthiness_of_json_values() {
        assert!(!verify_bool(json!(null)));
        assert!(!verify_bool(json!(0)));
        assert!(!verify_bool(json!(0.0)));
        assert!(!verify_bool(json!("")));
        assert!(!verify_bool(json!([])));
        assert!(!verify_bool(json!({})));
        assert!(verify_bool(json!(2)));
        assert!(verify_bool(json!("x")));
        assert!(verify_bool(json!([0])));
        assert!(verify_bool(&json!({"a": 1})));
    }

    #[test]
    fn coerce_int_parses_text() {
        assert_eq!(coerce_int("2").unwrap(), 2);
        assert_eq!(coerce_int(" -4 ").unwrap(), -4);
        assert_eq!(
            coerce_int("fast"),
            Err(ValueError::NotAnInteger("fast".to_string()))
        );
    }
}
