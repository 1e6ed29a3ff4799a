// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nightlight mode type.
//!
//! The device stores the nightlight mode as an integer `0..=3`. Setters
//! accept either a named mode, a raw integer, or text, through
//! [`ModeInput`].
//!
//! # Device Methods
//!
//! Use [`NightlightMode`] with these [`Nightlight`](crate::property::Nightlight) methods:
//! - [`set_mode()`](crate::property::Nightlight::set_mode) - Set the fade behaviour
//! - [`mode()`](crate::property::Nightlight::mode) - Read the stored mode

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;
use crate::validate::{coerce_int, verify_range};

/// How the nightlight moves from the current to the target brightness.
///
/// | Value | Name | Description |
/// |-------|------|-------------|
/// | 0 | Instant | Jump to target brightness when the timer expires |
/// | 1 | Fade | Fade brightness over the whole duration |
/// | 2 | Color fade | Fade brightness and primary color |
/// | 3 | Sunrise | Ramp up brightness, ignoring the target |
///
/// # Examples
///
/// ```
/// use wled_lib::types::NightlightMode;
///
/// assert_eq!(NightlightMode::Fade.code(), 1);
/// assert_eq!("color fade".parse::<NightlightMode>().unwrap(), NightlightMode::ColorFade);
/// assert!(NightlightMode::from_code(4).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum NightlightMode {
    /// Switch to target brightness at the end.
    Instant,
    /// Fade brightness.
    Fade,
    /// Fade brightness and color.
    ColorFade,
    /// Sunrise ramp.
    Sunrise,
}

impl NightlightMode {
    /// Highest valid mode code.
    pub const MAX: u8 = 3;

    /// All modes in code order.
    pub const ALL: [Self; 4] = [Self::Instant, Self::Fade, Self::ColorFade, Self::Sunrise];

    /// Returns the integer code stored in the state document.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Instant => 0,
            Self::Fade => 1,
            Self::ColorFade => 2,
            Self::Sunrise => 3,
        }
    }

    /// Returns the human-readable name of the mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Fade => "fade",
            Self::ColorFade => "color fade",
            Self::Sunrise => "sunrise",
        }
    }

    /// Looks up a mode by its integer code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the code is outside `[0, 3]`.
    pub fn from_code(code: impl Into<i64>) -> Result<Self, ValueError> {
        let code = verify_range(code, 0, i64::from(Self::MAX))?;
        Ok(match code {
            0 => Self::Instant,
            1 => Self::Fade,
            2 => Self::ColorFade,
            _ => Self::Sunrise,
        })
    }
}

impl fmt::Display for NightlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl FromStr for NightlightMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instant" => Ok(Self::Instant),
            "fade" => Ok(Self::Fade),
            "color fade" | "colorfade" | "color_fade" => Ok(Self::ColorFade),
            "sunrise" => Ok(Self::Sunrise),
            _ => Err(ValueError::InvalidMode(s.to_string())),
        }
    }
}

impl From<NightlightMode> for u8 {
    fn from(mode: NightlightMode) -> Self {
        mode.code()
    }
}

impl TryFrom<u8> for NightlightMode {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_code(value)
    }
}

/// Input accepted by the nightlight mode setter.
///
/// Each variant is resolved by [`ModeInput::resolve`] into the canonical
/// stored mode.
///
/// # Examples
///
/// ```
/// use wled_lib::types::{ModeInput, NightlightMode};
///
/// assert_eq!(ModeInput::from("fade").resolve().unwrap(), NightlightMode::Fade);
/// assert_eq!(ModeInput::from(2).resolve().unwrap(), NightlightMode::ColorFade);
/// assert_eq!(ModeInput::from("3").resolve().unwrap(), NightlightMode::Sunrise);
/// assert!(ModeInput::from(4).resolve().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeInput {
    /// A named mode.
    Mode(NightlightMode),
    /// A raw integer code, range-checked on resolve.
    Raw(i64),
    /// Text naming a mode, or holding an integer code.
    Text(String),
}

impl ModeInput {
    /// Resolves the input into a mode.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotAnInteger` for text that is neither a mode
    /// name nor an integer, and `ValueError::OutOfRange` for codes outside
    /// `[0, 3]`.
    pub fn resolve(&self) -> Result<NightlightMode, ValueError> {
        match self {
            Self::Mode(mode) => Ok(*mode),
            Self::Raw(code) => NightlightMode::from_code(*code),
            Self::Text(text) => match text.parse::<NightlightMode>() {
                Ok(mode) => Ok(mode),
                Err(_) => NightlightMode::from_code(coerce_int(text)?),
            },
        }
    }
}

impl From<NightlightMode> for ModeInput {
    fn from(mode: NightlightMode) -> Self {
        Self::Mode(mode)
    }
}

macro_rules! impl_mode_input_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ModeInput {
                fn from(value: $t) -> Self {
                    Self::Raw(i64::from(value))
                }
            }
        )*
    };
}

impl_mode_input_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for ModeInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ModeInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
