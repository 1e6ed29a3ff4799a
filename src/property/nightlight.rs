// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nightlight view over the `nl` object of the state document.

use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::error::Result;
use crate::property::accessor::{FieldPath, PropertyAccessor};
use crate::property::as_byte;
use crate::types::{ModeInput, NightlightMode};
use crate::validate::{Truthy, verify_bool, verify_byte_range};

/// Typed access to the nightlight settings.
///
/// Obtained from [`Wled::nightlight`](crate::Wled::nightlight) (read-only)
/// or [`Wled::nightlight_mut`](crate::Wled::nightlight_mut).
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wled_lib::property::Nightlight;
/// use wled_lib::types::NightlightMode;
///
/// let mut state = json!({"nl": {"on": false, "dur": 60, "mode": 1, "tbri": 0, "rem": -1}});
/// let mut nl = Nightlight::new(&mut state);
/// nl.set_on(true)?;
/// nl.set_mode("sunrise")?;
/// assert_eq!(nl.mode(), Some(NightlightMode::Sunrise));
/// assert_eq!(state["nl"]["mode"], 3);
/// # Ok::<(), wled_lib::Error>(())
/// ```
#[derive(Debug)]
pub struct Nightlight<D> {
    accessor: PropertyAccessor<D>,
}

impl<D> Nightlight<D> {
    /// Key of the nightlight object in the state document.
    pub const KEY: &'static str = "nl";

    /// Binds the view to the `nl` object of `state`.
    #[must_use]
    pub fn new(state: D) -> Self {
        Self {
            accessor: PropertyAccessor::new(state, FieldPath::key(Self::KEY)),
        }
    }
}

impl<D: Deref<Target = Value>> Nightlight<D> {
    /// Returns whether the nightlight is active.
    #[must_use]
    pub fn on(&self) -> Option<bool> {
        self.accessor.get("on").and_then(Value::as_bool)
    }

    /// Returns the nightlight duration in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> Option<u8> {
        self.accessor.get("dur").and_then(as_byte)
    }

    /// Returns the stored mode, if it is a known mode code.
    #[must_use]
    pub fn mode(&self) -> Option<NightlightMode> {
        self.mode_code()
            .and_then(|code| NightlightMode::from_code(code).ok())
    }

    /// Returns the raw stored mode code.
    #[must_use]
    pub fn mode_code(&self) -> Option<i64> {
        self.accessor.get("mode").and_then(Value::as_i64)
    }

    /// Returns the brightness the nightlight ends at.
    #[must_use]
    pub fn target_brightness(&self) -> Option<u8> {
        self.accessor.get("tbri").and_then(as_byte)
    }

    /// Returns the seconds left on the nightlight timer.
    ///
    /// The device reports `-1` while the nightlight is inactive.
    #[must_use]
    pub fn remaining_seconds(&self) -> Option<i64> {
        self.accessor.get("rem").and_then(Value::as_i64)
    }
}

impl<D: DerefMut<Target = Value>> Nightlight<D> {
    /// Turns the nightlight on or off, by truthiness of `value`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Document` if `nl` is present but not an object.
    pub fn set_on(&mut self, value: impl Truthy) -> Result<()> {
        self.accessor.set("on", verify_bool(value))?;
        Ok(())
    }

    /// Sets the duration in minutes (1-255).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the value is outside `[1, 255]`.
    pub fn set_duration_minutes(&mut self, minutes: impl Into<i64>) -> Result<()> {
        self.accessor.set("dur", verify_byte_range(minutes)?)?;
        Ok(())
    }

    /// Sets the mode from a named mode, a raw code or text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the input does not resolve to a code in
    /// `[0, 3]`.
    pub fn set_mode(&mut self, mode: impl Into<ModeInput>) -> Result<()> {
        let mode = mode.into().resolve()?;
        self.accessor.set("mode", mode.code())?;
        Ok(())
    }

    /// Sets the target brightness (1-255).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the value is outside `[1, 255]`.
    pub fn set_target_brightness(&mut self, brightness: impl Into<i64>) -> Result<()> {
        self.accessor.set("tbri", verify_byte_range(brightness)?)?;
        Ok(())
    }
}
