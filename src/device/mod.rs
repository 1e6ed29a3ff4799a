// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level device abstraction for WLED controllers.
//!
//! [`Wled`] combines a [`DeviceStore`] with typed property views. Setters
//! only change the local state document; nothing reaches the device until
//! [`push`](Wled::push) is called.
//!
//! ```no_run
//! use wled_lib::Wled;
//!
//! # async fn example() -> wled_lib::Result<()> {
//! let mut led = Wled::http("192.168.1.100").build().await?;
//!
//! led.set_on(true)?;
//! led.set_brightness(100)?;
//! led.nightlight_mut().set_duration_minutes(30)?;
//! led.push(false).await?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod http_builder;

#[cfg(feature = "http")]
pub use http_builder::HttpDeviceBuilder;

use serde_json::Value;

use crate::error::Result;
use crate::property::{FieldPath, Nightlight, PropertyAccessor, SegmentList, as_byte};
use crate::protocol::Protocol;
#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};
use crate::state::{DeviceStore, SnapshotDir};
use crate::validate::{Truthy, verify_bool, verify_byte_range};

/// A WLED device session.
///
/// # Type Parameter
///
/// `P` is the transport; [`HttpClient`](crate::protocol::HttpClient) for
/// devices built with [`Wled::http`].
///
/// # Creating a Device
///
/// ```no_run
/// use std::time::Duration;
/// use wled_lib::Wled;
/// use wled_lib::protocol::HttpConfig;
///
/// # async fn example() -> wled_lib::Result<()> {
/// // Pulls all documents before returning
/// let led = Wled::http("192.168.1.100").build().await?;
/// assert!(led.is_loaded());
///
/// // Custom connection settings and snapshot location
/// let led = Wled::http_config(HttpConfig::new("wled.local").with_timeout(Duration::from_secs(3)))
///     .with_snapshot_dir("/var/lib/wled/states")
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Wled<P: Protocol> {
    store: DeviceStore<P>,
}

#[cfg(feature = "http")]
impl Wled<HttpClient> {
    /// Starts building an HTTP device for `host`.
    #[must_use]
    pub fn http(host: impl Into<String>) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(HttpConfig::new(host))
    }

    /// Starts building an HTTP device from a full configuration.
    #[must_use]
    pub fn http_config(config: HttpConfig) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(config)
    }
}

impl<P: Protocol> Wled<P> {
    /// Wraps a transport without fetching anything.
    #[must_use]
    pub fn with_protocol(protocol: P) -> Self {
        Self::from_store(DeviceStore::new(protocol))
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: DeviceStore<P>) -> Self {
        Self { store }
    }

    /// Wraps a transport and pulls all documents.
    ///
    /// # Errors
    ///
    /// Returns error if the pull fails.
    pub async fn connect(protocol: P, snapshots: SnapshotDir) -> Result<Self> {
        let mut device = Self::from_store(DeviceStore::new(protocol).with_snapshot_dir(snapshots));
        device.pull().await?;
        Ok(device)
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &DeviceStore<P> {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub fn store_mut(&mut self) -> &mut DeviceStore<P> {
        &mut self.store
    }

    /// Unwraps the underlying store.
    #[must_use]
    pub fn into_store(self) -> DeviceStore<P> {
        self.store
    }

    // ========== Store Operations ==========

    /// Fetches state, info, effects and palettes from the device.
    ///
    /// # Errors
    ///
    /// See [`DeviceStore::pull`].
    pub async fn pull(&mut self) -> Result<()> {
        self.store.pull().await
    }

    /// Sends the state document to the device.
    ///
    /// # Errors
    ///
    /// See [`DeviceStore::push`].
    pub async fn push(&mut self, expect_response: bool) -> Result<()> {
        self.store.push(expect_response).await
    }

    /// Returns whether all four documents are non-empty.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    /// Writes the state document to the snapshot `name`.
    ///
    /// # Errors
    ///
    /// See [`DeviceStore::save_to_file`].
    pub fn save_to_file(&self, name: &str) -> Result<()> {
        self.store.save_to_file(name)
    }

    /// Replaces the state document with the snapshot `name`.
    ///
    /// # Errors
    ///
    /// See [`DeviceStore::load_from_file`].
    pub fn load_from_file(&mut self, name: &str) -> Result<()> {
        self.store.load_from_file(name)
    }

    /// Asks the device to reboot, discarding the local state document.
    ///
    /// # Errors
    ///
    /// See [`DeviceStore::reboot`].
    pub async fn reboot(&mut self) -> Result<()> {
        self.store.reboot().await
    }

    /// Returns the state document.
    #[must_use]
    pub fn state(&self) -> &Value {
        self.store.state()
    }

    /// Returns the info document.
    #[must_use]
    pub fn info(&self) -> &Value {
        self.store.info()
    }

    /// Returns the effect names.
    #[must_use]
    pub fn effects(&self) -> &[String] {
        self.store.effects()
    }

    /// Returns the palette names.
    #[must_use]
    pub fn palettes(&self) -> &[String] {
        self.store.palettes()
    }

    // ========== Top-Level Settings ==========

    fn root(&self) -> PropertyAccessor<&Value> {
        PropertyAccessor::new(self.store.state(), FieldPath::root())
    }

    fn root_mut(&mut self) -> PropertyAccessor<&mut Value> {
        PropertyAccessor::new(self.store.state_mut(), FieldPath::root())
    }

    /// Returns whether the light is on.
    #[must_use]
    pub fn on(&self) -> Option<bool> {
        self.root().get("on").and_then(Value::as_bool)
    }

    /// Turns the light on or off, by truthiness of `value`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Document` if the state document is not an object.
    pub fn set_on(&mut self, value: impl Truthy) -> Result<()> {
        self.root_mut().set("on", verify_bool(value))?;
        Ok(())
    }

    /// Returns the master brightness.
    #[must_use]
    pub fn brightness(&self) -> Option<u8> {
        self.root().get("bri").and_then(as_byte)
    }

    /// Sets the master brightness (1-255).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the value is outside `[1, 255]`.
    pub fn set_brightness(&mut self, brightness: impl Into<i64>) -> Result<()> {
        self.root_mut().set("bri", verify_byte_range(brightness)?)?;
        Ok(())
    }

    /// Returns the transition time, in units of 100 ms.
    #[must_use]
    pub fn transition(&self) -> Option<u64> {
        self.root().get("transition").and_then(Value::as_u64)
    }

    /// Sets the transition time (1-255, units of 100 ms).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the value is outside `[1, 255]`.
    pub fn set_transition(&mut self, transition: impl Into<i64>) -> Result<()> {
        self.root_mut()
            .set("transition", verify_byte_range(transition)?)?;
        Ok(())
    }

    // ========== Views ==========

    /// Returns a read-only nightlight view.
    #[must_use]
    pub fn nightlight(&self) -> Nightlight<&Value> {
        Nightlight::new(self.store.state())
    }

    /// Returns a writable nightlight view.
    pub fn nightlight_mut(&mut self) -> Nightlight<&mut Value> {
        Nightlight::new(self.store.state_mut())
    }

    /// Returns a read-only segment view.
    #[must_use]
    pub fn segments(&self) -> SegmentList<'_, &Value> {
        SegmentList::new(self.store.state(), self.store.info())
    }

    /// Returns a writable segment view.
    pub fn segments_mut(&mut self) -> SegmentList<'_, &mut Value> {
        let (state, info) = self.store.documents_mut();
        SegmentList::new(state, info)
    }
}
