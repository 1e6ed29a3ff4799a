// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP device builder.

use std::path::PathBuf;

use crate::device::Wled;
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};
use crate::state::{DeviceStore, SnapshotDir};

/// Builder for creating HTTP-based devices.
///
/// This builder can be created in two ways:
/// - `Wled::http("host")` - Simple host string
/// - `Wled::http_config(HttpConfig::new("host").with_port(8080))` - Advanced configuration
///
/// # Examples
///
/// ```no_run
/// use wled_lib::Wled;
///
/// # async fn example() -> wled_lib::Result<()> {
/// // Pull everything up front
/// let led = Wled::http("192.168.1.100")
///     .build()
///     .await?;
///
/// // Start empty, pull later
/// let mut led = Wled::http("192.168.1.100")
///     .with_snapshot_dir("./scenes")
///     .build_without_pull()?;
/// led.load_from_file("movie-night")?;
/// led.push(false).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpDeviceBuilder {
    config: HttpConfig,
    snapshot_dir: Option<PathBuf>,
}

impl HttpDeviceBuilder {
    /// Creates a new builder with the specified HTTP configuration.
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self {
            config,
            snapshot_dir: None,
        }
    }

    /// Sets the directory used for state snapshots.
    ///
    /// Defaults to [`SnapshotDir::DEFAULT_DIR`].
    #[must_use]
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    /// Returns the HTTP configuration.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the device and pulls all documents from it.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The HTTP client cannot be created
    /// - Any of the four pulls fails
    pub async fn build(self) -> Result<Wled<HttpClient>, Error> {
        let mut device = self.build_without_pull()?;
        device.pull().await?;
        Ok(device)
    }

    /// Builds the device without contacting it.
    ///
    /// The documents stay empty until [`Wled::pull`] is called.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build_without_pull(self) -> Result<Wled<HttpClient>, Error> {
        let client = self.config.into_client().map_err(Error::Protocol)?;
        let snapshots = self
            .snapshot_dir
            .map(SnapshotDir::new)
            .unwrap_or_default();
        Ok(Wled::from_store(
            DeviceStore::new(client).with_snapshot_dir(snapshots),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_new() {
        let builder = HttpDeviceBuilder::new(HttpConfig::new("192.168.1.100"));
        assert!(builder.snapshot_dir.is_none());
        assert_eq!(builder.config().host(), "192.168.1.100");
    }

    #[test]
    fn builder_build_without_pull() {
        let device = HttpDeviceBuilder::new(HttpConfig::new("192.168.1.100"))
            .build_without_pull()
            .unwrap();

        assert!(!device.is_loaded());
        assert_eq!(device.store().protocol().base_url(), "http://192.168.1.100");
        assert_eq!(device.store().snapshots(), &SnapshotDir::default());
    }

    #[test]
    fn builder_with_snapshot_dir() {
        let device = HttpDeviceBuilder::new(HttpConfig::new("192.168.1.100"))
            .with_snapshot_dir("/tmp/scenes")
            .build_without_pull()
            .unwrap();

        assert_eq!(
            device.store().snapshots().path_for("a"),
            std::path::Path::new("/tmp/scenes/a.json")
        );
    }

    #[test]
    fn builder_rejects_empty_host() {
        let result = HttpDeviceBuilder::new(HttpConfig::new("")).build_without_pull();
        assert!(matches!(result, Err(Error::Protocol(_))));
    }
}
