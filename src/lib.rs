// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `wled_lib` - A Rust library to control WLED LED controllers.
//!
//! This library provides an async client for the WLED JSON API. A session
//! keeps the device's state document in memory; typed setters validate and
//! edit it locally, and [`Wled::push`] sends it back.
//!
//! # Supported Features
//!
//! - **Power and brightness**: `on`, `bri`, `transition`
//! - **Nightlight**: on/off, duration, mode, target brightness, time left
//! - **Segments**: lookup bounded by the device's segment limit
//! - **Snapshots**: save the state document to a JSON file and restore it
//!
//! # Quick Start
//!
//! ```no_run
//! use wled_lib::Wled;
//! use wled_lib::types::NightlightMode;
//!
//! #[tokio::main]
//! async fn main() -> wled_lib::Result<()> {
//!     // Fetches state, info, effects and palettes
//!     let mut led = Wled::http("192.168.1.100").build().await?;
//!
//!     led.set_on(true)?;
//!     led.set_brightness(100)?;
//!
//!     let mut nl = led.nightlight_mut();
//!     nl.set_on(true)?;
//!     nl.set_duration_minutes(20)?;
//!     nl.set_mode(NightlightMode::Fade)?;
//!
//!     // Send and read back the device's view of the state
//!     led.push(true).await?;
//!     println!("{:?} seconds left", led.nightlight().remaining_seconds());
//!
//!     led.save_to_file("bedtime")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Segments
//!
//! ```no_run
//! # async fn example() -> wled_lib::Result<()> {
//! let mut led = wled_lib::Wled::http("192.168.1.100").build().await?;
//!
//! // `None` when the id is not below `info.leds.maxseg`
//! if let Some(segment) = led.segments().get(0) {
//!     println!("segment 0 starts at {:?}", segment.start());
//! }
//! # Ok(())
//! # }
//! ```

mod device;
pub mod error;
pub mod property;
pub mod protocol;
pub mod state;
pub mod types;
pub mod validate;

#[cfg(feature = "http")]
pub use device::HttpDeviceBuilder;
pub use device::Wled;
pub use error::{DocumentError, Error, ParseError, ProtocolError, Result, StorageError, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{Endpoint, Protocol};
pub use state::{DeviceStore, SnapshotDir};
pub use types::{ModeInput, NightlightMode};
