// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state storage.
//!
//! [`DeviceStore`] holds the documents of one device session and moves the
//! state document between memory, the device and [`SnapshotDir`] files.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use wled_lib::state::SnapshotDir;
//!
//! let tmp = std::env::temp_dir().join("wled_lib_doc_snapshots");
//! let dir = SnapshotDir::new(&tmp);
//! dir.save("evening", &json!({"on": true, "bri": 40}))?;
//! assert_eq!(dir.load("evening")?, json!({"on": true, "bri": 40}));
//! # std::fs::remove_dir_all(&tmp).ok();
//! # Ok::<(), wled_lib::Error>(())
//! ```

mod device_store;
mod snapshot;

pub use device_store::{DeviceStore, REBOOT_FLAG, VERBOSE_FLAG};
pub use snapshot::SnapshotDir;
