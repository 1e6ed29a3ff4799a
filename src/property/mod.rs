// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed property views over the state document.
//!
//! Every view is built from a [`PropertyAccessor`]: a document handle plus
//! the [`FieldPath`] the view is bound to. Views are generic over the handle,
//! so the same type serves read-only (`&Value`) and writable
//! (`&mut Value`) access; setters exist only on the writable form and
//! validate through [`crate::validate`] before writing.
//!
//! # Views
//!
//! - [`Nightlight`] - the `nl` object
//! - [`SegmentList`] - the `seg` member, indexed by segment id
//! - [`Segment`] - one entry of `seg`

mod accessor;
mod nightlight;
mod segment;

pub use accessor::{FieldPath, PathSegment, PropertyAccessor};
pub use nightlight::Nightlight;
pub use segment::{Segment, SegmentList};

use serde_json::Value;

/// Reads a JSON number that fits in a byte.
pub(crate) fn as_byte(value: &Value) -> Option<u8> {
    value.as_u64().and_then(|n| u8::try_from(n).ok())
}
