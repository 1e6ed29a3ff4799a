// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment list and per-segment views over the `seg` member of the state
//! document.
//!
//! Segment ids are checked against `info.leds.maxseg` each time a segment
//! is looked up, since the info document is replaced on every pull.

use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::error::Result;
use crate::property::accessor::{FieldPath, PropertyAccessor};
use crate::property::as_byte;
use crate::validate::verify_byte_range;

/// Typed access to the segment collection.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wled_lib::property::SegmentList;
///
/// let state = json!({"seg": [{"start": 0, "stop": 30}, {"start": 30, "stop": 60}]});
/// let info = json!({"leds": {"maxseg": 2}});
///
/// let segments = SegmentList::new(&state, &info);
/// assert_eq!(segments.get(1).and_then(|s| s.start()), Some(30));
/// assert!(segments.get(2).is_none());
/// ```
#[derive(Debug)]
pub struct SegmentList<'i, D> {
    accessor: PropertyAccessor<D>,
    info: &'i Value,
}

impl<'i, D> SegmentList<'i, D> {
    /// Key of the segment member in the state document.
    pub const KEY: &'static str = "seg";

    /// Binds the view to the `seg` member of `state`, checking ids against
    /// `info`.
    #[must_use]
    pub fn new(state: D, info: &'i Value) -> Self {
        Self {
            accessor: PropertyAccessor::new(state, FieldPath::key(Self::KEY)),
            info,
        }
    }

    /// Returns the device's maximum segment count, from `info.leds.maxseg`.
    #[must_use]
    pub fn max_segments(&self) -> Option<u64> {
        self.info.pointer("/leds/maxseg").and_then(Value::as_u64)
    }

    fn in_range(&self, id: usize) -> bool {
        let Some(max_seg) = self.max_segments() else {
            tracing::warn!(id, "Device info has no leds.maxseg, segment unavailable");
            return false;
        };
        tracing::debug!(id, max_seg, "Indexing segment");
        u64::try_from(id).is_ok_and(|id| id < max_seg)
    }
}

impl<D: Deref<Target = Value>> SegmentList<'_, D> {
    /// Returns a read-only view of segment `id`, or `None` when `id` is not
    /// below the device's segment limit.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<Segment<&Value>> {
        self.in_range(id)
            .then(|| Segment::new(self.accessor.reborrow(), id))
    }

    /// Returns the `seg.dur` value.
    ///
    /// This field lives beside the segments rather than inside one; it is
    /// only present when `seg` is an object.
    #[must_use]
    pub fn duration_minutes(&self) -> Option<u8> {
        self.accessor.get("dur").and_then(as_byte)
    }
}

impl<D: DerefMut<Target = Value>> SegmentList<'_, D> {
    /// Returns a writable view of segment `id`, or `None` when `id` is not
    /// below the device's segment limit.
    pub fn get_mut(&mut self, id: usize) -> Option<Segment<&mut Value>> {
        if self.in_range(id) {
            Some(Segment::new(self.accessor.reborrow_mut(), id))
        } else {
            None
        }
    }

    /// Sets `seg.dur` (1-255).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the value is outside `[1, 255]`, and
    /// `Error::Document` if `seg` is an array.
    pub fn set_duration_minutes(&mut self, minutes: impl Into<i64>) -> Result<()> {
        self.accessor.set("dur", verify_byte_range(minutes)?)?;
        Ok(())
    }
}

/// View of one segment, bound to its id.
#[derive(Debug)]
pub struct Segment<D> {
    accessor: PropertyAccessor<D>,
    id: usize,
}

impl<D> Segment<D> {
    fn new(accessor: PropertyAccessor<D>, id: usize) -> Self {
        Self { accessor, id }
    }

    /// Returns the segment id this view is bound to.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }
}

impl<D: Deref<Target = Value>> Segment<D> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.accessor.get(self.id).and_then(|slot| slot.get(name))
    }

    /// Returns the first LED of the segment.
    #[must_use]
    pub fn start(&self) -> Option<u64> {
        self.field("start").and_then(Value::as_u64)
    }

    /// Returns the LED after the last LED of the segment.
    #[must_use]
    pub fn stop(&self) -> Option<u64> {
        self.field("stop").and_then(Value::as_u64)
    }

    /// Returns the number of LEDs covered, `stop - start`.
    #[must_use]
    pub fn led_count(&self) -> Option<u64> {
        self.stop()?.checked_sub(self.start()?)
    }
}

impl<D: DerefMut<Target = Value>> Segment<D> {
    /// Sets the segment start (1-255).
    ///
    /// The validated value is written to the segment's slot `seg[id]`,
    /// replacing the slot rather than its `start` member.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the value is outside `[1, 255]`, and
    /// `Error::Document` if `seg` cannot hold index `id`.
    pub fn set_start(&mut self, start: impl Into<i64>) -> Result<()> {
        self.accessor.set(self.id, verify_byte_range(start)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::{DocumentError, Error};

    fn state() -> Value {
        json!({"seg": [{"id": 0, "start": 0, "stop": 30}, {"id": 1, "start": 30, "stop": 60}]})
    }

    fn info(max_seg: u64) -> Value {
        json!({"leds": {"count": 60, "maxseg": max_seg}})
    }

    #[test]
    fn indexing_respects_max_seg() {
        let state = state();
        let info = info(2);
        let segments = SegmentList::new(&state, &info);
        assert_eq!(segments.max_segments(), Some(2));
        assert_eq!(segments.get(0).map(|s| s.id()), Some(0));
        assert_eq!(segments.get(1).map(|s| s.id()), Some(1));
        assert!(segments.get(2).is_none());
    }

    #[test]
    fn indexing_rereads_info_each_time() {
        let state = state();
        let small = info(1);
        let large = info(16);
        assert!(SegmentList::new(&state, &small).get(1).is_none());
        assert!(SegmentList::new(&state, &large).get(1).is_some());
    }

    #[test]
    fn missing_max_seg_yields_none() {
        let state = state();
        let info = json!({"leds": {"count": 60}});
        assert!(SegmentList::new(&state, &info).get(0).is_none());
    }

    #[test]
    fn segment_reads_bounds() {
        let state = state();
        let info = info(16);
        let segments = SegmentList::new(&state, &info);
        let seg = segments.get(1).unwrap();
        assert_eq!(seg.start(), Some(30));
        assert_eq!(seg.stop(), Some(60));
        assert_eq!(seg.led_count(), Some(30));
    }

    #[test]
    fn segment_within_limit_but_absent_reads_none() {
        let state = state();
        let info = info(16);
        let segments = SegmentList::new(&state, &info);
        let seg = segments.get(5).unwrap();
        assert_eq!(seg.start(), None);
    }

    #[test]
    fn set_start_replaces_whole_slot() {
        let mut state = state();
        let info = info(16);
        let mut segments = SegmentList::new(&mut state, &info);
        segments.get_mut(0).unwrap().set_start(10).unwrap();
        assert_eq!(state["seg"][0], json!(10));
        assert_eq!(state["seg"][1]["start"], json!(30));
    }

    #[test]
    fn set_start_validates_byte_range() {
        let mut state = state();
        let info = info(16);
        let mut segments = SegmentList::new(&mut state, &info);
        let mut seg = segments.get_mut(0).unwrap();
        assert!(matches!(seg.set_start(0), Err(Error::Value(_))));
        assert!(matches!(seg.set_start(300), Err(Error::Value(_))));
        assert_eq!(seg.start(), Some(0));
    }

    #[test]
    fn set_start_without_segments_keeps_state_clean() {
        let mut state = json!({"on": true});
        let info = info(16);
        let mut segments = SegmentList::new(&mut state, &info);
        assert!(matches!(
            segments.get_mut(0).unwrap().set_start(10),
            Err(Error::Document(DocumentError::TypeMismatch { .. }))
        ));
        assert_eq!(state, json!({"on": true}));
    }

    #[test]
    fn get_mut_out_of_range_is_none() {
        let mut state = state();
        let info = info(2);
        let mut segments = SegmentList::new(&mut state, &info);
        assert!(segments.get_mut(2).is_none());
    }

    #[test]
    fn duration_on_object_segment_member() {
        let mut state = json!({"seg": {"dur": 10}});
        let info = info(16);
        let mut segments = SegmentList::new(&mut state, &info);
        assert_eq!(segments.duration_minutes(), Some(10));
        segments.set_duration_minutes(20).unwrap();
        assert_eq!(segments.duration_minutes(), Some(20));
        assert!(segments.set_duration_minutes(0).is_err());
    }

    #[test]
    fn duration_on_segment_array_is_a_document_error() {
        let mut state = state();
        let info = info(16);
        let mut segments = SegmentList::new(&mut state, &info);
        assert_eq!(segments.duration_minutes(), None);
        assert!(matches!(
            segments.set_duration_minutes(20),
            Err(Error::Document(DocumentError::TypeMismatch { .. }))
        ));
    }
}
