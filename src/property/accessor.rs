// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field paths and the accessor bound to them.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde_json::{Map, Value};

use crate::error::DocumentError;

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member.
    Key(String),
    /// Array element.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A location inside a JSON document, such as `nl.on` or `seg[0].start`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wled_lib::property::FieldPath;
///
/// let path = FieldPath::key("seg").child(0).child("start");
/// assert_eq!(path.to_string(), "seg[0].start");
///
/// let doc = json!({"seg": [{"start": 10}]});
/// assert_eq!(path.lookup(&doc), Some(&json!(10)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The empty path, addressing the whole document.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A single-key path.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self(vec![PathSegment::Key(key.into())])
    }

    /// Returns this path extended by one segment.
    #[must_use]
    pub fn child(mut self, segment: impl Into<PathSegment>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Returns the segments of the path.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads the value at this path, if every step exists.
    #[must_use]
    pub fn lookup<'v>(&self, doc: &'v Value) -> Option<&'v Value> {
        self.0.iter().try_fold(doc, |node, segment| match segment {
            PathSegment::Key(key) => node.get(key.as_str()),
            PathSegment::Index(index) => node.get(*index),
        })
    }

    /// Writes `value` at this path.
    ///
    /// Missing or `null` slots on the way become objects when a key is
    /// written into them. An array index may replace an element or append
    /// exactly at the end.
    ///
    /// The document is left unchanged when the write fails.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::TypeMismatch` when a key is written into a
    /// non-object or an index into a non-array, and
    /// `DocumentError::IndexOutOfBounds` when an index lies past the end.
    pub fn assign(&self, doc: &mut Value, value: Value) -> Result<(), DocumentError> {
        self.check_writable(doc)?;
        let mut node = doc;
        for (depth, segment) in self.0.iter().enumerate() {
            node = self.slot(node, segment, depth)?;
        }
        *node = value;
        Ok(())
    }

    /// Walks the path without writing, failing where `assign` would.
    ///
    /// `None` stands for a slot that does not exist yet; it reads like `null`.
    fn check_writable(&self, doc: &Value) -> Result<(), DocumentError> {
        let mut node = Some(doc).filter(|node| !node.is_null());
        for (depth, segment) in self.0.iter().enumerate() {
            node = match (segment, node) {
                (PathSegment::Key(_), None) => None,
                (PathSegment::Key(key), Some(Value::Object(map))) => map.get(key.as_str()),
                (PathSegment::Index(index), Some(Value::Array(items))) => {
                    if *index > items.len() {
                        return Err(DocumentError::IndexOutOfBounds {
                            path: self.prefix(depth + 1),
                            len: items.len(),
                        });
                    }
                    items.get(*index)
                }
                (PathSegment::Key(_), Some(_)) => {
                    return Err(DocumentError::TypeMismatch {
                        path: self.prefix(depth + 1),
                        expected: "an object",
                    });
                }
                (PathSegment::Index(_), _) => {
                    return Err(DocumentError::TypeMismatch {
                        path: self.prefix(depth + 1),
                        expected: "an array",
                    });
                }
            }
            .filter(|node| !node.is_null());
        }
        Ok(())
    }

    fn slot<'v>(
        &self,
        node: &'v mut Value,
        segment: &PathSegment,
        depth: usize,
    ) -> Result<&'v mut Value, DocumentError> {
        match segment {
            PathSegment::Key(key) => {
                if node.is_null() {
                    *node = Value::Object(Map::new());
                }
                match node {
                    Value::Object(map) => Ok(map.entry(key.clone()).or_insert(Value::Null)),
                    _ => Err(DocumentError::TypeMismatch {
                        path: self.prefix(depth + 1),
                        expected: "an object",
                    }),
                }
            }
            PathSegment::Index(index) => match node {
                Value::Array(items) => {
                    let len = items.len();
                    if *index == len {
                        items.push(Value::Null);
                    }
                    items
                        .get_mut(*index)
                        .ok_or_else(|| DocumentError::IndexOutOfBounds {
                            path: self.prefix(depth + 1),
                            len,
                        })
                }
                _ => Err(DocumentError::TypeMismatch {
                    path: self.prefix(depth + 1),
                    expected: "an array",
                }),
            },
        }
    }

    fn prefix(&self, len: usize) -> String {
        Self(self.0[..len].to_vec()).to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Get/set access to the children of one location in a state document.
///
/// The accessor is generic over its document handle: a shared reference
/// gives read access, a mutable reference adds [`set`](Self::set). It
/// performs no validation; the typed views validate before calling `set`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wled_lib::property::{FieldPath, PropertyAccessor};
///
/// let mut doc = json!({"nl": {"on": false}});
/// let mut nl = PropertyAccessor::new(&mut doc, FieldPath::key("nl"));
/// nl.set("on", true).unwrap();
/// assert_eq!(nl.get("on"), Some(&json!(true)));
/// ```
#[derive(Debug)]
pub struct PropertyAccessor<D> {
    doc: D,
    base: FieldPath,
}

impl<D> PropertyAccessor<D> {
    /// Binds an accessor to `base` inside `doc`.
    #[must_use]
    pub fn new(doc: D, base: FieldPath) -> Self {
        Self { doc, base }
    }

    /// Returns the location this accessor is bound to.
    #[must_use]
    pub fn base(&self) -> &FieldPath {
        &self.base
    }

    fn field_path(&self, field: impl Into<PathSegment>) -> FieldPath {
        self.base.clone().child(field)
    }
}

impl<D: Deref<Target = Value>> PropertyAccessor<D> {
    /// Reads the child `field` of the bound location.
    #[must_use]
    pub fn get(&self, field: impl Into<PathSegment>) -> Option<&Value> {
        self.field_path(field).lookup(&self.doc)
    }

    /// Reads the bound location itself.
    #[must_use]
    pub fn current(&self) -> Option<&Value> {
        self.base.lookup(&self.doc)
    }

    /// Returns a read-only accessor to the same location.
    #[must_use]
    pub fn reborrow(&self) -> PropertyAccessor<&Value> {
        PropertyAccessor::new(&*self.doc, self.base.clone())
    }
}

impl<D: DerefMut<Target = Value>> PropertyAccessor<D> {
    /// Writes the child `field` of the bound location.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` when the document shape cannot hold the write.
    pub fn set(
        &mut self,
        field: impl Into<PathSegment>,
        value: impl Into<Value>,
    ) -> Result<(), DocumentError> {
        let path = self.field_path(field);
        tracing::trace!(path = %path, "Writing state field");
        path.assign(&mut self.doc, value.into())
    }

    /// Returns a mutable accessor to the same location.
    pub fn reborrow_mut(&mut self) -> PropertyAccessor<&mut Value> {
        PropertyAccessor::new(&mut *self.doc, self.base.clone())
    }
}
