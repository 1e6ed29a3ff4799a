// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `wled_lib` library.
//!
//! This module provides the error hierarchy for handling failures across the
//! library: value validation, HTTP communication, JSON parsing, snapshot file
//! storage, and writes into the in-memory state document.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value was rejected by a validator before being written.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during communication with the device.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A document from the device or a snapshot file could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A snapshot file could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A write into the state document hit an incompatible shape.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// Text could not be coerced to an integer.
    #[error("{0:?} is not an integer")]
    NotAnInteger(String),

    /// An unknown nightlight mode name was provided.
    #[error("invalid nightlight mode: {0}")]
    InvalidMode(String),
}

/// Errors related to HTTP communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status.
    #[error("HTTP {code} - {reason}")]
    Status {
        /// Numeric status code.
        code: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing JSON documents.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but does not have the expected shape.
    #[error("unexpected document format: {0}")]
    UnexpectedFormat(String),
}

/// Errors related to snapshot file storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a snapshot file failed.
    #[error("{path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised when writing through a field path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A container along the path has the wrong JSON type.
    #[error("cannot write {path}: parent is not {expected}")]
    TypeMismatch {
        /// The path being written.
        path: String,
        /// The JSON type the parent needed to be.
        expected: &'static str,
    },

    /// An array index lies past the end of the array.
    #[error("cannot write {path}: index past end of array of length {len}")]
    IndexOutOfBounds {
        /// The path being written.
        path: String,
        /// Length of the array at the time of the write.
        len: usize,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
