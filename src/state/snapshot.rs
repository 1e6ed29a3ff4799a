// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State snapshot files.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ParseError, Result, StorageError};

/// Directory holding state snapshots, one JSON document per file.
///
/// A snapshot named `evening` lives at `<dir>/evening.json`.
///
/// # Examples
///
/// ```
/// use wled_lib::state::SnapshotDir;
///
/// let dir = SnapshotDir::default();
/// assert_eq!(dir.path_for("evening"), std::path::Path::new("./saved_states/evening.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDir {
    root: PathBuf,
}

impl SnapshotDir {
    /// Directory used when none is configured.
    pub const DEFAULT_DIR: &'static str = "./saved_states";

    /// File extension of snapshot files.
    pub const EXTENSION: &'static str = "json";

    /// Creates a snapshot directory handle. The directory need not exist.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file path of the snapshot `name`.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{}", Self::EXTENSION))
    }

    /// Writes `document` as the snapshot `name`, creating the directory if
    /// needed. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the directory or file cannot be written.
    pub fn save(&self, name: &str, document: &Value) -> Result<PathBuf> {
        let path = self.path_for(name);
        let text = serde_json::to_string(document).map_err(ParseError::from)?;

        fs::create_dir_all(&self.root).map_err(|source| StorageError::Io {
            path: self.root.clone(),
            source,
        })?;
        fs::write(&path, text).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Saved state snapshot");
        Ok(path)
    }

    /// Reads the snapshot `name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the file cannot be read and
    /// `Error::Parse` if it is not valid JSON.
    pub fn load(&self, name: &str) -> Result<Value> {
        let path = self.path_for(name);
        let text = fs::read_to_string(&path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        let document = serde_json::from_str(&text).map_err(ParseError::from)?;

        tracing::debug!(path = %path.display(), "Loaded state snapshot");
        Ok(document)
    }

    /// Lists snapshot names, sorted, without the file extension.
    ///
    /// A directory that does not exist holds no snapshots.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>> {
        let io_err = |source| StorageError::Io {
            path: self.root.clone(),
            source,
        };

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(io_err(err).into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == Self::EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

impl Default for SnapshotDir {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIR)
    }
}
