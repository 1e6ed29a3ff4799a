// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device documents and their synchronisation with the device.

use serde_json::{Value, json};

use crate::error::{ParseError, Result};
use crate::property::FieldPath;
use crate::protocol::{Endpoint, Protocol};
use crate::state::SnapshotDir;

/// Member added to a pushed state to request the full state in the reply.
pub const VERBOSE_FLAG: &str = "v";

/// Member that makes the device reboot when pushed.
pub const REBOOT_FLAG: &str = "rb";

/// The documents of one device session and the transport that fills them.
///
/// The store owns the state document (mutable, pushed on request), the info
/// document, and the effect and palette name lists. Each [`pull`](Self::pull)
/// replaces all four.
#[derive(Debug)]
pub struct DeviceStore<P: Protocol> {
    protocol: P,
    state: Value,
    info: Value,
    effects: Vec<String>,
    palettes: Vec<String>,
    snapshots: SnapshotDir,
}

impl<P: Protocol> DeviceStore<P> {
    /// Creates a store with empty documents. Nothing is fetched.
    #[must_use]
    pub fn new(protocol: P) -> Self {
        Self {
            protocol,
            state: Value::Null,
            info: Value::Null,
            effects: Vec::new(),
            palettes: Vec::new(),
            snapshots: SnapshotDir::default(),
        }
    }

    /// Sets the directory used for state snapshots.
    #[must_use]
    pub fn with_snapshot_dir(mut self, snapshots: SnapshotDir) -> Self {
        self.snapshots = snapshots;
        self
    }

    /// Returns the transport.
    #[must_use]
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Returns the snapshot directory.
    #[must_use]
    pub fn snapshots(&self) -> &SnapshotDir {
        &self.snapshots
    }

    /// Returns the state document.
    #[must_use]
    pub fn state(&self) -> &Value {
        &self.state
    }

    /// Returns the state document for direct edits.
    pub fn state_mut(&mut self) -> &mut Value {
        &mut self.state
    }

    /// Replaces the state document, returning the previous one.
    pub fn replace_state(&mut self, state: Value) -> Value {
        std::mem::replace(&mut self.state, state)
    }

    /// Returns the info document.
    #[must_use]
    pub fn info(&self) -> &Value {
        &self.info
    }

    /// Returns the state document writable together with the info document.
    #[must_use]
    pub fn documents_mut(&mut self) -> (&mut Value, &Value) {
        (&mut self.state, &self.info)
    }

    /// Returns the effect names, indexed by effect id.
    #[must_use]
    pub fn effects(&self) -> &[String] {
        &self.effects
    }

    /// Returns the palette names, indexed by palette id.
    #[must_use]
    pub fn palettes(&self) -> &[String] {
        &self.palettes
    }

    /// Returns the id of the effect called `name`.
    #[must_use]
    pub fn effect_id(&self, name: &str) -> Option<usize> {
        self.effects.iter().position(|e| e == name)
    }

    /// Returns the id of the palette called `name`.
    #[must_use]
    pub fn palette_id(&self, name: &str) -> Option<usize> {
        self.palettes.iter().position(|p| p == name)
    }

    /// Returns whether all four documents are non-empty.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !is_empty_document(&self.state)
            && !is_empty_document(&self.info)
            && !self.effects.is_empty()
            && !self.palettes.is_empty()
    }

    /// Fetches state, info, effects and palettes from the device.
    ///
    /// The documents are replaced only once all four fetches succeeded.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if a request fails and `Error::Parse` if a
    /// body is not the expected JSON.
    pub async fn pull(&mut self) -> Result<()> {
        let state: Value = self.protocol.get(Endpoint::State).await?.parse()?;
        let info: Value = self.protocol.get(Endpoint::Info).await?.parse()?;
        let effects = name_list(
            Endpoint::Effects,
            self.protocol.get(Endpoint::Effects).await?.parse()?,
        )?;
        let palettes = name_list(
            Endpoint::Palettes,
            self.protocol.get(Endpoint::Palettes).await?.parse()?,
        )?;

        tracing::debug!(
            effects = effects.len(),
            palettes = palettes.len(),
            "Pulled device documents"
        );

        self.state = state;
        self.info = info;
        self.effects = effects;
        self.palettes = palettes;
        Ok(())
    }

    /// Sends the state document to the device.
    ///
    /// With `expect_response`, a copy of the state carrying `"v": true` is
    /// sent and the state document is replaced with the device's reply.
    /// Otherwise the state document is sent as is and the reply is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails, `Error::Parse` if the
    /// requested reply is not JSON, and `Error::Document` if the flag cannot
    /// be added because the state is not an object.
    pub async fn push(&mut self, expect_response: bool) -> Result<()> {
        if !expect_response {
            self.protocol.post(Endpoint::State, &self.state).await?;
            return Ok(());
        }

        let mut body = self.state.clone();
        FieldPath::key(VERBOSE_FLAG).assign(&mut body, Value::Bool(true))?;
        let reply = self.protocol.post(Endpoint::State, &body).await?;
        self.state = reply.parse()?;
        Ok(())
    }

    /// Writes the state document to the snapshot `name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the file cannot be written.
    pub fn save_to_file(&self, name: &str) -> Result<()> {
        self.snapshots.save(name, &self.state)?;
        Ok(())
    }

    /// Replaces the state document with the snapshot `name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the file cannot be read and
    /// `Error::Parse` if it is not JSON.
    pub fn load_from_file(&mut self, name: &str) -> Result<()> {
        self.state = self.snapshots.load(name)?;
        Ok(())
    }

    /// Asks the device to reboot.
    ///
    /// The state document is replaced by the reboot request, so unsaved
    /// changes are lost.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails.
    pub async fn reboot(&mut self) -> Result<()> {
        tracing::debug!("Requesting device reboot");
        self.state = json!({ REBOOT_FLAG: true });
        self.push(false).await
    }
}

/// Returns whether a document counts as empty for [`DeviceStore::is_loaded`].
fn is_empty_document(document: &Value) -> bool {
    match document {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Converts an effects or palettes document into names.
///
/// `null` and `{}` are accepted as empty lists.
fn name_list(endpoint: Endpoint, document: Value) -> std::result::Result<Vec<String>, ParseError> {
    match document {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(name) => Ok(name),
                other => Err(ParseError::UnexpectedFormat(format!(
                    "{endpoint} entry is not a string: {other}"
                ))),
            })
            .collect(),
        Value::Null => Ok(Vec::new()),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        other => Err(ParseError::UnexpectedFormat(format!(
            "{endpoint} is not a list: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ProtocolError};
    use crate::protocol::fake::FakeDevice;

    #[tokio::test]
    async fn pull_fills_all_documents() {
        let mut store = DeviceStore::new(FakeDevice::loaded());
        assert!(!store.is_loaded());

        store.pull().await.unwrap();

        assert!(store.is_loaded());
        assert_eq!(store.state()["bri"], 128);
        assert_eq!(store.info()["leds"]["maxseg"], 16);
        assert_eq!(store.effects(), ["Solid", "Blink", "Breathe"]);
        assert_eq!(store.palette_id("* Random Cycle"), Some(1));
        assert_eq!(store.effect_id("Rainbow"), None);
    }

    #[tokio::test]
    async fn empty_endpoint_leaves_store_unloaded() {
        for (endpoint, empty) in [
            (Endpoint::State, "{}"),
            (Endpoint::Info, "{}"),
            (Endpoint::Effects, "[]"),
            (Endpoint::Palettes, "[]"),
        ] {
            let mut store = DeviceStore::new(FakeDevice::loaded().with(endpoint, empty));
            store.pull().await.unwrap();
            assert!(!store.is_loaded(), "{endpoint} empty");
        }
    }

    #[tokio::test]
    async fn failed_pull_keeps_previous_documents() {
        let mut store = DeviceStore::new(FakeDevice::loaded());
        store.pull().await.unwrap();
        store.protocol.bodies.remove(&Endpoint::Palettes);
        store
            .protocol
            .bodies
            .insert(Endpoint::State, r#"{"on":false}"#.to_string());

        let err = store.pull().await.unwrap_err();

        assert!(matches!(err, Error::Protocol(ProtocolError::Status { code: 404, .. })));
        assert_eq!(store.state()["on"], true);
        assert_eq!(store.palettes().len(), 2);
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let mut store = DeviceStore::new(FakeDevice::loaded().with(Endpoint::Info, "<html>"));
        assert!(matches!(store.pull().await, Err(Error::Parse(_))));
        assert!(!store.is_loaded());
    }

    #[tokio::test]
    async fn effects_must_be_names() {
        let mut store = DeviceStore::new(FakeDevice::loaded().with(Endpoint::Effects, "[1,2]"));
        assert!(matches!(
            store.pull().await,
            Err(Error::Parse(ParseError::UnexpectedFormat(_)))
        ));
    }

    #[tokio::test]
    async fn push_without_response_sends_state_unchanged() {
        let mut device = FakeDevice::loaded();
        device.reply = r#"{"success":true}"#.to_string();
        let mut store = DeviceStore::new(device);
        store.pull().await.unwrap();
        let before = store.state().clone();

        store.push(false).await.unwrap();

        assert_eq!(store.state(), &before);
        assert_eq!(store.protocol.posted.borrow().as_slice(), [before]);
    }

    #[tokio::test]
    async fn push_with_response_adds_flag_and_replaces_state() {
        let mut device = FakeDevice::loaded();
        device.reply = r#"{"on":true,"bri":40,"nl":{"on":false}}"#.to_string();
        let mut store = DeviceStore::new(device);
        store.pull().await.unwrap();
        let mut expected_body = store.state().clone();
        expected_body["v"] = Value::Bool(true);

        store.push(true).await.unwrap();

        assert_eq!(store.protocol.posted.borrow().as_slice(), [expected_body]);
        assert_eq!(store.state(), &json!({"on": true, "bri": 40, "nl": {"on": false}}));
    }

    #[tokio::test]
    async fn push_with_response_rejects_non_object_state() {
        let mut store = DeviceStore::new(FakeDevice::loaded());
        store.replace_state(json!([1, 2]));
        assert!(matches!(store.push(true).await, Err(Error::Document(_))));
        assert!(store.protocol.posted.borrow().is_empty());
    }

    #[tokio::test]
    async fn reboot_replaces_state_and_pushes() {
        let mut store = DeviceStore::new(FakeDevice::loaded());
        store.pull().await.unwrap();

        store.reboot().await.unwrap();

        assert_eq!(store.state(), &json!({"rb": true}));
        assert_eq!(store.protocol.posted.borrow().as_slice(), [json!({"rb": true})]);
    }

    #[tokio::test]
    async fn snapshot_round_trip_through_store() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = DeviceStore::new(FakeDevice::loaded())
            .with_snapshot_dir(SnapshotDir::new(tmp.path()));
        store.pull().await.unwrap();
        let saved = store.state().clone();

        store.save_to_file("comp2").unwrap();
        store.state_mut()["bri"] = json!(1);
        store.load_from_file("comp2").unwrap();

        assert_eq!(store.state(), &saved);
    }

    #[test]
    fn empty_documents() {
        assert!(is_empty_document(&Value::Null));
        assert!(is_empty_document(&json!({})));
        assert!(is_empty_document(&json!([])));
        assert!(!is_empty_document(&json!({"on": true})));
        assert!(!is_empty_document(&json!(0)));
    }
}
