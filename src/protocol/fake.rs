// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory device for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::error::ProtocolError;
use crate::protocol::{Endpoint, JsonResponse, Protocol};

/// Canned GET bodies per endpoint; POST bodies are recorded and answered
/// with `reply`.
#[derive(Debug, Default)]
pub(crate) struct FakeDevice {
    pub(crate) bodies: HashMap<Endpoint, String>,
    pub(crate) reply: String,
    pub(crate) posted: RefCell<Vec<Value>>,
}

impl FakeDevice {
    pub(crate) fn with(mut self, endpoint: Endpoint, body: &str) -> Self {
        self.bodies.insert(endpoint, body.to_string());
        self
    }

    pub(crate) fn loaded() -> Self {
        Self::default()
            .with(
                Endpoint::State,
                r#"{"on":true,"bri":128,"transition":7,"nl":{"on":false,"dur":60,"mode":1,"tbri":0,"rem":-1},"seg":[{"id":0,"start":0,"stop":30}]}"#,
            )
            .with(
                Endpoint::Info,
                r#"{"ver":"0.14.0","leds":{"count":30,"maxseg":16}}"#,
            )
            .with(Endpoint::Effects, r#"["Solid","Blink","Breathe"]"#)
            .with(Endpoint::Palettes, r#"["Default","* Random Cycle"]"#)
    }
}

impl Protocol for FakeDevice {
    async fn get(&self, endpoint: Endpoint) -> Result<JsonResponse, ProtocolError> {
        self.bodies
            .get(&endpoint)
            .map(|body| JsonResponse::new(body.clone()))
            .ok_or(ProtocolError::Status {
                code: 404,
                reason: "Not Found".to_string(),
            })
    }

    async fn post(&self, _endpoint: Endpoint, body: &Value) -> Result<JsonResponse, ProtocolError> {
        self.posted.borrow_mut().push(body.clone());
        Ok(JsonResponse::new(self.reply.clone()))
    }
}
