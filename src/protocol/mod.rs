// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol implementations for communicating with WLED devices.
//!
//! WLED exposes its JSON API over plain HTTP. [`HttpClient`] implements the
//! [`Protocol`] trait against it; other transports (or test doubles) can
//! implement the trait and be handed to [`Wled::with_protocol`](crate::Wled::with_protocol).

#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::fmt;

use serde_json::Value;

use crate::error::ProtocolError;

/// The JSON resources a WLED device serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Operating state, `/json/state`. The only endpoint accepting POST.
    State,
    /// Capabilities and descriptors, `/json/info`.
    Info,
    /// Effect names, `/json/eff`.
    Effects,
    /// Palette names, `/json/pal`.
    Palettes,
}

impl Endpoint {
    /// All endpoints, in the order they are pulled.
    pub const ALL: [Self; 4] = [Self::State, Self::Info, Self::Effects, Self::Palettes];

    /// Returns the URL path of the endpoint.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::State => "/json/state",
            Self::Info => "/json/info",
            Self::Effects => "/json/eff",
            Self::Palettes => "/json/pal",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Response body from a WLED endpoint.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    /// The raw JSON response body.
    body: String,
}

impl JsonResponse {
    /// Creates a new response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, crate::error::ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// Trait for transports that can read and write WLED JSON endpoints.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Fetches an endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the device answers
    /// with a non-success status.
    async fn get(&self, endpoint: Endpoint) -> Result<JsonResponse, ProtocolError>;

    /// Sends `body` as JSON to an endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the device answers
    /// with a non-success status.
    async fn post(&self, endpoint: Endpoint, body: &Value)
    -> Result<JsonResponse, ProtocolError>;
}
