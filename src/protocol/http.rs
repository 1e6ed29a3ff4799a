// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for WLED devices.

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::protocol::{Endpoint, JsonResponse, Protocol};

// ============================================================================
// HttpConfig - Connection parameters for a WLED device
// ============================================================================

/// Configuration for an HTTP WLED device.
///
/// No request timeout is set unless one is given with
/// [`with_timeout`](Self::with_timeout).
///
/// # Examples
///
/// ```
/// use wled_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = HttpConfig::new("192.168.1.100");
/// assert_eq!(config.base_url(), "http://192.168.1.100");
///
/// // With all options
/// let config = HttpConfig::new("wled-kitchen.local")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://wled-kitchen.local:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    timeout: Option<Duration>,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// A host given with an `http://` or `https://` prefix is used verbatim
    /// as the base URL, ignoring port and scheme settings.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the WLED device
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            timeout: None,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the timeout, if one is set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            return self.host.trim_end_matches('/').to_string();
        }
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let base_url = self.base_url();

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ProtocolError::Http)?;

        Ok(HttpClient { base_url, client })
    }
}

// ============================================================================
// HttpClient - JSON API client
// ============================================================================

/// HTTP client for the WLED JSON API.
///
/// # Examples
///
/// ```no_run
/// use wled_lib::protocol::{Endpoint, HttpClient, Protocol};
///
/// # async fn example() -> wled_lib::Result<()> {
/// let client = HttpClient::new("192.168.1.100")?;
/// let response = client.get(Endpoint::Info).await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client for the specified host.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL for an endpoint.
    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn read_response(response: Response) -> Result<JsonResponse, ProtocolError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(status = %status, "Received HTTP response");
        tracing::trace!(body = %body, "HTTP response body");

        Ok(JsonResponse::new(body))
    }
}

impl Protocol for HttpClient {
    async fn get(&self, endpoint: Endpoint) -> Result<JsonResponse, ProtocolError> {
        let url = self.url(endpoint);

        tracing::debug!(url = %url, "Sending HTTP GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        Self::read_response(response).await
    }

    async fn post(
        &self,
        endpoint: Endpoint,
        body: &Value,
    ) -> Result<JsonResponse, ProtocolError> {
        let url = self.url(endpoint);

        tracing::debug!(url = %url, "Sending HTTP POST");
        tracing::trace!(body = %body, "HTTP request body");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        Self::read_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_endpoints() {
        let client = HttpClient::new("192.168.1.100").unwrap();
        assert_eq!(client.url(Endpoint::State), "http://192.168.1.100/json/state");
        assert_eq!(client.url(Endpoint::Palettes), "http://192.168.1.100/json/pal");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let client = HttpClient::new("https://192.168.1.100/").unwrap();
        assert_eq!(client.base_url(), "https://192.168.1.100");
    }

    #[test]
    fn empty_host_is_rejected() {
        let result = HttpClient::new("  ");
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    // =========================================================================
    // HttpConfig tests
    // =========================================================================

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("192.168.1.100");
        assert_eq!(config.host(), "192.168.1.100");
        assert_eq!(config.port(), 80);
        assert!(!config.use_https());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn http_config_with_https() {
        let config = HttpConfig::new("192.168.1.100").with_https();
        assert!(config.use_https());
        assert_eq!(config.port(), 443);
        assert_eq!(config.base_url(), "https://192.168.1.100");
    }

    #[test]
    fn http_config_with_https_custom_port() {
        let config = HttpConfig::new("192.168.1.100")
            .with_port(8443)
            .with_https();
        assert_eq!(config.port(), 8443);
        assert_eq!(config.base_url(), "https://192.168.1.100:8443");
    }

    #[test]
    fn http_config_base_url_custom_port() {
        let config = HttpConfig::new("192.168.1.100").with_port(8080);
        assert_eq!(config.base_url(), "http://192.168.1.100:8080");
    }

    #[test]
    fn http_config_with_timeout() {
        let config = HttpConfig::new("192.168.1.100").with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn http_config_into_client() {
        let client = HttpConfig::new("10.0.0.7").into_client().unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.7");
    }
}
