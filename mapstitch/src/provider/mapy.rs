//! mapy.cz tile provider.
//!
//! Fetches 256×256 raster tiles from the mapy.cz tile servers.
//!
//! # URL Pattern
//!
//! `https://mapserver.mapy.cz/bing/{zoom}-{x}-{y}?key={token}`
//!
//! - `{zoom}-{x}-{y}` - Standard XYZ tile coordinates, dash-separated
//! - `key` - Short-lived token from a [`CredentialProvider`]
//!
//! # Note
//!
//! The endpoint also expects browser-like headers; wire the provider to a
//! client built with [`ReqwestClient::impersonating`] using
//! [`BROWSER_USER_AGENT`] and [`BROWSER_REFERER`].
//!
//! [`ReqwestClient::impersonating`]: super::ReqwestClient::impersonating

use std::sync::Arc;

use crate::coord::TileCoord;
use crate::provider::{CredentialProvider, HttpClient, ProviderError, TileProvider};

/// Default mapy.cz tile endpoint (aerial layer).
pub const DEFAULT_ENDPOINT: &str = "https://mapserver.mapy.cz/bing";

/// `User-Agent` the tile servers accept.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/80.0.3987.122 Safari/537.36";

/// `Referer` the tile servers accept.
pub const BROWSER_REFERER: &str = "https://www.mapy.cz/";

/// mapy.cz tile provider.
///
/// Builds the dash-separated tile URL and appends the signed `key` query
/// parameter when the credential provider yields one.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use mapstitch::provider::{MapyProvider, ReqwestClient, SdkKey};
/// use mapstitch::provider::{BROWSER_REFERER, BROWSER_USER_AGENT};
///
/// let client = ReqwestClient::impersonating(BROWSER_USER_AGENT, BROWSER_REFERER)?;
/// let provider = MapyProvider::new(client, Arc::new(SdkKey));
/// ```
pub struct MapyProvider<C: HttpClient> {
    http_client: C,
    credentials: Arc<dyn CredentialProvider>,
    endpoint: String,
}

impl<C: HttpClient> MapyProvider<C> {
    /// Creates a new mapy.cz provider against the default endpoint.
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client for making requests
    /// * `credentials` - Source of the `key` query parameter
    pub fn new(http_client: C, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            http_client,
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Overrides the endpoint, e.g. for a different layer or a test server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builds the tile URL for the given coordinates.
    fn build_url(&self, tile: &TileCoord) -> String {
        let mut url = format!("{}/{}-{}-{}", self.endpoint, tile.zoom, tile.x, tile.y);
        if let Some(key) = self.credentials.api_key() {
            url.push_str("?key=");
            url.push_str(&encode_query_value(&key));
        }
        url
    }
}

/// Percent-escapes the characters a base64 token can contain that are not
/// safe in a query value (`+`, `/`, `=`).
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '+' => out.push_str("%2B"),
            '/' => out.push_str("%2F"),
            '=' => out.push_str("%3D"),
            _ => out.push(ch),
        }
    }
    out
}

impl<C: HttpClient> TileProvider for MapyProvider<C> {
    fn fetch_tile(&self, tile: &TileCoord) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(tile.zoom) {
            return Err(ProviderError::UnsupportedZoom(tile.zoom));
        }

        let url = self.build_url(tile);
        self.http_client.get(&url)
    }

    fn name(&self) -> &str {
        "mapy.cz"
    }

    fn min_zoom(&self) -> u8 {
        0
    }

    fn max_zoom(&self) -> u8 {
        19
    }
}
