//! Tile source abstraction
//!
//! This module provides traits and implementations for downloading map
//! tiles from remote servers, plus the pluggable credential scheme some
//! endpoints require.

mod auth;
mod http;
mod mapy;
mod types;

pub use auth::{CredentialProvider, NoCredentials, SdkKey, StaticKey};
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use mapy::{MapyProvider, BROWSER_REFERER, BROWSER_USER_AGENT, DEFAULT_ENDPOINT};
pub use types::{ProviderError, TileProvider};

#[cfg(test)]
pub use http::tests::MockHttpClient;
