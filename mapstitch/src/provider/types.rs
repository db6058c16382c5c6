//! Provider types and traits

use thiserror::Error;

use crate::coord::TileCoord;

/// Errors that can occur while talking to a tile server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// HTTP transport failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status
    #[error("Tile server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Zoom level not served by this provider
    #[error("Zoom level {0} not supported by provider")]
    UnsupportedZoom(u8),
}

/// Trait for slippy-map tile sources.
///
/// Implementors return the raw raster bytes for a single tile. They must be
/// `Send + Sync` so a fetcher can be shared behind an `Arc`.
pub trait TileProvider: Send + Sync {
    /// Downloads the raster bytes of one tile.
    ///
    /// # Arguments
    ///
    /// * `tile` - Tile coordinate in the slippy-map grid
    ///
    /// # Returns
    ///
    /// Raw image data (typically PNG or JPEG) or an error.
    fn fetch_tile(&self, tile: &TileCoord) -> Result<Vec<u8>, ProviderError>;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;

    /// Returns the minimum supported zoom level.
    fn min_zoom(&self) -> u8;

    /// Returns the maximum supported zoom level.
    fn max_zoom(&self) -> u8;

    /// Checks if this provider supports the given zoom level.
    fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom() && zoom <= self.max_zoom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display_status() {
        let err = ProviderError::Status {
            status: 404,
            url: "https://example.com/18-1-2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Tile server returned HTTP 404 for https://example.com/18-1-2"
        );
    }

    #[test]
    fn test_provider_error_display_http() {
        let err = ProviderError::Http("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_provider_error_display_unsupported_zoom() {
        let err = ProviderError::UnsupportedZoom(23);
        assert_eq!(err.to_string(), "Zoom level 23 not supported by provider");
    }
}
