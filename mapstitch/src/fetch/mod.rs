//! Tile fetching with on-disk memoization.
//!
//! Downloaded tiles are written to `{x}-{y}.png` inside the working
//! directory. A tile whose file already exists is returned as-is without
//! touching the network, so rerunning over the same region only downloads
//! what a previous run did not finish.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::coord::TileCoord;
use crate::provider::{ProviderError, TileProvider};

/// Errors that can occur while fetching a tile to disk.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider could not deliver the tile bytes.
    #[error("Failed to download tile {tile}: {source}")]
    Download {
        tile: TileCoord,
        source: ProviderError,
    },

    /// The tile bytes could not be written to the working directory.
    #[error("Failed to write tile {tile} to {path}: {source}")]
    Io {
        tile: TileCoord,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Downloads tiles into a working directory, one file per coordinate.
///
/// The file is created only after the complete response body has been
/// received, so an aborted run never leaves truncated tile files behind.
pub struct TileFetcher {
    provider: Arc<dyn TileProvider>,
    dir: PathBuf,
}

impl TileFetcher {
    /// Creates a new fetcher writing into `dir`.
    ///
    /// # Arguments
    ///
    /// * `provider` - Tile source to download from
    /// * `dir` - Working directory for tile files (not created here)
    pub fn new(provider: Arc<dyn TileProvider>, dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            dir: dir.into(),
        }
    }

    /// The working directory tiles are written into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The provider's display name.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Path a tile is stored at, whether or not the file exists yet.
    pub fn tile_path(&self, tile: &TileCoord) -> PathBuf {
        self.dir.join(format!("{}-{}.png", tile.x, tile.y))
    }

    /// Fetches one tile, reusing the on-disk copy when present.
    ///
    /// # Returns
    ///
    /// The path of the tile file. Idempotent by coordinate: a second call
    /// for the same tile performs zero provider requests.
    pub fn fetch(&self, tile: &TileCoord) -> Result<PathBuf, FetchError> {
        let path = self.tile_path(tile);
        if path.exists() {
            debug!(tile = %tile, path = %path.display(), "Tile already on disk, skipping download");
            return Ok(path);
        }

        let bytes = self
            .provider
            .fetch_tile(tile)
            .map_err(|source| FetchError::Download {
                tile: *tile,
                source,
            })?;

        fs::write(&path, &bytes).map_err(|source| FetchError::Io {
            tile: *tile,
            path: path.clone(),
            source,
        })?;

        debug!(tile = %tile, bytes = bytes.len(), "Downloaded tile");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock provider that counts how often it is asked for tiles.
    struct CountingProvider {
        response: Result<Vec<u8>, ProviderError>,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn returning(response: Result<Vec<u8>, ProviderError>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TileProvider for CountingProvider {
        fn fetch_tile(&self, _tile: &TileCoord) -> Result<Vec<u8>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }

        fn name(&self) -> &str {
            "counting-mock"
        }

        fn min_zoom(&self) -> u8 {
            0
        }

        fn max_zoom(&self) -> u8 {
            19
        }
    }

    fn tile(x: u32, y: u32) -> TileCoord {
        TileCoord { x, y, zoom: 10 }
    }

    #[test]
    fn test_fetch_writes_tile_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(CountingProvider::returning(Ok(vec![1, 2, 3])));
        let fetcher = TileFetcher::new(provider.clone(), dir.path());

        let path = fetcher.fetch(&tile(4, 9)).unwrap();

        assert_eq!(path, dir.path().join("4-9.png"));
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_fetch_is_idempotent_by_coordinate() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(CountingProvider::returning(Ok(vec![1, 2, 3])));
        let fetcher = TileFetcher::new(provider.clone(), dir.path());

        let first = fetcher.fetch(&tile(4, 9)).unwrap();
        let second = fetcher.fetch(&tile(4, 9)).unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.calls(), 1, "second fetch must not hit the network");
    }

    #[test]
    fn test_fetch_returns_existing_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(CountingProvider::returning(Ok(vec![1, 2, 3])));
        let fetcher = TileFetcher::new(provider.clone(), dir.path());

        // Pre-seed the file with different contents
        fs::write(dir.path().join("4-9.png"), b"seeded").unwrap();

        let path = fetcher.fetch(&tile(4, 9)).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"seeded");
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_fetch_propagates_download_failure() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(CountingProvider::returning(Err(ProviderError::Status {
            status: 404,
            url: "https://example.com/10-4-9".to_string(),
        })));
        let fetcher = TileFetcher::new(provider, dir.path());

        let result = fetcher.fetch(&tile(4, 9));

        assert!(matches!(result, Err(FetchError::Download { .. })));
        assert!(
            !dir.path().join("4-9.png").exists(),
            "no file may be created for a failed download"
        );
    }

    #[test]
    fn test_fetch_reports_write_failure() {
        let provider = Arc::new(CountingProvider::returning(Ok(vec![1, 2, 3])));
        // Directory that does not exist; the write must fail
        let fetcher = TileFetcher::new(provider, "/nonexistent/mapstitch-test");

        let result = fetcher.fetch(&tile(4, 9));

        assert!(matches!(result, Err(FetchError::Io { .. })));
    }
}
