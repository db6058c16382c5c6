//! Region stitching orchestration.
//!
//! Drives the full pipeline: map the bounding box onto the tile grid,
//! download every tile in row-major order, composite each row into a strip,
//! composite the strips into the final image, then remove the
//! intermediates. Every stage failure propagates and stops the run; files
//! produced before the failure stay on disk so a rerun can reuse the
//! already-downloaded tiles.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::compose::{compose, ComposeError, PlacedImage};
use crate::coord::{bounds_to_grid, CoordError, GeoBounds, TileGrid};
use crate::fetch::{FetchError, TileFetcher};

/// Edge length of one tile in pixels.
pub const TILE_EDGE: u32 = 256;

/// File name of the final stitched image.
pub const OUTPUT_FILE: &str = "output.png";

/// Errors that can occur while stitching a region.
#[derive(Debug, Error)]
pub enum StitchError {
    /// The bounding box or zoom level is out of range.
    #[error("Coordinate error: {0}")]
    Coord(#[from] CoordError),

    /// The bounding box covers no tiles on at least one axis.
    #[error("Bounding box maps to an empty {width}x{height} tile grid at zoom {zoom}")]
    EmptyRegion { width: u32, height: u32, zoom: u8 },

    /// The working directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A tile download failed; the run is aborted.
    #[error("Tile download failed: {0}")]
    Fetch(#[from] FetchError),

    /// A row strip or the final image could not be composited.
    #[error("Composition failed: {0}")]
    Compose(#[from] ComposeError),
}

/// Summary of a completed stitch.
#[derive(Debug, Clone)]
pub struct StitchSummary {
    /// Path of the final image.
    pub output: PathBuf,
    /// The normalized tile grid that was stitched.
    pub grid: TileGrid,
}

impl StitchSummary {
    /// Width of the final image in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.grid.width * TILE_EDGE
    }

    /// Height of the final image in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.grid.height * TILE_EDGE
    }
}

/// Orchestrates the download-and-stitch pipeline for one region.
pub struct RegionStitcher {
    fetcher: TileFetcher,
}

impl RegionStitcher {
    /// Creates a new stitcher over the given fetcher.
    ///
    /// The fetcher's working directory receives the tile files, the
    /// `row-{y}.png` strips and the final `output.png`.
    pub fn new(fetcher: TileFetcher) -> Self {
        Self { fetcher }
    }

    /// Downloads and stitches all tiles covering `bounds` at `zoom`.
    ///
    /// Tiles are fetched sequentially in row-major order; each completed row
    /// is composited into a strip, and the strips into the final image.
    /// Intermediate files are removed on success only.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::EmptyRegion`] when both corners map to the
    /// same tile index on an axis; any fetch or composition failure aborts
    /// the run with already-written files left in place.
    pub fn stitch(&self, bounds: &GeoBounds, zoom: u8) -> Result<StitchSummary, StitchError> {
        let dir = self.fetcher.dir();
        fs::create_dir_all(dir).map_err(|source| StitchError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let grid = bounds_to_grid(bounds, zoom)?;
        if grid.is_empty() {
            return Err(StitchError::EmptyRegion {
                width: grid.width,
                height: grid.height,
                zoom,
            });
        }

        info!(
            from_x = grid.origin_x,
            from_y = grid.origin_y,
            width = grid.width,
            height = grid.height,
            zoom,
            provider = self.fetcher.provider_name(),
            "Stitching region"
        );

        let mut cleanup: Vec<PathBuf> = Vec::new();
        let mut rows: Vec<PlacedImage> = Vec::with_capacity(grid.height as usize);

        for grid_y in 0..grid.height {
            let mut row_tiles: Vec<PlacedImage> = Vec::with_capacity(grid.width as usize);
            for tile in grid.row(grid_y) {
                let path = self.fetcher.fetch(&tile.coord)?;
                info!(tile = %tile.coord, path = %path.display(), "Tile ready");
                cleanup.push(path.clone());
                row_tiles.push(PlacedImage {
                    grid_x: tile.grid_x,
                    grid_y: 0,
                    path,
                });
            }

            let row_path = dir.join(format!("row-{}.png", grid_y));
            compose(&row_path, &row_tiles, TILE_EDGE, grid.width, 1)?;
            info!(row = grid_y + 1, of = grid.height, "Stitched row strip");
            cleanup.push(row_path.clone());
            rows.push(PlacedImage {
                grid_x: 0,
                grid_y,
                path: row_path,
            });
        }

        let output = dir.join(OUTPUT_FILE);
        compose(&output, &rows, TILE_EDGE, grid.width, grid.height)?;
        info!(output = %output.display(), "Region image written");

        self.remove_intermediates(&cleanup);

        Ok(StitchSummary { output, grid })
    }

    /// Deletes intermediate tile and row-strip files after a successful
    /// final composite. Removal failures are logged and skipped.
    fn remove_intermediates(&self, paths: &[PathBuf]) {
        for path in paths {
            if let Err(e) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "Failed to remove intermediate file");
            }
        }
    }
}
