//! Raster composition.
//!
//! Pastes a set of positioned images onto a white canvas and writes the
//! result as a single PNG. The canvas color format follows the first input
//! image; all inputs are assumed to share one format and remaining inputs
//! are converted to it rather than validated.

use std::path::{Path, PathBuf};

use image::{imageops, DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while compositing images.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The input list was empty; there is nothing to size the canvas from.
    #[error("No input images to composite")]
    NoInputs,

    /// An input image could not be opened or decoded.
    #[error("Failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        source: image::ImageError,
    },

    /// The composite could not be encoded or written.
    #[error("Failed to write composite {path}: {source}")]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// One input image with its placement in the target grid.
///
/// The pixel offset is `grid_x * tile_edge`, `grid_y * tile_edge`.
#[derive(Debug, Clone)]
pub struct PlacedImage {
    /// Column offset within the grid, 0 at the west edge
    pub grid_x: u32,
    /// Row offset within the grid, 0 at the north edge
    pub grid_y: u32,
    /// On-disk raster to paste
    pub path: PathBuf,
}

/// Composites `images` onto a blank canvas and writes `dest` as PNG.
///
/// The canvas measures `tile_edge * columns` by `tile_edge * rows` pixels
/// with a white background, in the color format of the first input (alpha is
/// preserved only when the first input carries it). Paste order is
/// irrelevant for non-overlapping grids; overlapping inputs are unsupported.
///
/// Deterministic: the same inputs and canvas size produce a byte-identical
/// output file.
pub fn compose(
    dest: &Path,
    images: &[PlacedImage],
    tile_edge: u32,
    columns: u32,
    rows: u32,
) -> Result<(), ComposeError> {
    let first = images.first().ok_or(ComposeError::NoInputs)?;
    let first_image = open_input(&first.path)?;

    let width = tile_edge * columns;
    let height = tile_edge * rows;
    let mut canvas = if first_image.color().has_alpha() {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([255, 255, 255, 255]),
        ))
    } else {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 255, 255])))
    };

    for placed in images {
        let tile_image = if placed.path == first.path {
            first_image.clone()
        } else {
            open_input(&placed.path)?
        };

        let x = placed.grid_x as i64 * tile_edge as i64;
        let y = placed.grid_y as i64 * tile_edge as i64;
        imageops::replace(&mut canvas, &tile_image, x, y);
    }

    canvas
        .save_with_format(dest, ImageFormat::Png)
        .map_err(|source| ComposeError::Write {
            path: dest.to_path_buf(),
            source,
        })?;

    debug!(dest = %dest.display(), width, height, inputs = images.len(), "Composite written");
    Ok(())
}

fn open_input(path: &Path) -> Result<DynamicImage, ComposeError> {
    image::open(path).map_err(|source| ComposeError::Read {
        path: path.to_path_buf(),
        source,
    })
}
