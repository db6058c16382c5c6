//! MapStitch - bounding-box map imagery stitched from slippy-map tiles
//!
//! This library downloads every map tile covering a geographic bounding box
//! from a remote tile server and composites them into a single PNG: tiles
//! are fetched sequentially in row-major order, each grid row is stitched
//! into a strip, and the strips are stitched into the final image.
//!
//! # Pipeline
//!
//! ```text
//! bounding box + zoom
//!   -> coord     (tile grid covering the box)
//!   -> fetch     (one file per tile, memoized on disk)
//!   -> compose   (row strips, then the final canvas)
//!   -> stitch    (orchestration and cleanup)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mapstitch::coord::GeoBounds;
//! use mapstitch::fetch::TileFetcher;
//! use mapstitch::provider::{MapyProvider, ReqwestClient, SdkKey};
//! use mapstitch::provider::{BROWSER_REFERER, BROWSER_USER_AGENT};
//! use mapstitch::stitch::RegionStitcher;
//!
//! let client = ReqwestClient::impersonating(BROWSER_USER_AGENT, BROWSER_REFERER)?;
//! let provider = Arc::new(MapyProvider::new(client, Arc::new(SdkKey)));
//! let stitcher = RegionStitcher::new(TileFetcher::new(provider, "tiles"));
//!
//! let bounds = GeoBounds::new(49.199381, 16.601219, 49.192088, 16.613920);
//! let summary = stitcher.stitch(&bounds, 18)?;
//! println!("wrote {}", summary.output.display());
//! ```

pub mod compose;
pub mod coord;
pub mod fetch;
pub mod logging;
pub mod provider;
pub mod stitch;
