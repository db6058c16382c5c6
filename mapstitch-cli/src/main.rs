//! MapStitch CLI - Command-line interface
//!
//! Downloads the map tiles covering a geographic bounding box and stitches
//! them into a single `output.png` in the chosen directory.

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use mapstitch::coord::GeoBounds;
use mapstitch::fetch::TileFetcher;
use mapstitch::logging::{default_log_dir, default_log_file, init_logging};
use mapstitch::provider::{
    MapyProvider, ReqwestClient, SdkKey, BROWSER_REFERER, BROWSER_USER_AGENT,
};
use mapstitch::stitch::RegionStitcher;

use error::CliError;

#[derive(Parser)]
#[command(name = "mapstitch")]
#[command(about = "Download and stitch the map tiles covering a bounding box", long_about = None)]
#[command(version)]
struct Args {
    /// Directory for tile downloads and the final output image
    output_dir: PathBuf,

    /// Zoom level of the tile grid (0-19)
    zoom: u8,

    /// Latitude of the first corner, decimal degrees
    #[arg(allow_negative_numbers = true)]
    from_lat: f64,

    /// Longitude of the first corner, decimal degrees
    #[arg(allow_negative_numbers = true)]
    from_long: f64,

    /// Latitude of the opposite corner, decimal degrees
    #[arg(allow_negative_numbers = true)]
    to_lat: f64,

    /// Longitude of the opposite corner, decimal degrees
    #[arg(allow_negative_numbers = true)]
    to_long: f64,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let _logging = init_logging(default_log_dir(), default_log_file())
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    info!(version = env!("CARGO_PKG_VERSION"), "MapStitch starting");

    let client = ReqwestClient::impersonating(BROWSER_USER_AGENT, BROWSER_REFERER)
        .map_err(CliError::HttpClient)?;
    let provider = Arc::new(MapyProvider::new(client, Arc::new(SdkKey)));
    let fetcher = TileFetcher::new(provider, &args.output_dir);
    let stitcher = RegionStitcher::new(fetcher);

    let bounds = GeoBounds::new(args.from_lat, args.from_long, args.to_lat, args.to_long);

    let start = std::time::Instant::now();
    let summary = stitcher.stitch(&bounds, args.zoom)?;
    let elapsed = start.elapsed();

    println!();
    println!(
        "Output saved to {} ({}x{} tiles, {}x{} px) in {:.2}s",
        summary.output.display(),
        summary.grid.width,
        summary.grid.height,
        summary.pixel_width(),
        summary.pixel_height(),
        elapsed.as_secs_f64()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_all_positional() {
        let args = Args::try_parse_from([
            "mapstitch",
            "tiles",
            "18",
            "49.199381",
            "16.601219",
            "49.192088",
            "16.613920",
        ])
        .unwrap();

        assert_eq!(args.output_dir, PathBuf::from("tiles"));
        assert_eq!(args.zoom, 18);
        assert_eq!(args.from_lat, 49.199381);
        assert_eq!(args.from_long, 16.601219);
        assert_eq!(args.to_lat, 49.192088);
        assert_eq!(args.to_long, 16.613920);
    }

    #[test]
    fn test_args_parse_negative_coordinates() {
        let args = Args::try_parse_from([
            "mapstitch",
            "tiles",
            "16",
            "40.7128",
            "-74.0060",
            "40.6892",
            "-73.9857",
        ])
        .unwrap();

        assert_eq!(args.from_long, -74.0060);
        assert_eq!(args.to_long, -73.9857);
    }

    #[test]
    fn test_args_reject_missing_arguments() {
        let result = Args::try_parse_from(["mapstitch", "tiles", "18"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_reject_non_numeric_zoom() {
        let result = Args::try_parse_from([
            "mapstitch",
            "tiles",
            "eighteen",
            "49.199381",
            "16.601219",
            "49.192088",
            "16.613920",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_reject_non_numeric_latitude() {
        let result = Args::try_parse_from([
            "mapstitch",
            "tiles",
            "18",
            "north",
            "16.601219",
            "49.192088",
            "16.613920",
        ]);
        assert!(result.is_err());
    }
}
