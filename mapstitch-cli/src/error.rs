//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use mapstitch::fetch::FetchError;
use mapstitch::provider::ProviderError;
use mapstitch::stitch::StitchError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Failed to create the HTTP client
    HttpClient(ProviderError),
    /// The stitch run failed
    Stitch(StitchError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Stitch(StitchError::Fetch(FetchError::Download { .. })) => {
                eprintln!();
                eprintln!("Tiles downloaded before the failure were kept on disk; rerunning");
                eprintln!("the same command reuses them and only fetches what is missing.");
            }
            CliError::Stitch(StitchError::EmptyRegion { .. }) => {
                eprintln!();
                eprintln!("The two corner points map to the same tile on at least one axis.");
                eprintln!("Widen the bounding box or increase the zoom level.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Stitch(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::HttpClient(e) => Some(e),
            CliError::Stitch(e) => Some(e),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<StitchError> for CliError {
    fn from(e: StitchError) -> Self {
        CliError::Stitch(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_error_display() {
        let err = CliError::LoggingInit("permission denied".to_string());
        assert!(err.to_string().contains("Failed to initialize logging"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_stitch_error_converts() {
        let stitch_err = StitchError::EmptyRegion {
            width: 0,
            height: 0,
            zoom: 10,
        };
        let cli_err: CliError = stitch_err.into();
        assert!(matches!(cli_err, CliError::Stitch(_)));
    }
}
