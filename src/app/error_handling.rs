//! Error handling utilities
//!
//! This module provides centralized error handling for the application.

use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// - For [`crate::error::Error`]: shows the user message and exits with the
///   error's own code
/// - For other errors: shows the error message and exits with 1
///
/// With `verbose >= 1` the full error chain is printed as well.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    use crate::error::Error;

    error!("Fatal error: {:#}", error);

    let exit_code = if let Some(app_err) = error.downcast_ref::<Error>() {
        eprintln!("Error: {}", app_err.user_message());
        app_err.exit_code()
    } else {
        eprintln!("Error: {error}");
        1
    };

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(exit_code)
}
