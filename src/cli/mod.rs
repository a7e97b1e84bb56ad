//! CLI definitions
//!
//! This module contains the command-line argument structures. Turning them
//! into a runnable configuration happens in [`crate::app::config`].

pub mod args;

// Re-export the main CLI structure for convenience
pub use args::Cli;
