//! # usage-badges
//!
//! Folds the last week of events of one Sentry issue into small JSON files
//! that shields.io-style endpoint badges can render.
//!
//! ## Usage
//!
//! ```bash
//! SENTRY_AUTH_TOKEN=... usage-badges --issue 1234567890 [-o DIR] [--days N] [--dry-run]
//! ```
//!
//! ## Modules
//!
//! - `app` - Configuration, logging, fatal error handling and the run itself
//! - `cli` - Command-line argument definitions
//! - `error` - Error type and exit codes
//! - `format` - Compact number formatting for badge messages
//! - `pipeline` - Drives events through the reports and writes artifacts
//! - `report` - Report accumulators (distinct users, distinct vehicles)
//! - `sentry` - Paginated access to a Sentry issue's events
//! - `tags` - Tag mappings and identifiers derived from event tags
pub mod app;
pub mod cli;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod report;
pub mod sentry;
pub mod tags;
