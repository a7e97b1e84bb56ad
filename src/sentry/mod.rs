//! Sentry issue events
//!
//! Everything needed to pull the events of one Sentry issue, newest first:
//!
//! - [`Event`] - the subset of the event payload the reports read
//! - [`PageFetcher`] - one page of the issue's event collection per call,
//!   with [`SentryClient`] for the real API and [`MockPageFetcher`] for tests
//! - [`EventSource`] - pull-driven pagination over a fetcher
//! - [`Cutoff`] / [`recent_events`] - the time window applied on top

pub mod client;
pub mod links;
pub mod model;
pub mod source;
pub mod window;

pub use client::{MockPageFetcher, Page, PageFetcher, SentryClient};
pub use model::{Event, Tag, User};
pub use source::{EventSource, EventStream, SourceStats};
pub use window::{recent_events, Cutoff};
