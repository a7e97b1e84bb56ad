//! Pull-driven pagination over the issue events collection

use crate::error::Result;
use futures::stream::{self, BoxStream};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::client::PageFetcher;
use super::model::Event;

/// Stream of events in the API's order (newest first)
pub type EventStream<'a> = BoxStream<'a, Result<Event>>;

/// Counters describing how far pagination went
///
/// Shared with the caller so they stay readable after the source has been
/// turned into a stream and consumed.
#[derive(Debug, Default)]
pub struct SourceStats {
    pages: AtomicUsize,
    events: AtomicUsize,
    truncated: AtomicBool,
}

impl SourceStats {
    pub fn pages(&self) -> usize {
        self.pages.load(Ordering::Relaxed)
    }

    /// Events handed out by the source, including the one that hit the cutoff
    pub fn events(&self) -> usize {
        self.events.load(Ordering::Relaxed)
    }

    /// Whether pagination stopped on a page that was not an event list
    pub fn truncated(&self) -> bool {
        self.truncated.load(Ordering::Relaxed)
    }
}

/// Lazily paginates a collection, fetching the next page only when the
/// buffered one has been consumed
pub struct EventSource<F> {
    fetcher: F,
    next_url: Option<String>,
    buffer: VecDeque<Event>,
    stats: Arc<SourceStats>,
}

impl<F: PageFetcher> EventSource<F> {
    pub fn new(fetcher: F, first_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            next_url: Some(first_url.into()),
            buffer: VecDeque::new(),
            stats: Arc::new(SourceStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<SourceStats> {
        Arc::clone(&self.stats)
    }

    /// Next event, fetching pages as needed. `Ok(None)` once exhausted.
    pub async fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            if let Some(event) = self.buffer.pop_front() {
                self.stats.events.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(event));
            }

            let Some(url) = self.next_url.take() else {
                return Ok(None);
            };

            info!("{}", url.rsplit('/').next().unwrap_or_default());
            let page = self.fetcher.fetch_page(&url).await?;
            self.stats.pages.fetch_add(1, Ordering::Relaxed);

            if !page.body.is_array() {
                error!("Unexpected response from Sentry: {}", page.body);
                self.stats.truncated.store(true, Ordering::Relaxed);
                return Ok(None);
            }

            let events: Vec<Event> = serde_json::from_value(page.body)?;
            debug!("Fetched {} events", events.len());
            self.buffer.extend(events);
            self.next_url = page.next;
        }
    }
}

impl<F: PageFetcher + 'static> EventSource<F> {
    /// Converts the source into a stream that pulls pages on demand
    pub fn into_stream(self) -> EventStream<'static> {
        Box::pin(stream::try_unfold(self, |mut source| async move {
            Ok(source.next_event().await?.map(|event| (event, source)))
        }))
    }
}
