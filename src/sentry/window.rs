//! Restricting the newest-first event stream to a recent window

use chrono::{Days, Local, NaiveDate};
use futures::future;
use futures::{StreamExt, TryStreamExt};
use std::fmt;
use tracing::debug;

use super::model::Event;
use super::source::EventStream;

/// Lower bound of the reporting window as an ISO date (`YYYY-MM-DD`)
///
/// Events are kept while their `dateCreated` sorts strictly after this
/// string, so every event created on the cutoff day itself is still inside
/// the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cutoff {
    iso: String,
}

impl Cutoff {
    /// The date `days` before `today`
    pub fn days_before(today: NaiveDate, days: u32) -> Self {
        let date = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            iso: date.format("%Y-%m-%d").to_string(),
        }
    }

    /// The date `days` before the local calendar date, taken once
    pub fn days_ago(days: u32) -> Self {
        Self::days_before(Local::now().date_naive(), days)
    }

    /// Uses an arbitrary timestamp string as the bound
    pub fn at(iso: impl Into<String>) -> Self {
        Self { iso: iso.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.iso
    }

    pub fn admits(&self, event: &Event) -> bool {
        event.date_created.as_str() > self.iso.as_str()
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso)
    }
}

/// Yields events while they are newer than `cutoff`
///
/// The input must be ordered newest first. The first event at or before the
/// cutoff ends the stream and nothing further is pulled from upstream.
pub fn recent_events<'a>(events: EventStream<'a>, cutoff: Cutoff) -> EventStream<'a> {
    events
        .try_take_while(move |event| {
            let admitted = cutoff.admits(event);
            if !admitted {
                debug!(
                    "Event {} at {} is outside the window ending {}",
                    event.display_id(),
                    event.date_created,
                    cutoff
                );
            }
            future::ready(Ok(admitted))
        })
        .boxed()
}
