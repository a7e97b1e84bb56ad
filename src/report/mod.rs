//! Report accumulators
//!
//! A report folds every event of the run into its own state and renders
//! that state as the text of one artifact. [`ReportGenerator`] is the
//! generic fold; [`users`] and [`vehicles`] build the concrete reports.
//!
//! # Example
//!
//! ```rust
//! use usage_badges::report::{Report, ReportGenerator};
//!
//! let counter = ReportGenerator::new(
//!     "event_count.json",
//!     0usize,
//!     |count: &mut usize, _event| Ok(Some(*count + 1)),
//!     |count: &usize| Ok(count.to_string()),
//! );
//! assert_eq!(counter.output().unwrap(), "0");
//! ```

pub mod users;
pub mod vehicles;

use crate::error::{Error, Result};
use crate::sentry::Event;

pub use users::{users_report, Badge, USERS_REPORT};
pub use vehicles::{vehicles_report, VEHICLES_REPORT};

/// A named fold over the run's events
pub trait Report: Send {
    /// Artifact file name
    fn name(&self) -> &str;

    /// Folds one event into the report state
    fn reduce(&mut self, event: &Event) -> Result<()>;

    /// Renders the current state; does not change it
    fn output(&self) -> Result<String>;
}

/// Reducer step. Returns a replacement state, or `None` after mutating in place.
pub type Reducer<S> = Box<dyn Fn(&mut S, &Event) -> Result<Option<S>> + Send>;

/// Renders the final state as artifact text
pub type Formatter<S> = Box<dyn Fn(&S) -> Result<String> + Send>;

/// Generic accumulator holding a state plus its reduce and format steps
pub struct ReportGenerator<S> {
    name: String,
    state: S,
    reducer: Reducer<S>,
    formatter: Formatter<S>,
}

impl<S> ReportGenerator<S> {
    pub fn new(
        name: impl Into<String>,
        initial: S,
        reducer: impl Fn(&mut S, &Event) -> Result<Option<S>> + Send + 'static,
        formatter: impl Fn(&S) -> Result<String> + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            state: initial,
            reducer: Box::new(reducer),
            formatter: Box::new(formatter),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<S: Send> Report for ReportGenerator<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn reduce(&mut self, event: &Event) -> Result<()> {
        if let Some(replaced) = (self.reducer)(&mut self.state, event)? {
            self.state = replaced;
        }
        Ok(())
    }

    fn output(&self) -> Result<String> {
        (self.formatter)(&self.state)
    }
}

/// Every known report, in the order they are reduced and written
pub fn default_reports() -> Vec<Box<dyn Report>> {
    vec![Box::new(users_report()), Box::new(vehicles_report())]
}

/// Known reports restricted to `names`, keeping registration order
///
/// An empty selection means every report.
pub fn select_reports(names: &[String]) -> Result<Vec<Box<dyn Report>>> {
    let reports = default_reports();
    if names.is_empty() {
        return Ok(reports);
    }

    if let Some(unknown) = names
        .iter()
        .find(|name| !reports.iter().any(|r| r.name() == name.as_str()))
    {
        return Err(Error::UnknownReport(unknown.clone()));
    }

    Ok(reports
        .into_iter()
        .filter(|r| names.iter().any(|name| name == r.name()))
        .collect())
}
