//! Record error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Record-level consistency errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A recurring window ends before it starts.
    #[error("End date {end} precedes start date {start}")]
    EndBeforeStart {
        /// Start of the window.
        start: NaiveDate,
        /// End of the window.
        end: NaiveDate,
    },
}
