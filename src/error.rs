//! Error type for the activity graph renderer.

/// Errors raised at the boundary of the renderer.
///
/// Layout and scene construction are infallible for a valid
/// [`CalendarDate`](crate::types::CalendarDate); everything here happens
/// before or after them.
#[derive(Debug, thiserror::Error)]
pub enum KusaError {
    /// Returned when a start date is malformed or out of range.
    #[error("invalid date '{input}': {reason}")]
    InvalidDateInput {
        /// The rejected input as given.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Returned when the rendered markup cannot be written.
    #[error("cannot write output: {0}")]
    Io(#[from] std::io::Error),
}
