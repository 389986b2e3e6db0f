//! # Container Errors
//!
//! The only conditions the container reports through return values. Resolution
//! problems (missing beans, type mismatches, frozen fields) are diagnostics and
//! go through `tracing` instead; they never show up here.

/// Errors returned by [`Container`](crate::Container) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
    /// Blank bean name or missing instance passed to `register_named`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A bean was already registered under this explicit name.
    ///
    /// Also recorded in the fatal error log, which blocks every later `start_up`.
    #[error("Duplicate bean name: {0}")]
    DuplicateName(String),

    /// `start_up` refused to run because fatal registration conflicts were recorded.
    #[error("Container has {} fatal registration error(s), start-up aborted", .errors.len())]
    StartUpBlocked { errors: Vec<ContainerError> },
}
