//! Error types for schedule normalization and job registration.

use thiserror::Error;

/// Errors that can occur when registering a cron job.
///
/// All of these are configuration-time failures: registration either fails
/// before any service-side resource exists, or succeeds and never raises
/// again. Handler failures during triggers are contained inside the
/// execution loop and surface only through logging and the per-run outcome
/// reported to the service.
#[derive(Debug, Error)]
pub enum CronError {
    /// A required registration argument was missing or unusable.
    #[error("invalid cron job argument: {0}")]
    Argument(String),

    /// A structured schedule could not be rendered to a cron expression.
    #[error("invalid cron schedule: {0}")]
    InvalidSchedule(String),

    /// The scheduler service refused the registration.
    #[error("schedule registration failed: {0}")]
    Registration(String),
}
