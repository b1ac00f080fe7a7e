//! Cron job scheduling client.
//!
//! This crate registers recurring jobs with an external scheduler service
//! and drives their execution:
//! - Schedules are given as literal five-field cron expressions or as
//!   structured [`CronSchedule`] values, which are normalized into the
//!   expression form the service expects.
//! - Each registered job runs its own execution loop: wait for the next
//!   trigger, invoke the handler, report the outcome back to the service
//!   (which applies the registered backoff delays after failed runs), repeat.
//! - A job stops when the service terminates the schedule or the caller
//!   cancels it. Handler failures are logged and never stop the loop.

mod error;
mod job;
mod schedule;
mod service;

pub use error::CronError;
pub use job::{Cron, CronJob, CronOptions};
pub use schedule::{CronField, CronSchedule, ExactSet, Schedule, render_field};
pub use service::{CronService, ScheduleHandle};
pub use tokio_util::sync::CancellationToken;
