//! Interface to the external scheduler service.

use async_trait::async_trait;

use crate::error::CronError;

/// Opaque identifier for one registered schedule, minted by the service.
///
/// The execution loop owns the handle for the job's lifetime and closes it
/// when the service signals termination or the caller cancels. The two
/// paths may race, so [`CronService::close`] must tolerate a second close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleHandle(pub u32);

/// The external scheduler service that stores registered schedules and
/// decides when triggers fire.
///
/// The service owns all time-keeping: cron expression parsing, trigger
/// timing, and the application of registered backoff delays after failed
/// runs. The client side only registers schedules and reports per-run
/// outcomes.
#[async_trait]
pub trait CronService: Send + Sync {
    /// Register a schedule under a unique name, transferring ownership of
    /// the backoff delay sequence (milliseconds) to the service.
    ///
    /// Fails with [`CronError::Registration`] if the name is already
    /// registered or the service rejects the cron expression.
    async fn create(
        &self,
        name: &str,
        expression: &str,
        backoff_schedule: Option<Vec<u32>>,
    ) -> Result<ScheduleHandle, CronError>;

    /// Wait for the schedule's next trigger.
    ///
    /// `previous_success` reports the outcome of the preceding run and
    /// feeds the service's backoff decision; the first call for a schedule
    /// passes `true`. Resolves `true` when a trigger fires and `false`
    /// when the schedule has terminated. Closing the handle resolves any
    /// pending or future call as `false`; implementations must map
    /// transport failures to termination rather than leak them.
    async fn next_trigger(&self, handle: ScheduleHandle, previous_success: bool) -> bool;

    /// Release all service-side resources for the schedule. Idempotent;
    /// unblocks a pending [`CronService::next_trigger`] with termination.
    async fn close(&self, handle: ScheduleHandle);
}
