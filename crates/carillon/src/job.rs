//! Job registration and the per-job execution loop.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::error::CronError;
use crate::schedule::Schedule;
use crate::service::{CronService, ScheduleHandle};

/// Optional settings supplied at registration.
#[derive(Debug, Clone, Default)]
pub struct CronOptions {
    /// Retry delays in milliseconds, handed to the service at registration.
    /// After a failed run the service applies the next entry of the
    /// sequence before the following trigger. Immutable once registered.
    pub backoff_schedule: Option<Vec<u32>>,
    /// Cancellation signal. The first cancellation closes the schedule
    /// handle immediately, unblocking a pending trigger wait with
    /// termination. A handler invocation already in flight runs to
    /// completion.
    pub cancellation: Option<CancellationToken>,
}

/// Registers cron jobs against a scheduler service and runs one execution
/// loop per job.
pub struct Cron {
    service: Arc<dyn CronService>,
}

impl Cron {
    pub fn new(service: Arc<dyn CronService>) -> Self {
        Self { service }
    }

    /// Register a job with default options.
    ///
    /// See [`Cron::schedule_with_options`].
    pub async fn schedule<F, Fut>(
        &self,
        name: &str,
        schedule: impl Into<Schedule>,
        handler: F,
    ) -> Result<CronJob, CronError>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        self.schedule_with_options(name, schedule, CronOptions::default(), handler)
            .await
    }

    /// Register a job and start its execution loop.
    ///
    /// The schedule is normalized and registered with the service before
    /// this returns; normalization and registration failures surface here
    /// and nothing is spawned. The returned [`CronJob`] represents the
    /// job's full lifetime but does not need to be awaited for the
    /// registration to take effect.
    ///
    /// The loop serializes work per job: the next trigger is never awaited
    /// until the previous handler invocation has completed and its outcome
    /// has been recorded, so executions of one job cannot overlap. Handler
    /// errors are logged under the job name, reported to the service as a
    /// failed outcome, and never stop the loop.
    #[tracing::instrument(skip(self, schedule, options, handler))]
    pub async fn schedule_with_options<F, Fut>(
        &self,
        name: &str,
        schedule: impl Into<Schedule>,
        options: CronOptions,
        mut handler: F,
    ) -> Result<CronJob, CronError>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        if name.trim().is_empty() {
            return Err(CronError::Argument(
                "cron job requires a unique name".to_string(),
            ));
        }

        let expression = schedule.into().normalize()?;
        let handle = self
            .service
            .create(name, &expression, options.backoff_schedule)
            .await?;
        debug!(job = %name, %expression, ?handle, "cron schedule registered");

        let cancellation = options.cancellation.unwrap_or_default();

        // One-shot observer: the first cancellation closes the handle right
        // away instead of waiting for the loop to come back around.
        let observer = {
            let service = Arc::clone(&self.service);
            let cancellation = cancellation.clone();
            tokio::spawn(async move {
                cancellation.cancelled().await;
                service.close(handle).await;
            })
        };

        let join = {
            let service = Arc::clone(&self.service);
            let name = name.to_string();
            tokio::spawn(async move {
                let mut success = true;
                loop {
                    if !service.next_trigger(handle, success).await {
                        break;
                    }
                    match handler().await {
                        Ok(()) => success = true,
                        Err(error) => {
                            // A failed run feeds the service's backoff
                            // decision on the next wait; it never stops the
                            // loop.
                            error!(job = %name, %error, "cron handler failed");
                            success = false;
                        }
                    }
                }
                // Termination path. May race with the cancellation observer;
                // the service's close is idempotent.
                service.close(handle).await;
                observer.abort();
                debug!(job = %name, "cron job terminated");
            })
        };

        Ok(CronJob {
            name: name.to_string(),
            handle,
            cancellation,
            join,
        })
    }
}

/// Handle to one running cron job.
///
/// Dropping the handle does not stop the job. Cancel it (or let the
/// service terminate the schedule) and [`join`](CronJob::join) to wait for
/// the loop to wind down.
#[derive(Debug)]
pub struct CronJob {
    name: String,
    handle: ScheduleHandle,
    cancellation: CancellationToken,
    join: JoinHandle<()>,
}

impl CronJob {
    /// The job's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The service-side schedule handle.
    pub fn handle(&self) -> ScheduleHandle {
        self.handle
    }

    /// The cancellation token observed by this job.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Request cancellation. The schedule handle is closed immediately; a
    /// handler invocation already in flight runs to completion first.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Whether the execution loop has terminated.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the execution loop to terminate.
    pub async fn join(self) {
        let _ = self.join.await;
    }
}
