//! Application service: rolling restart orchestration.
//!
//! Imports only from `crate::domain` and `crate::application`.
//! All I/O is routed through injected port traits.
//!
//! The run moves through `RestartPhase`s: preconditions are checked against
//! one status probe, the instance range is partitioned once, and then each
//! batch is restarted and awaited in two bounded waits. Any failure is
//! terminal and leaves the phase at `AbortedFatal`.

use std::cell::Cell;

use tracing::{debug, info, warn};

use crate::application::ports::{Platform, ProgressReporter};
use crate::application::services::poll::{POLL_INTERVAL, PollBudget, PollOutcome, poll_until};
use crate::application::services::status_probe;
use crate::domain::{
    ApplicationStatus, PreconditionError, RestartBatch, RestartConfig, RestartError, WaitPhase,
    parse_instance_listing, partition,
};

/// Current phase of a rolling restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartPhase {
    /// Probing the application before anything is touched.
    ValidatingPreconditions,
    /// Splitting the instance range into batches.
    Batching,
    /// Issuing restart commands for batch `current` of `total`.
    RestartingBatch { current: usize, total: usize },
    /// Waiting for the platform to begin tearing an instance down.
    AwaitingInitiate { current: usize, total: usize },
    /// Waiting for the batch to report running again.
    AwaitingFinish { current: usize, total: usize },
    /// Every batch cycled.
    Done,
    /// Aborted; nothing further is attempted.
    AbortedFatal { reason: String },
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartSummary {
    pub app: String,
    pub instances: u32,
    pub batches: usize,
}

/// Reject runs that would start from an unstable application or an
/// oversized batch.
///
/// # Errors
///
/// Returns `PreconditionError::Unstable` unless the application is started
/// with every desired instance running, and `PreconditionError::BatchTooLarge`
/// if the batch size exceeds the desired instance count.
pub fn check_preconditions(
    status: &ApplicationStatus,
    config: &RestartConfig,
) -> Result<(), PreconditionError> {
    if !status.is_stable() {
        return Err(PreconditionError::Unstable {
            state: status.state.clone(),
            desired: status.desired_instances,
            running: status.running_instances,
        });
    }
    if config.batch_size > status.desired_instances {
        return Err(PreconditionError::BatchTooLarge {
            batch_size: config.batch_size,
            desired: status.desired_instances,
        });
    }
    Ok(())
}

/// Drives one application through a rolling restart.
pub struct RollingRestart<'a, P, R> {
    platform: &'a P,
    reporter: &'a R,
    app: &'a str,
    config: RestartConfig,
    phase: RestartPhase,
}

impl<'a, P: Platform, R: ProgressReporter> RollingRestart<'a, P, R> {
    #[must_use]
    pub fn new(platform: &'a P, reporter: &'a R, app: &'a str, config: RestartConfig) -> Self {
        Self {
            platform,
            reporter,
            app,
            config,
            phase: RestartPhase::ValidatingPreconditions,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &RestartPhase {
        &self.phase
    }

    /// Run the restart to completion.
    ///
    /// # Errors
    ///
    /// Returns a `RestartError` on a failed precondition, a platform failure,
    /// or an exhausted wait. Batches restarted before the failure stay
    /// restarted.
    pub async fn run(&mut self) -> Result<RestartSummary, RestartError> {
        let result = self.drive().await;
        if let Err(e) = &result {
            warn!(app = self.app, phase = ?self.phase, error = %e, "rolling restart aborted");
            self.phase = RestartPhase::AbortedFatal {
                reason: e.to_string(),
            };
        }
        result
    }

    async fn drive(&mut self) -> Result<RestartSummary, RestartError> {
        self.enter(RestartPhase::ValidatingPreconditions);
        self.reporter.step("Rolling restart started...");
        let status = status_probe::fetch(self.platform, self.app).await?;
        self.reporter.step(&status.to_string());
        check_preconditions(&status, &self.config)?;

        self.enter(RestartPhase::Batching);
        let batches = partition(status.desired_instances, self.config.batch_size);
        let total = batches.len();
        self.reporter.step(&format!(
            "Restarting {} instance(s) in {total} batch(es)",
            status.desired_instances
        ));

        for batch in &batches {
            let current = batch.number;
            self.enter(RestartPhase::RestartingBatch { current, total });
            self.reporter
                .step(&format!("Restarting instances {batch} ({current}/{total})"));
            self.restart_batch(batch).await?;

            self.enter(RestartPhase::AwaitingInitiate { current, total });
            self.await_initiate(batch).await?;

            self.enter(RestartPhase::AwaitingFinish { current, total });
            self.await_finish(batch).await?;
            self.reporter
                .success(&format!("Instances {batch} are running again"));
        }

        self.enter(RestartPhase::Done);
        info!(app = self.app, batches = total, "rolling restart completed");
        Ok(RestartSummary {
            app: self.app.to_string(),
            instances: status.desired_instances,
            batches: total,
        })
    }

    fn enter(&mut self, phase: RestartPhase) {
        debug!(app = self.app, ?phase, "entering phase");
        self.phase = phase;
    }

    /// Issue one restart per instance; the platform restarts them on its own
    /// schedule.
    async fn restart_batch(&self, batch: &RestartBatch) -> Result<(), RestartError> {
        for index in batch.indices() {
            let index = index.to_string();
            self.platform
                .issue_command(&["restart-app-instance", self.app, &index])
                .await
                .map_err(|e| RestartError::platform(self.app, &e))?;
            debug!(app = self.app, instance = %index, "restart issued");
        }
        Ok(())
    }

    async fn await_initiate(&self, batch: &RestartBatch) -> Result<(), RestartError> {
        let (platform, app) = (self.platform, self.app);
        let budget = PollBudget::new(self.config.initiate_attempts(), POLL_INTERVAL);
        let outcome = poll_until(budget, move |_| async move {
            let status = status_probe::fetch(platform, app).await?;
            Ok::<_, RestartError>(status.restart_initiated().then_some(status))
        })
        .await?;
        self.settle(outcome, WaitPhase::Initiate, batch)
    }

    async fn await_finish(&self, batch: &RestartBatch) -> Result<(), RestartError> {
        let (platform, reporter, app) = (self.platform, self.reporter, self.app);
        let indices = batch.indices();
        let indices = indices.as_slice();
        let batch_len = batch.len();
        let warned = Cell::new(false);
        let warned = &warned;
        let budget = PollBudget::new(self.config.finish_attempts(), POLL_INTERVAL);
        let outcome = poll_until(budget, move |_| async move {
            let lines = platform
                .issue_command(&["app", app])
                .await
                .map_err(|e| RestartError::platform(app, &e))?;
            let listing = parse_instance_listing(&lines, indices);
            reporter.detail(&listing.text());
            let status = status_probe::fetch(platform, app).await?;
            if status.is_stable() && listing.lines.len() < batch_len && !warned.replace(true) {
                reporter.warn(&format!(
                    "Listing shows {} of {batch_len} instance row(s) for this batch; \
                     its format may have changed",
                    listing.lines.len()
                ));
            }
            Ok::<_, RestartError>(status.batch_recovered(&listing, batch_len).then_some(status))
        })
        .await?;
        self.settle(outcome, WaitPhase::Finish, batch)
    }

    fn settle(
        &self,
        outcome: PollOutcome<ApplicationStatus>,
        phase: WaitPhase,
        batch: &RestartBatch,
    ) -> Result<(), RestartError> {
        match outcome {
            PollOutcome::Satisfied { value, attempts } => {
                debug!(
                    app = self.app,
                    batch = batch.number,
                    %phase,
                    attempts,
                    running = value.running_instances,
                    desired = value.desired_instances,
                    "wait satisfied"
                );
                Ok(())
            }
            PollOutcome::Exhausted { attempts } => Err(RestartError::TimeoutExhausted {
                phase,
                batch: batch.number,
                attempts,
            }),
        }
    }
}
