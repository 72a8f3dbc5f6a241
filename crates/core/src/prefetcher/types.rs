//! Types for the prefetcher module.

use std::path::PathBuf;
use tokio::task::JoinHandle;

use super::exit_signal::ExitSignal;
use crate::launcher::{HelperExit, LaunchError};

/// Terminal state of one prefetch invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefetchOutcome {
    /// Prefetching is switched off in configuration.
    Disabled,
    /// The host cannot spawn processes; nothing was attempted.
    Unsupported,
    /// The helper is not installed here. Expected in sandboxes.
    IgnoredMissingBinary,
    /// The helper ran and terminated. Its exit code is informational only.
    Completed(HelperExit),
    /// Unexpected launch or runtime failure; the exit signal was set.
    Failed(LaunchError),
}

impl PrefetchOutcome {
    /// Whether this outcome counts against the host's exit status.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Unsupported => "unsupported",
            Self::IgnoredMissingBinary => "missing_binary",
            Self::Completed(_) => "completed",
            Self::Failed(_) => "failed",
        }
    }
}

/// Handle to a prefetch invocation.
///
/// Dropping it (or calling [`detach`](Self::detach)) leaves the background
/// work running. Hosts that compose their exit status from the outcome can
/// await [`outcome`](Self::outcome) at shutdown.
#[derive(Debug)]
pub struct PrefetchHandle {
    state: HandleState,
}

#[derive(Debug)]
enum HandleState {
    Ready(PrefetchOutcome),
    Running {
        task: JoinHandle<PrefetchOutcome>,
        program: PathBuf,
        exit_signal: ExitSignal,
    },
}

impl PrefetchHandle {
    pub(crate) fn ready(outcome: PrefetchOutcome) -> Self {
        Self {
            state: HandleState::Ready(outcome),
        }
    }

    pub(crate) fn running(
        task: JoinHandle<PrefetchOutcome>,
        program: PathBuf,
        exit_signal: ExitSignal,
    ) -> Self {
        Self {
            state: HandleState::Running {
                task,
                program,
                exit_signal,
            },
        }
    }

    /// Whether the outcome is already available.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            HandleState::Ready(_) => true,
            HandleState::Running { task, .. } => task.is_finished(),
        }
    }

    /// Lets the prefetch run unobserved.
    pub fn detach(self) {}

    /// Waits for the background work and returns its outcome.
    ///
    /// A background task that panicked or was aborted is reported as a failure and
    /// recorded on the exit signal.
    pub async fn outcome(self) -> PrefetchOutcome {
        match self.state {
            HandleState::Ready(outcome) => outcome,
            HandleState::Running {
                task,
                program,
                exit_signal,
            } => match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Prefetch task did not complete: {}", e);
                    exit_signal.record_failure();
                    PrefetchOutcome::Failed(LaunchError::other(
                        &program,
                        format!("prefetch task did not complete: {}", e),
                    ))
                }
            },
        }
    }
}
