//! Streaming the candidate list to the helper and classifying how it ended.

use tracing::{debug, error, info};

use super::exit_signal::ExitSignal;
use super::types::PrefetchOutcome;
use crate::launcher::{HelperExit, HelperInvocation, HelperLauncher, HelperProcess, LaunchError};
use crate::metrics;
use crate::trace::{trace, TraceSink};

/// Launches the helper, feeds it `payload` (if any) and waits for it.
pub(crate) async fn run_helper(
    launcher: &dyn HelperLauncher,
    invocation: &HelperInvocation,
    payload: Option<Vec<u8>>,
) -> Result<HelperExit, LaunchError> {
    let mut process = launcher.launch(invocation)?;

    if let Some(payload) = payload {
        transfer_input(process.as_mut(), &payload).await;
    }

    process.wait().await
}

/// Writes the whole payload, then closes stdin.
///
/// Input errors are swallowed: the stream is often already defunct because
/// the helper exited or never read it.
async fn transfer_input(process: &mut dyn HelperProcess, payload: &[u8]) {
    match process.write_input(payload).await {
        Ok(()) => {
            metrics::BYTES_WRITTEN.inc_by(payload.len() as u64);
        }
        Err(e) => {
            debug!("Ignoring helper input error: {}", e);
        }
    }

    if let Err(e) = process.end_input().await {
        debug!("Ignoring error closing helper input: {}", e);
    }
}

/// Maps the helper's result to an outcome, narrating through `sink` and
/// recording unexpected failures on `exit_signal`.
pub(crate) fn classify(
    result: Result<HelperExit, LaunchError>,
    sink: Option<&TraceSink>,
    exit_signal: &ExitSignal,
) -> PrefetchOutcome {
    let err = match result {
        Ok(exit) => {
            debug!(code = ?exit.code, success = exit.success, "Prefetch helper exited");
            return PrefetchOutcome::Completed(exit);
        }
        Err(err) => err,
    };

    match err {
        LaunchError::BinaryNotFound { program } => {
            trace(
                sink,
                format!(
                    "Prefetch helper {} not found, skipping prefetch \
                     (likely a sandboxed environment without the helper)",
                    program.display()
                ),
            );
            info!("Prefetch helper {} not found", program.display());
            PrefetchOutcome::IgnoredMissingBinary
        }
        err @ (LaunchError::PermissionDenied { .. } | LaunchError::Other { .. }) => {
            trace(sink, format!("Prefetch failed: {}", err));
            error!("Prefetch failed: {}", err);
            exit_signal.record_failure();
            PrefetchOutcome::Failed(err)
        }
    }
}
