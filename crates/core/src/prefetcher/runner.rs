//! Prefetcher implementation.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use super::exit_signal::ExitSignal;
use super::transfer;
use super::types::{PrefetchHandle, PrefetchOutcome};
use crate::candidates::{build_candidate_set, CandidateSet};
use crate::config::{InputMode, PrefetchConfig};
use crate::launcher::{CommandLauncher, HelperInvocation, HelperLauncher};
use crate::metrics;
use crate::platform::PlatformCapability;
use crate::trace::{trace, TraceSink};

/// Fire-and-forget prefetch trigger.
pub struct Prefetcher {
    config: PrefetchConfig,
    platform: PlatformCapability,
    launcher: Arc<dyn HelperLauncher>,
    trace: Option<TraceSink>,
    exit_signal: ExitSignal,
}

impl Prefetcher {
    /// Create a new prefetcher.
    pub fn new(
        config: PrefetchConfig,
        platform: PlatformCapability,
        launcher: Arc<dyn HelperLauncher>,
    ) -> Self {
        Self {
            config,
            platform,
            launcher,
            trace: None,
            exit_signal: ExitSignal::new(),
        }
    }

    /// Default configuration, detected platform and real child processes.
    pub fn with_defaults() -> Self {
        Self::new(
            PrefetchConfig::default(),
            PlatformCapability::detect(),
            Arc::new(CommandLauncher::new()),
        )
    }

    /// Sets the diagnostic trace sink.
    pub fn with_trace(mut self, trace: TraceSink) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Shares an exit signal with the host.
    pub fn with_exit_signal(mut self, exit_signal: ExitSignal) -> Self {
        self.exit_signal = exit_signal;
        self
    }

    pub fn config(&self) -> &PrefetchConfig {
        &self.config
    }

    pub fn exit_signal(&self) -> &ExitSignal {
        &self.exit_signal
    }

    /// Expands `file_names` with the configured sidecar rules.
    pub fn candidates<S: AsRef<str>>(&self, file_names: &[S]) -> CandidateSet {
        build_candidate_set(file_names, self.config.sidecar.active_rules())
    }

    /// The helper command line for `candidates`.
    pub fn invocation(&self, candidates: &CandidateSet) -> HelperInvocation {
        let helper = &self.config.helper;
        let invocation = HelperInvocation::new(helper.program.clone())
            .with_args(helper.args.iter().cloned())
            .with_output(helper.output);

        match helper.input {
            InputMode::Stdin => invocation.with_stdin(true),
            InputMode::Arguments => invocation
                .with_args(candidates.files().iter().cloned())
                .with_stdin(false),
        }
    }

    /// Triggers a prefetch of `file_names` and returns immediately.
    ///
    /// Launching, writing and waiting happen on a background task of the
    /// current tokio runtime. Without a runtime, or on a platform that
    /// cannot spawn processes, this is a silent no-op.
    pub fn prefetch<S: AsRef<str>>(&self, file_names: &[S]) -> PrefetchHandle {
        if !self.config.enabled {
            debug!("Prefetch disabled by configuration");
            return Self::finished(PrefetchOutcome::Disabled);
        }

        if !self.platform.can_spawn() {
            debug!("Platform cannot spawn processes, skipping prefetch");
            return Self::finished(PrefetchOutcome::Unsupported);
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                debug!("No async runtime available, skipping prefetch");
                return Self::finished(PrefetchOutcome::Unsupported);
            }
        };

        let candidates = self.candidates(file_names);
        let count = candidates.len();
        metrics::CANDIDATES.observe(count as f64);

        let invocation = self.invocation(&candidates);
        let payload = match self.config.helper.input {
            InputMode::Stdin => Some(candidates.encode()),
            InputMode::Arguments => None,
        };

        let program = invocation.program.clone();
        let launcher = Arc::clone(&self.launcher);
        let sink = self.trace.clone();
        let exit_signal = self.exit_signal.clone();
        let span = info_span!("prefetch", invocation = %Uuid::new_v4(), files = count);

        let task = runtime.spawn(
            async move {
                trace(
                    sink.as_ref(),
                    format!(
                        "Prefetching {} files via {}",
                        count,
                        invocation.program.display()
                    ),
                );

                let result =
                    transfer::run_helper(launcher.as_ref(), &invocation, payload).await;
                let outcome = transfer::classify(result, sink.as_ref(), &exit_signal);
                metrics::record_outcome(&outcome);
                outcome
            }
            .instrument(span),
        );

        PrefetchHandle::running(task, program, self.exit_signal.clone())
    }

    fn finished(outcome: PrefetchOutcome) -> PrefetchHandle {
        metrics::record_outcome(&outcome);
        PrefetchHandle::ready(outcome)
    }
}

/// One-shot prefetch with default configuration.
///
/// `trace` receives diagnostic narration; unexpected failures are recorded
/// on `exit_signal`.
pub fn prefetch<S: AsRef<str>>(
    trace: Option<TraceSink>,
    file_names: &[S],
    exit_signal: &ExitSignal,
) -> PrefetchHandle {
    let mut prefetcher = Prefetcher::with_defaults().with_exit_signal(exit_signal.clone());
    if let Some(trace) = trace {
        prefetcher = prefetcher.with_trace(trace);
    }
    prefetcher.prefetch(file_names)
}
