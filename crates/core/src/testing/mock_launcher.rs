//! Mock launcher for testing.

use async_trait::async_trait;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::launcher::{HelperExit, HelperInvocation, HelperLauncher, HelperProcess, LaunchError};

/// A recorded helper launch for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedLaunch {
    /// The invocation that was requested.
    pub invocation: HelperInvocation,
    /// Whether the launch itself succeeded.
    pub launched: bool,
    /// Every byte successfully written to stdin.
    pub input: Vec<u8>,
    /// Number of `write_input` calls, successful or not.
    pub write_calls: usize,
    /// Whether end-of-input was signalled.
    pub input_closed: bool,
    /// Whether end-of-input was signalled only after a write completed.
    pub closed_after_write: bool,
    /// Whether the process was waited on.
    pub waited: bool,
}

#[derive(Debug)]
struct MockState {
    launches: Vec<RecordedLaunch>,
    next_error: Option<LaunchError>,
    wait_error: Option<LaunchError>,
    input_error: Option<io::ErrorKind>,
    exit: HelperExit,
    wait_duration: Duration,
}

/// Mock implementation of the HelperLauncher trait.
///
/// Provides controllable behavior for testing:
/// - Track launches, stdin bytes and end-of-input for assertions
/// - Simulate launch failures (missing binary, permission denied, ...)
/// - Simulate a defunct input stream
/// - Simulate a slow or failing helper
#[derive(Debug, Clone)]
pub struct MockLauncher {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLauncher {
    /// Create a new mock launcher whose helpers exit successfully.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                launches: Vec::new(),
                next_error: None,
                wait_error: None,
                input_error: None,
                exit: HelperExit::success(),
                wait_duration: Duration::ZERO,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get all recorded launches.
    pub fn recorded_launches(&self) -> Vec<RecordedLaunch> {
        self.lock().launches.clone()
    }

    /// Get the number of launch attempts.
    pub fn launch_count(&self) -> usize {
        self.lock().launches.len()
    }

    /// Configure the next launch to fail with the given error.
    pub fn set_next_error(&self, error: LaunchError) {
        self.lock().next_error = Some(error);
    }

    /// Configure waiting on helpers to fail with the given error.
    pub fn set_wait_error(&self, error: LaunchError) {
        self.lock().wait_error = Some(error);
    }

    /// Make every stdin operation fail with the given kind.
    pub fn set_input_error(&self, kind: io::ErrorKind) {
        self.lock().input_error = Some(kind);
    }

    /// Set how launched helpers exit.
    pub fn set_exit(&self, exit: HelperExit) {
        self.lock().exit = exit;
    }

    /// Set how long helpers take to terminate.
    pub fn set_wait_duration(&self, duration: Duration) {
        self.lock().wait_duration = duration;
    }
}

impl HelperLauncher for MockLauncher {
    fn name(&self) -> &str {
        "mock"
    }

    fn launch(
        &self,
        invocation: &HelperInvocation,
    ) -> Result<Box<dyn HelperProcess>, LaunchError> {
        let mut state = self.lock();

        let error = state.next_error.take();
        state.launches.push(RecordedLaunch {
            invocation: invocation.clone(),
            launched: error.is_none(),
            input: Vec::new(),
            write_calls: 0,
            input_closed: false,
            closed_after_write: false,
            waited: false,
        });

        if let Some(err) = error {
            return Err(err);
        }

        Ok(Box::new(MockHelperProcess {
            index: state.launches.len() - 1,
            launcher: self.clone(),
        }))
    }
}

/// Process handle produced by [`MockLauncher`].
#[derive(Debug)]
pub struct MockHelperProcess {
    index: usize,
    launcher: MockLauncher,
}

#[async_trait]
impl HelperProcess for MockHelperProcess {
    fn id(&self) -> Option<u32> {
        Some(10_000 + self.index as u32)
    }

    async fn write_input(&mut self, payload: &[u8]) -> io::Result<()> {
        let mut state = self.launcher.lock();
        let input_error = state.input_error;
        let record = &mut state.launches[self.index];
        record.write_calls += 1;

        if let Some(kind) = input_error {
            return Err(io::Error::from(kind));
        }
        if record.input_closed {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "helper stdin is closed",
            ));
        }

        record.input.extend_from_slice(payload);
        Ok(())
    }

    async fn end_input(&mut self) -> io::Result<()> {
        let mut state = self.launcher.lock();
        let input_error = state.input_error;
        let record = &mut state.launches[self.index];

        record.closed_after_write = record.write_calls > 0;
        record.input_closed = true;

        match input_error {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(()),
        }
    }

    async fn wait(&mut self) -> Result<HelperExit, LaunchError> {
        let wait_duration = self.launcher.lock().wait_duration;
        if !wait_duration.is_zero() {
            tokio::time::sleep(wait_duration).await;
        }

        let mut state = self.launcher.lock();
        let result = match state.wait_error.clone() {
            Some(err) => Err(err),
            None => Ok(state.exit),
        };
        state.launches[self.index].waited = true;
        result
    }
}
