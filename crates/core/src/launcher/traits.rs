//! Trait definitions for the launcher module.

use async_trait::async_trait;
use std::io;

use super::error::LaunchError;
use super::types::{HelperExit, HelperInvocation};

/// Spawns helper processes.
///
/// `launch` must not wait for the helper to start doing work; it returns as
/// soon as the process exists (or failed to).
pub trait HelperLauncher: Send + Sync {
    /// Returns the name of this launcher implementation.
    fn name(&self) -> &str;

    /// Spawns the helper described by `invocation`.
    fn launch(
        &self,
        invocation: &HelperInvocation,
    ) -> Result<Box<dyn HelperProcess>, LaunchError>;
}

/// A running helper.
///
/// The input stream is used for at most one write followed by
/// [`end_input`](HelperProcess::end_input). Input errors are plain
/// `io::Error`s; callers are free to ignore them since the stream may
/// already be gone when the helper died early.
#[async_trait]
pub trait HelperProcess: Send {
    /// OS process id, if known.
    fn id(&self) -> Option<u32> {
        None
    }

    /// Writes `payload` to the helper's stdin.
    async fn write_input(&mut self, payload: &[u8]) -> io::Result<()>;

    /// Signals end-of-input by closing stdin.
    async fn end_input(&mut self) -> io::Result<()>;

    /// Waits for the helper to terminate.
    async fn wait(&mut self) -> Result<HelperExit, LaunchError>;
}
