//! `tokio::process` backed launcher.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};

use super::error::LaunchError;
use super::traits::{HelperLauncher, HelperProcess};
use super::types::{HelperExit, HelperInvocation, OutputRouting};

/// Launches helpers as real child processes.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandLauncher;

impl CommandLauncher {
    pub fn new() -> Self {
        Self
    }

    fn build_command(invocation: &HelperInvocation) -> Command {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);

        if invocation.pipe_stdin {
            command.stdin(Stdio::piped());
        } else {
            command.stdin(Stdio::null());
        }

        match invocation.output {
            OutputRouting::HostStderr => {
                command.stdout(io::stderr()).stderr(io::stderr());
            }
            OutputRouting::Discard => {
                command.stdout(Stdio::null()).stderr(Stdio::null());
            }
        }

        command
    }
}

impl HelperLauncher for CommandLauncher {
    fn name(&self) -> &str {
        "command"
    }

    fn launch(
        &self,
        invocation: &HelperInvocation,
    ) -> Result<Box<dyn HelperProcess>, LaunchError> {
        let mut child = Self::build_command(invocation)
            .spawn()
            .map_err(|e| LaunchError::from_io(&invocation.program, &e))?;

        let stdin = child.stdin.take();

        tracing::debug!(
            program = %invocation.program.display(),
            pid = ?child.id(),
            "Spawned prefetch helper"
        );

        Ok(Box::new(CommandProcess {
            program: invocation.program.clone(),
            child,
            stdin,
        }))
    }
}

struct CommandProcess {
    program: PathBuf,
    child: Child,
    stdin: Option<ChildStdin>,
}

#[async_trait]
impl HelperProcess for CommandProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    async fn write_input(&mut self, payload: &[u8]) -> io::Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "helper stdin is closed"))?;
        stdin.write_all(payload).await?;
        stdin.flush().await
    }

    async fn end_input(&mut self) -> io::Result<()> {
        match self.stdin.take() {
            Some(mut stdin) => stdin.shutdown().await,
            None => Ok(()),
        }
    }

    async fn wait(&mut self) -> Result<HelperExit, LaunchError> {
        // Never leave the helper blocked on a stdin nobody will close.
        self.stdin.take();

        self.child
            .wait()
            .await
            .map(HelperExit::from)
            .map_err(|e| LaunchError::from_io(&self.program, &e))
    }
}
