//! Types for the launcher module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the helper's stdout and stderr go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputRouting {
    /// Both streams go to the host's stderr, keeping the host's stdout clean.
    #[default]
    HostStderr,
    /// Both streams are discarded.
    Discard,
}

/// A single helper command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperInvocation {
    /// Binary to run.
    pub program: PathBuf,
    /// Full argument list after the program name.
    pub args: Vec<String>,
    /// Whether stdin is a writable pipe (otherwise it is null).
    pub pipe_stdin: bool,
    pub output: OutputRouting,
}

impl HelperInvocation {
    /// Creates an invocation with no arguments, a piped stdin and output
    /// forwarded to the host's stderr.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            pipe_stdin: true,
            output: OutputRouting::default(),
        }
    }

    /// Appends arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets whether stdin is piped.
    pub fn with_stdin(mut self, pipe_stdin: bool) -> Self {
        self.pipe_stdin = pipe_stdin;
        self
    }

    /// Sets the output routing.
    pub fn with_output(mut self, output: OutputRouting) -> Self {
        self.output = output;
        self
    }
}

/// How the helper terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperExit {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    pub success: bool,
}

impl HelperExit {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            success: true,
        }
    }

    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            success: code == 0,
        }
    }
}

impl From<std::process::ExitStatus> for HelperExit {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
            success: status.success(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder() {
        let invocation = HelperInvocation::new("objfsutil")
            .with_args(["prefetch"])
            .with_args(vec!["a.ts".to_string()])
            .with_stdin(false)
            .with_output(OutputRouting::Discard);

        assert_eq!(invocation.program, PathBuf::from("objfsutil"));
        assert_eq!(invocation.args, vec!["prefetch", "a.ts"]);
        assert!(!invocation.pipe_stdin);
        assert_eq!(invocation.output, OutputRouting::Discard);
    }

    #[test]
    fn test_invocation_defaults() {
        let invocation = HelperInvocation::new("objfsutil");
        assert!(invocation.args.is_empty());
        assert!(invocation.pipe_stdin);
        assert_eq!(invocation.output, OutputRouting::HostStderr);
    }

    #[test]
    fn test_helper_exit_with_code() {
        assert!(HelperExit::with_code(0).success);
        let failed = HelperExit::with_code(3);
        assert!(!failed.success);
        assert_eq!(failed.code, Some(3));
        assert_eq!(HelperExit::success(), HelperExit::with_code(0));
    }
}
