use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Exit code recorded for an unexpected helper failure.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Set-once failure indicator shared between the prefetcher and its host.
///
/// Starts at `0`. The first recorded failure sets it to
/// [`FAILURE_EXIT_CODE`]; it is never reset. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct ExitSignal {
    code: Arc<AtomicI32>,
}

impl ExitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure. Returns `true` if this call was the one that set it.
    pub fn record_failure(&self) -> bool {
        self.code
            .compare_exchange(0, FAILURE_EXIT_CODE, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Exit code the host should use: `0` unless a failure was recorded.
    pub fn exit_code(&self) -> i32 {
        self.code.load(Ordering::Acquire)
    }

    pub fn is_failed(&self) -> bool {
        self.exit_code() != 0
    }
}
