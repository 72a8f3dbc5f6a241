//! The prefetch trigger.
//!
//! [`Prefetcher::prefetch`] expands the caller's file list into a
//! [`CandidateSet`](crate::CandidateSet), then hands everything else to a
//! detached background task:
//!
//! ```text
//! NOT_STARTED -> SPAWNED -> IGNORED_MISSING_BINARY | FAILED | COMPLETED
//! ```
//!
//! The caller never waits. Its only externally visible effect is the
//! [`ExitSignal`], which records unexpected helper failures for the host to
//! consult at shutdown.
//!
//! # Example
//!
//! ```ignore
//! use objfs_prefetch_core::{ExitSignal, Prefetcher, TraceSink};
//!
//! let exit_signal = ExitSignal::new();
//! let prefetcher = Prefetcher::with_defaults()
//!     .with_trace(TraceSink::tracing())
//!     .with_exit_signal(exit_signal.clone());
//!
//! prefetcher.prefetch(&["lib/core.d.ts", "src/app.ts"]).detach();
//!
//! // ... read the files sequentially ...
//!
//! std::process::exit(exit_signal.exit_code());
//! ```

mod exit_signal;
mod runner;
mod transfer;
mod types;

pub use exit_signal::{ExitSignal, FAILURE_EXIT_CODE};
pub use runner::{prefetch, Prefetcher};
pub use types::{PrefetchHandle, PrefetchOutcome};
