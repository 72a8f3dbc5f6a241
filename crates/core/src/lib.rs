//! Fire-and-forget objfs prefetch trigger.
//!
//! Network filesystems such as objfs have high per-file latency but great
//! parallelism, while compilers read their inputs one by one. Before such a
//! client starts reading, [`Prefetcher::prefetch`] hands the complete file
//! list (plus speculative sidecar files) to `objfsutil prefetch` in a single
//! background request, without blocking or failing the caller.

pub mod candidates;
pub mod config;
pub mod launcher;
pub mod metrics;
pub mod platform;
pub mod prefetcher;
pub mod testing;
pub mod trace;

pub use candidates::{build_candidate_set, CandidateSet};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, ConfigError,
    HelperConfig, InputMode, PrefetchConfig, SidecarConfig, SidecarRule,
};
pub use launcher::{
    CommandLauncher, HelperExit, HelperInvocation, HelperLauncher, HelperProcess, LaunchError,
    OutputRouting,
};
pub use platform::PlatformCapability;
pub use prefetcher::{
    prefetch, ExitSignal, PrefetchHandle, PrefetchOutcome, Prefetcher, FAILURE_EXIT_CODE,
};
pub use trace::TraceSink;
