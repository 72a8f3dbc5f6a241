//! Launching the external prefetch helper.
//!
//! The host's process-spawning primitive is consumed through the
//! [`HelperLauncher`] trait. [`CommandLauncher`] is the `tokio::process`
//! backed implementation; tests use the mocks in [`crate::testing`].
//!
//! # Example
//!
//! ```ignore
//! use objfs_prefetch_core::launcher::{CommandLauncher, HelperInvocation, HelperLauncher};
//!
//! let launcher = CommandLauncher::new();
//! let invocation = HelperInvocation::new("objfsutil").with_args(["prefetch"]);
//!
//! let mut process = launcher.launch(&invocation)?;
//! process.write_input(b"a.d.ts\nb.ts").await?;
//! process.end_input().await?;
//! let exit = process.wait().await?;
//! ```

mod command;
mod error;
mod traits;
mod types;

pub use command::CommandLauncher;
pub use error::LaunchError;
pub use traits::{HelperLauncher, HelperProcess};
pub use types::{HelperExit, HelperInvocation, OutputRouting};
