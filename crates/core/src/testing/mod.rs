//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`HelperLauncher`](crate::launcher::HelperLauncher)
//! so the prefetch trigger can be exercised without an `objfsutil` binary.
//!
//! # Example
//!
//! ```rust,ignore
//! use objfs_prefetch_core::testing::MockLauncher;
//!
//! let launcher = Arc::new(MockLauncher::new());
//! let prefetcher = Prefetcher::new(config, PlatformCapability::ProcessSpawn, launcher.clone());
//!
//! prefetcher.prefetch(&["a.d.ts"]).outcome().await;
//!
//! let launches = launcher.recorded_launches();
//! assert_eq!(launches[0].input, b"a.d.ts\na.metadata.json");
//! ```

mod mock_launcher;

pub use mock_launcher::{MockHelperProcess, MockLauncher, RecordedLaunch};
