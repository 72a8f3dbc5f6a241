//! Host platform capabilities.

use serde::{Deserialize, Serialize};

/// Whether the host can spawn child processes at all.
///
/// Decided once at startup and injected into the prefetcher, so a sandboxed
/// or browser-like host degrades to a silent no-op instead of probing on
/// every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformCapability {
    /// Child processes can be spawned.
    ProcessSpawn,
    /// No process spawning (wasm, restricted sandboxes).
    Unavailable,
}

impl PlatformCapability {
    /// Detects the capability of the current build target.
    pub fn detect() -> Self {
        if cfg!(any(target_family = "wasm", target_os = "unknown")) {
            Self::Unavailable
        } else {
            Self::ProcessSpawn
        }
    }

    /// Whether spawning a helper is possible.
    pub fn can_spawn(self) -> bool {
        matches!(self, Self::ProcessSpawn)
    }
}
