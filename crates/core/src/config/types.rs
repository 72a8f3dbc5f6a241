use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::launcher::OutputRouting;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrefetchConfig {
    /// Master switch; a disabled trigger never launches the helper.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub helper: HelperConfig,
    #[serde(default)]
    pub sidecar: SidecarConfig,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            helper: HelperConfig::default(),
            sidecar: SidecarConfig::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// How the candidate list reaches the helper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Newline-separated list on stdin, closed with EOF.
    #[default]
    Stdin,
    /// Candidates appended to the helper's argv; stdin is not used.
    Arguments,
}

/// Helper process configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HelperConfig {
    /// Helper binary, resolved through PATH when not absolute.
    #[serde(default = "default_program")]
    pub program: PathBuf,
    /// Leading arguments placed before any candidate arguments.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default)]
    pub input: InputMode,
    #[serde(default)]
    pub output: OutputRouting,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            input: InputMode::default(),
            output: OutputRouting::default(),
        }
    }
}

fn default_program() -> PathBuf {
    PathBuf::from("objfsutil")
}

fn default_args() -> Vec<String> {
    vec!["prefetch".to_string()]
}

/// Sidecar derivation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SidecarConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_rules")]
    pub rules: Vec<SidecarRule>,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            rules: default_rules(),
        }
    }
}

impl SidecarConfig {
    /// Rules that apply, or none when derivation is switched off.
    pub fn active_rules(&self) -> &[SidecarRule] {
        if self.enabled {
            &self.rules
        } else {
            &[]
        }
    }
}

/// A suffix pair: files ending in `source_suffix` get a companion entry
/// ending in `companion_suffix`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SidecarRule {
    pub source_suffix: String,
    pub companion_suffix: String,
}

impl SidecarRule {
    pub fn new(source_suffix: impl Into<String>, companion_suffix: impl Into<String>) -> Self {
        Self {
            source_suffix: source_suffix.into(),
            companion_suffix: companion_suffix.into(),
        }
    }

    /// `.d.ts` declaration files paired with Angular `.metadata.json` sidecars.
    pub fn declaration_metadata() -> Self {
        Self::new(".d.ts", ".metadata.json")
    }

    /// Returns the companion name for `file_name`, if it matches.
    pub fn companion_of(&self, file_name: &str) -> Option<String> {
        file_name
            .strip_suffix(self.source_suffix.as_str())
            .map(|stem| format!("{}{}", stem, self.companion_suffix))
    }
}

fn default_rules() -> Vec<SidecarRule> {
    vec![SidecarRule::declaration_metadata()]
}
