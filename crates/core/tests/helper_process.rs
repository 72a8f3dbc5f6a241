//! Integration tests against real child processes.
//!
//! `sh` stands in for `objfsutil` so the stdin transfer, argument mode and
//! spawn error classification can be checked without the real helper.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use objfs_prefetch_core::{
    prefetch, CommandLauncher, ExitSignal, HelperLauncher, InputMode, LaunchError, OutputRouting,
    PlatformCapability, PrefetchConfig, PrefetchOutcome, Prefetcher,
};

fn sh_config(script: &str, capture: &Path) -> PrefetchConfig {
    let mut config = PrefetchConfig::default();
    config.helper.program = "sh".into();
    config.helper.args = vec![
        "-c".to_string(),
        script.to_string(),
        capture.display().to_string(),
    ];
    config.helper.output = OutputRouting::Discard;
    config
}

fn command_prefetcher(config: PrefetchConfig) -> Prefetcher {
    Prefetcher::new(
        config,
        PlatformCapability::ProcessSpawn,
        Arc::new(CommandLauncher::new()) as Arc<dyn HelperLauncher>,
    )
}

#[tokio::test]
async fn test_stdin_receives_newline_joined_candidates() {
    let dir = TempDir::new().unwrap();
    let capture = dir.path().join("stdin.txt");
    let prefetcher = command_prefetcher(sh_config("cat > \"$0\"", &capture));

    let outcome = prefetcher
        .prefetch(&["lib/core.d.ts", "src/app.ts"])
        .outcome()
        .await;

    assert!(matches!(outcome, PrefetchOutcome::Completed(exit) if exit.success));
    assert_eq!(
        fs::read_to_string(&capture).unwrap(),
        "lib/core.d.ts\nsrc/app.ts\nlib/core.metadata.json"
    );
    assert!(!prefetcher.exit_signal().is_failed());
}

#[tokio::test]
async fn test_arguments_mode_passes_candidates_as_argv() {
    let dir = TempDir::new().unwrap();
    let capture = dir.path().join("argv.txt");
    let mut config = sh_config("printf '%s\\n' \"$@\" > \"$0\"", &capture);
    config.helper.input = InputMode::Arguments;
    let prefetcher = command_prefetcher(config);

    let outcome = prefetcher.prefetch(&["a.d.ts", "b.ts"]).outcome().await;

    assert!(matches!(outcome, PrefetchOutcome::Completed(_)));
    assert_eq!(
        fs::read_to_string(&capture).unwrap(),
        "a.d.ts\nb.ts\na.metadata.json\n"
    );
}

#[tokio::test]
async fn test_helper_ignoring_stdin_does_not_fail() {
    let dir = TempDir::new().unwrap();
    let capture = dir.path().join("unused");
    let prefetcher = command_prefetcher(sh_config("exit 0", &capture));

    // Large enough to overflow the pipe buffer once the helper is gone.
    let files: Vec<String> = (0..100_000)
        .map(|i| format!("google3/some/deep/package/path/file_{}.ts", i))
        .collect();

    let outcome = prefetcher.prefetch(&files).outcome().await;

    assert!(matches!(outcome, PrefetchOutcome::Completed(_)));
    assert!(!prefetcher.exit_signal().is_failed());
}

#[tokio::test]
async fn test_nonzero_exit_is_completed() {
    let dir = TempDir::new().unwrap();
    let capture = dir.path().join("unused");
    let prefetcher = command_prefetcher(sh_config("cat > /dev/null; exit 3", &capture));

    let outcome = prefetcher.prefetch(&["a.ts"]).outcome().await;

    match outcome {
        PrefetchOutcome::Completed(exit) => {
            assert_eq!(exit.code, Some(3));
            assert!(!exit.success);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(!prefetcher.exit_signal().is_failed());
}

#[tokio::test]
async fn test_missing_helper_is_ignored() {
    let dir = TempDir::new().unwrap();
    let mut config = PrefetchConfig::default();
    config.helper.program = dir.path().join("objfsutil");
    let prefetcher = command_prefetcher(config);

    let outcome = prefetcher.prefetch(&["a.ts"]).outcome().await;

    assert_eq!(outcome, PrefetchOutcome::IgnoredMissingBinary);
    assert_eq!(prefetcher.exit_signal().exit_code(), 0);
}

#[tokio::test]
async fn test_non_executable_helper_fails() {
    let dir = TempDir::new().unwrap();
    let helper = dir.path().join("objfsutil");
    fs::write(&helper, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&helper, fs::Permissions::from_mode(0o644)).unwrap();

    let mut config = PrefetchConfig::default();
    config.helper.program = helper;
    let prefetcher = command_prefetcher(config);

    let outcome = prefetcher.prefetch(&["a.ts"]).outcome().await;

    assert!(matches!(
        outcome,
        PrefetchOutcome::Failed(LaunchError::PermissionDenied { .. })
    ));
    assert_eq!(prefetcher.exit_signal().exit_code(), 1);
}

#[tokio::test]
async fn test_default_prefetch_without_objfsutil_installed() {
    let exit_signal = ExitSignal::new();

    let outcome = prefetch(None, &["a.d.ts"], &exit_signal).outcome().await;

    // Test machines do not ship objfsutil; if one does, the helper simply runs.
    assert!(matches!(
        outcome,
        PrefetchOutcome::IgnoredMissingBinary | PrefetchOutcome::Completed(_)
    ));
    assert!(!exit_signal.is_failed());
}
