mod input;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use objfs_prefetch_core::{
    load_config_or_default, metrics, validate_config, CommandLauncher, ExitSignal,
    HelperLauncher, PlatformCapability, Prefetcher, TraceSink,
};

use input::{parse_args, read_file_list, Request, USAGE};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Optional config file location
const CONFIG_ENV: &str = "OBJFS_PREFETCH_CONFIG";

/// When set, metrics are printed to stderr before exiting
const PRINT_METRICS_ENV: &str = "OBJFS_PREFETCH_PRINT_METRICS";

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    // Logs go to stderr; stdout only carries --help and --version output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let file_names = match parse_args(std::env::args().skip(1)) {
        Request::Help => {
            println!("{}", USAGE);
            return Ok(0);
        }
        Request::Version => {
            println!("objfs-prefetch {}", VERSION);
            return Ok(0);
        }
        Request::Files(files) => files,
        Request::Stdin => read_file_list(BufReader::new(tokio::io::stdin()))
            .await
            .context("Failed to read file list from stdin")?,
    };

    let config_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
    match &config_path {
        Some(path) => info!("Loading configuration from {:?}", path),
        None => info!("No {} set, using default configuration", CONFIG_ENV),
    }
    let config = load_config_or_default(config_path.as_deref())
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!(
        "Prefetch helper: {} {}",
        config.helper.program.display(),
        config.helper.args.join(" ")
    );

    let exit_signal = ExitSignal::new();
    let launcher: Arc<dyn HelperLauncher> = Arc::new(CommandLauncher::new());
    let prefetcher = Prefetcher::new(config, PlatformCapability::detect(), launcher)
        .with_trace(TraceSink::tracing())
        .with_exit_signal(exit_signal.clone());

    let handle = prefetcher.prefetch(&file_names);

    // Shutdown: the host decides its exit status from the prefetch result.
    let outcome = handle.outcome().await;
    info!("Prefetch finished: {}", outcome.label());

    if std::env::var_os(PRINT_METRICS_ENV).is_some() {
        eprint!("{}", metrics::gather_metrics());
    }

    Ok(exit_signal.exit_code())
}
