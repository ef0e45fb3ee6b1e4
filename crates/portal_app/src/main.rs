mod platform;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use portal_engine::PortalConfig;
use portal_logging::{portal_info, portal_warn};

use platform::logging::LogDestination;

const DEFAULT_CONFIG: &str = "gif_portal.ron";

/// Console client for the on-chain GIF list.
#[derive(Parser, Debug)]
#[command(name = "gif_portal", version)]
struct Args {
    /// RON config file. Defaults to ./gif_portal.ron when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,
    /// Log at debug level.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    platform::logging::initialize(args.log, args.verbose);

    let config = load_config(args.config.as_deref())?;
    portal_info!("Starting with cluster {:?}", config.cluster);
    platform::app::run_app(config)
}

fn load_config(explicit: Option<&Path>) -> Result<PortalConfig> {
    if let Some(path) = explicit {
        return PortalConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    let path = Path::new(DEFAULT_CONFIG);
    if path.exists() {
        return PortalConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    portal_warn!("{} not found; using built-in defaults", DEFAULT_CONFIG);
    let cwd = std::env::current_dir().context("reading the working directory")?;
    Ok(PortalConfig::default().resolve_paths(&cwd))
}
