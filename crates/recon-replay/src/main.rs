//! Battle log replay for the Recon tracker.
//!
//! Reads a JSON Lines battle log (one tick of host input per line), feeds it
//! through a registry exactly as the live robot would, and prints what the
//! tracker ended up knowing about every robot it saw.
//!
//! ```text
//! recon-replay <battle-log.jsonl> [config.yaml]
//! ```
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the given path, else `recon-config.yaml`,
//!    else defaults
//! 2. Initialize structured logging (tracing) at the configured level
//! 3. Build the registry with shot and discovery logging attached
//! 4. Replay the battle log
//! 5. Print a per-robot summary

mod error;
mod replay;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use recon_core::{LoggingConfig, ReconConfig, observer_from_config};
use recon_registry::{Registry, StandardSnapshotFactory, StandardTimelineFactory};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ReplayError;

/// Configuration file looked for when none is given on the command line.
const DEFAULT_CONFIG: &str = "recon-config.yaml";

/// Application entry point for the replay tool.
///
/// # Errors
///
/// Returns an error if the arguments, configuration, or battle log are
/// invalid.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args_os().skip(1);
    let log_path = args.next().map(PathBuf::from).ok_or(ReplayError::Usage)?;
    let config_path = args.next().map(PathBuf::from);

    // 1. Load configuration.
    let (config, loaded_from) = load_config(config_path.as_deref())?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        source = loaded_from.as_deref().map_or("defaults", |_| "file"),
        path = ?loaded_from,
        observer = config.observer.name,
        level = config.logging.level,
        "Configuration loaded"
    );

    // 3. Build the registry.
    let factory = StandardTimelineFactory::new(config.fire_rules).with_fired_hook(|event| {
        info!(
            robot = event.name(),
            round = event.round(),
            tick = event.time(),
            power = event.power,
            "Shot inferred"
        );
    });
    let rules = factory.rules();
    info!(
        min_fire_cost = rules.min_fire_cost,
        max_fire_cost = rules.max_fire_cost,
        max_deceleration = rules.max_deceleration,
        "Shot detection configured"
    );
    let mut registry = Registry::new(
        observer_from_config(&config),
        StandardSnapshotFactory::new(),
        factory,
    );
    registry.on_discovered(|timeline| {
        let first = timeline.recent();
        info!(
            robot = timeline.name(),
            round = first.round,
            tick = first.time,
            "Robot discovered"
        );
    });

    // 4. Replay the battle log.
    let file = File::open(&log_path).map_err(|source| ReplayError::Open {
        path: log_path,
        source,
    })?;
    let totals = replay::replay(&mut registry, BufReader::new(file))?;
    info!(
        ticks = totals.ticks,
        discovered = totals.discovered,
        inserted = totals.inserted,
        duplicate = totals.duplicate,
        self_filtered = totals.self_filtered,
        ignored = totals.ignored,
        robots = registry.len(),
        "Replay complete"
    );

    // 5. Print the summary.
    for line in replay::summary_lines(&registry) {
        println!("{line}");
    }

    Ok(())
}

/// Load configuration, returning where it came from.
///
/// An explicitly given path must exist. Without one, `recon-config.yaml` in
/// the working directory is used if present, otherwise the defaults.
fn load_config(explicit: Option<&Path>) -> Result<(ReconConfig, Option<PathBuf>), ReplayError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG);
            if !fallback.exists() {
                return Ok((ReconConfig::default(), None));
            }
            fallback.to_path_buf()
        }
    };
    let config = ReconConfig::from_file(&path)?;
    Ok((config, Some(path)))
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
