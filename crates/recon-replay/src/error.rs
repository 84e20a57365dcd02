//! Error types for the replay binary.
//!
//! [`ReplayError`] wraps every failure mode of loading a battle log and
//! feeding it through the tracker.

use std::path::PathBuf;

/// Top-level error for the replay binary.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The command line was missing the battle log path.
    #[error("usage: recon-replay <battle-log.jsonl> [config.yaml]")]
    Usage,

    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: recon_core::ConfigError,
    },

    /// The battle log could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Path of the battle log.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Reading a line of the battle log failed.
    #[error("line {line}: read failed: {source}")]
    Read {
        /// One-based line number in the battle log.
        line: usize,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A log line was not a valid tick record.
    #[error("line {line}: malformed tick record: {source}")]
    Parse {
        /// One-based line number in the battle log.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The tracker rejected an input on a log line.
    #[error("line {line}: {source}")]
    Route {
        /// One-based line number in the battle log.
        line: usize,
        /// The underlying registry error.
        source: recon_registry::RegistryError,
    },
}
