//! Configuration and per-tick orchestration for the Recon tracker.
//!
//! This crate sits between the host game loop and the
//! [`Registry`](recon_registry::Registry): it loads the tracker's settings and
//! applies each tick's batch of observations in a fixed order.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `recon-config.yaml` into
//!   strongly-typed structs.
//! - [`tick`] -- Applies one tick of host input to a registry and reports
//!   what happened to each input.

pub mod config;
pub mod tick;

pub use config::{ConfigError, LoggingConfig, ObserverConfig, ReconConfig};
pub use tick::{TickInput, TickReport, apply_tick, observer_from_config, registry_from_config};
