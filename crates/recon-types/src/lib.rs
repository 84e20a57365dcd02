//! Shared type definitions for the Recon robot tracker.
//!
//! Every crate in the workspace builds on these types. Nothing here has
//! behaviour beyond construction and accessors.
//!
//! # Modules
//!
//! - [`snapshot`] -- [`Snapshot`], one robot's observable state at one tick
//! - [`inputs`] -- Observer state and the raw sensor/team input channels
//! - [`events`] -- Notifications derived from snapshots ([`FiredEvent`])
//! - [`listeners`] -- Ordered listener collections ([`Listeners`])

pub mod events;
pub mod inputs;
pub mod listeners;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use events::FiredEvent;
pub use inputs::{SelfState, SensorEvent, Sighting, TeamMessage, Termination};
pub use listeners::{ListenerId, Listeners};
pub use snapshot::{RoundId, Snapshot, Tick};
