//! Per-robot snapshot timelines for the Recon robot tracker.
//!
//! A timeline is the full observed history of one robot: one time-ordered
//! sequence of [`Snapshot`]s per round, queried by tick and replayed as a
//! [`Movie`]. Inserting a snapshot may also reveal that the robot fired,
//! which is published to the timeline's listeners.
//!
//! # Modules
//!
//! - [`timeline`] -- [`Timeline`] storage, insertion, queries and listeners
//! - [`search`] -- Nearest-tick search shared by insertion and queries
//! - [`movie`] -- Bidirectional playback cursor ([`Movie`])
//! - [`rules`] -- Shot detection thresholds ([`FireRules`])
//! - [`error`] -- Contract violations ([`TimelineError`])
//!
//! [`Snapshot`]: recon_types::Snapshot

pub mod error;
pub mod movie;
pub mod rules;
pub mod search;
pub mod timeline;

pub use error::TimelineError;
pub use movie::Movie;
pub use rules::FireRules;
pub use search::nearest_index;
pub use timeline::Timeline;
