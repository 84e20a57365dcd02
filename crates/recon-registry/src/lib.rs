//! Observation routing for the Recon robot tracker.
//!
//! The [`Registry`] owns one [`Timeline`] per robot the observer has seen and
//! is the single entry point for sensor events and teammate messages. It
//! hides the difference between known and unknown robots from callers:
//! lookups always return a [`TimelineView`], never an absence.
//!
//! # Modules
//!
//! - [`registry`] -- [`Registry`] routing, selection and discovery listeners
//! - [`factory`] -- [`SnapshotFactory`] / [`TimelineFactory`] seams and their
//!   standard implementations
//! - [`view`] -- [`TimelineView`], the read handle returned by queries
//! - [`error`] -- [`RegistryError`]
//!
//! [`Timeline`]: recon_timeline::Timeline

pub mod error;
pub mod factory;
pub mod registry;
pub mod view;

pub use error::RegistryError;
pub use factory::{
    SnapshotFactory, StandardSnapshotFactory, StandardTimelineFactory, TimelineFactory,
    relative_angle,
};
pub use registry::{Registry, Routing};
pub use view::TimelineView;
