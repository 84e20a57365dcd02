//! Error types for the recon-timeline crate.
//!
//! Only caller bugs are errors here. Missing data resolves to the blank
//! snapshot or an empty movie, and duplicate ticks are reported through the
//! `bool` returned by [`Timeline::insert`].
//!
//! [`Timeline::insert`]: crate::Timeline::insert

/// Errors raised by timeline operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    /// A snapshot was offered to the timeline of a different robot.
    #[error("snapshot for {snapshot:?} cannot be added to the timeline of {timeline:?}")]
    NameMismatch {
        /// Name the timeline was created for.
        timeline: String,
        /// Name carried by the rejected snapshot.
        snapshot: String,
    },
}
