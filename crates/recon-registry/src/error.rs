//! Error types for the recon-registry crate.

use recon_timeline::TimelineError;

/// Errors raised while routing inputs into timelines.
///
/// Unknown robots, empty rounds and duplicate ticks are not errors; they are
/// reported through [`Routing`](crate::Routing) or answered with defaults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A timeline rejected a snapshot as a contract violation.
    #[error("timeline error: {source}")]
    Timeline {
        /// The underlying timeline error.
        #[from]
        source: TimelineError,
    },
}
