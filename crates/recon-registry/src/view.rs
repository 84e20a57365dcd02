//! Read-only access to a timeline returned by registry queries.

use core::ops::Deref;

use recon_timeline::Timeline;

/// A timeline handed out by [`Registry`](crate::Registry) lookups.
///
/// Either a tracked timeline borrowed from the registry, or a freshly built
/// placeholder for a robot the registry has never seen. Both dereference to
/// [`Timeline`], so callers never need to branch on absence.
#[derive(Debug)]
pub enum TimelineView<'a> {
    /// A timeline owned by the registry.
    Tracked(&'a Timeline),
    /// An empty stand-in for an unknown robot.
    Unknown(Timeline),
}

impl TimelineView<'_> {
    /// Whether the view refers to a timeline the registry tracks.
    pub const fn is_tracked(&self) -> bool {
        matches!(self, Self::Tracked(_))
    }
}

impl Deref for TimelineView<'_> {
    type Target = Timeline;

    fn deref(&self) -> &Timeline {
        match self {
            Self::Tracked(timeline) => timeline,
            Self::Unknown(timeline) => timeline,
        }
    }
}

impl PartialEq for TimelineView<'_> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}
