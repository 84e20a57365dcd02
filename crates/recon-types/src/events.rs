//! Notifications derived by the tracker.

use crate::snapshot::{RoundId, Snapshot, Tick};

/// A tracked robot appears to have fired a bullet.
///
/// Raised by a timeline when two consecutive snapshots show an energy drop
/// inside the bullet-power band. `snapshot` is the state one tick *before*
/// the drop became visible, which is when the bullet left the gun.
#[derive(Debug, Clone, PartialEq)]
pub struct FiredEvent {
    /// State of the firing robot at the moment of firing.
    pub snapshot: Snapshot,
    /// Inferred bullet power (the size of the energy drop).
    pub power: f64,
}

impl FiredEvent {
    /// Name of the robot that fired.
    pub fn name(&self) -> &str {
        &self.snapshot.name
    }

    /// Round in which the bullet was fired.
    pub const fn round(&self) -> RoundId {
        self.snapshot.round
    }

    /// Tick at which the bullet was fired.
    pub const fn time(&self) -> Tick {
        self.snapshot.time
    }
}
