//! The [`Snapshot`] value type: one robot's observable state at one tick.
//!
//! Snapshots are plain data. A timeline owns them once inserted and only
//! hands out shared references or clones, so a stored snapshot never
//! changes. The blank snapshot ([`Snapshot::blank`]) is the answer to every
//! query that has no data behind it.

use serde::{Deserialize, Serialize};

/// Identifier of a battle round. Time restarts at zero every round.
pub type RoundId = u32;

/// Tick counter within a round.
pub type Tick = u64;

/// Observable state of a single robot at a single tick.
///
/// Positions are battlefield coordinates; `heading` is in radians, measured
/// clockwise from north. The `delta_*` fields hold the change since the
/// robot's previous snapshot in the same round and are zero for the first
/// snapshot of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Name of the robot this snapshot describes.
    pub name: String,
    /// Round the snapshot was taken in.
    pub round: RoundId,
    /// Tick the snapshot was taken at.
    pub time: Tick,
    /// Horizontal battlefield coordinate.
    pub x: f64,
    /// Vertical battlefield coordinate.
    pub y: f64,
    /// Remaining energy.
    pub energy: f64,
    /// Body heading in radians.
    pub heading: f64,
    /// Signed forward velocity.
    pub velocity: f64,
    /// Energy change since the previous snapshot.
    #[serde(default)]
    pub delta_energy: f64,
    /// Heading change since the previous snapshot, normalized to `[-pi, pi)`.
    #[serde(default)]
    pub delta_heading: f64,
    /// Velocity change since the previous snapshot.
    #[serde(default)]
    pub delta_velocity: f64,
}

impl Snapshot {
    /// Create a snapshot for `name` at the given round and tick with every
    /// physical field zeroed.
    pub fn new(name: impl Into<String>, round: RoundId, time: Tick) -> Self {
        Self {
            name: name.into(),
            round,
            time,
            x: 0.0,
            y: 0.0,
            energy: 0.0,
            heading: 0.0,
            velocity: 0.0,
            delta_energy: 0.0,
            delta_heading: 0.0,
            delta_velocity: 0.0,
        }
    }

    /// The "no data available" sentinel.
    ///
    /// Empty name, round 0, time 0 and every numeric field zero. A fresh
    /// value is built on each call.
    pub fn blank() -> Self {
        Self::new(String::new(), 0, 0)
    }

    /// Whether this snapshot is the blank sentinel.
    pub fn is_blank(&self) -> bool {
        *self == Self::blank()
    }

    /// Set the battlefield position.
    #[must_use]
    pub const fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the remaining energy.
    #[must_use]
    pub const fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    /// Set the body heading in radians.
    #[must_use]
    pub const fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    /// Set the forward velocity.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the energy, heading and velocity deltas.
    #[must_use]
    pub const fn with_deltas(mut self, energy: f64, heading: f64, velocity: f64) -> Self {
        self.delta_energy = energy;
        self.delta_heading = heading;
        self.delta_velocity = velocity;
        self
    }

    /// Battlefield position as an `(x, y)` pair.
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Straight-line distance to another battlefield point.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_all_zero() {
        let blank = Snapshot::blank();
        assert!(blank.name.is_empty());
        assert_eq!(blank.round, 0);
        assert_eq!(blank.time, 0);
        assert!(blank.energy.abs() < f64::EPSILON);
        assert!(blank.is_blank());
        assert_eq!(Snapshot::default(), blank);
    }

    #[test]
    fn named_snapshot_is_not_blank() {
        let snap = Snapshot::new("Walls", 0, 0);
        assert!(!snap.is_blank());
    }

    #[test]
    fn builder_sets_fields() {
        let snap = Snapshot::new("Crazy", 2, 17)
            .with_position(100.0, 250.0)
            .with_energy(87.5)
            .with_heading(1.5)
            .with_velocity(-4.0)
            .with_deltas(-0.5, 0.1, 2.0);
        assert_eq!(snap.position(), (100.0, 250.0));
        assert_eq!(snap.round, 2);
        assert_eq!(snap.time, 17);
        assert!((snap.energy - 87.5).abs() < f64::EPSILON);
        assert!((snap.velocity + 4.0).abs() < f64::EPSILON);
        assert!((snap.delta_velocity - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_uses_euclidean_metric() {
        let snap = Snapshot::new("Tracker", 0, 1).with_position(3.0, 4.0);
        assert!((snap.distance_to(0.0, 0.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn deltas_default_when_missing_from_json() {
        let json = r#"{"name":"Fire","round":1,"time":40,"x":10.0,"y":20.0,
            "energy":99.0,"heading":0.0,"velocity":8.0}"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.name, "Fire");
        assert_eq!(snap.time, 40);
        assert!(snap.delta_energy.abs() < f64::EPSILON);
    }
}
