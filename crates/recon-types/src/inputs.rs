//! Raw inputs delivered to the tracker by the host each tick.
//!
//! Every input channel is a closed enum so the registry matches them
//! exhaustively:
//!
//! - [`SensorEvent`] -- radar sightings and death notices from the host game.
//! - [`TeamMessage`] -- already-formed state broadcast by a teammate.
//!
//! [`SelfState`] describes the observing robot itself; sightings are relative
//! to it.

use serde::{Deserialize, Serialize};

use crate::snapshot::{RoundId, Snapshot, Tick};

/// State of the observing robot ("self") at the current tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfState {
    /// Name of the observing robot.
    pub name: String,
    /// Current round.
    #[serde(default)]
    pub round: RoundId,
    /// Current tick.
    #[serde(default)]
    pub time: Tick,
    /// Horizontal battlefield coordinate.
    #[serde(default)]
    pub x: f64,
    /// Vertical battlefield coordinate.
    #[serde(default)]
    pub y: f64,
    /// Remaining energy.
    #[serde(default)]
    pub energy: f64,
    /// Body heading in radians.
    #[serde(default)]
    pub heading: f64,
    /// Signed forward velocity.
    #[serde(default)]
    pub velocity: f64,
}

impl SelfState {
    /// Create an observer with the given name at the origin, round 0, tick 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            round: 0,
            time: 0,
            x: 0.0,
            y: 0.0,
            energy: 0.0,
            heading: 0.0,
            velocity: 0.0,
        }
    }
}

/// A radar sighting of another robot, relative to the observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    /// Name of the robot that was seen.
    pub name: String,
    /// Round of the sighting.
    pub round: RoundId,
    /// Tick of the sighting.
    pub time: Tick,
    /// Bearing to the robot in radians, relative to the observer's heading.
    pub bearing: f64,
    /// Distance from the observer to the robot.
    pub distance: f64,
    /// The robot's remaining energy.
    pub energy: f64,
    /// The robot's absolute body heading in radians.
    pub heading: f64,
    /// The robot's signed forward velocity.
    pub velocity: f64,
}

/// Notice that a robot has been destroyed.
///
/// Fields the host does not know are left as `None`; the terminal snapshot
/// then takes them from the robot's most recent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Termination {
    /// Name of the destroyed robot.
    pub name: String,
    /// Round in which the robot was destroyed.
    pub round: RoundId,
    /// Tick at which the robot was destroyed.
    pub time: Tick,
    /// Last known energy, if reported.
    #[serde(default)]
    pub energy: Option<f64>,
    /// Last known position, if reported.
    #[serde(default)]
    pub position: Option<(f64, f64)>,
}

/// Events raised by the host game's sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorEvent {
    /// Another robot was scanned.
    Sighted(Sighting),
    /// Another robot was destroyed.
    Terminated(Termination),
}

impl SensorEvent {
    /// Name of the robot the event is about.
    pub fn name(&self) -> &str {
        match self {
            Self::Sighted(sighting) => &sighting.name,
            Self::Terminated(termination) => &termination.name,
        }
    }
}

/// Messages received from teammates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TeamMessage {
    /// A fully-formed snapshot of some robot, observed by a teammate.
    Snapshot(Snapshot),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn sensor_event_name() {
        let event = SensorEvent::Terminated(Termination {
            name: "SpinBot".to_owned(),
            round: 0,
            time: 12,
            energy: None,
            position: None,
        });
        assert_eq!(event.name(), "SpinBot");
    }

    #[test]
    fn sensor_event_is_tagged_in_json() {
        let json = r#"{"kind":"sighted","name":"Walls","round":0,"time":3,
            "bearing":0.5,"distance":200.0,"energy":100.0,"heading":0.0,"velocity":8.0}"#;
        let event: SensorEvent = serde_json::from_str(json).unwrap();
        match event {
            SensorEvent::Sighted(sighting) => {
                assert_eq!(sighting.name, "Walls");
                assert_eq!(sighting.time, 3);
            }
            SensorEvent::Terminated(_) => panic!("expected a sighting"),
        }
    }

    #[test]
    fn termination_optional_fields_default_to_none() {
        let json = r#"{"kind":"terminated","name":"Ramfire","round":2,"time":90}"#;
        let event: SensorEvent = serde_json::from_str(json).unwrap();
        let SensorEvent::Terminated(termination) = event else {
            panic!("expected a termination");
        };
        assert!(termination.energy.is_none());
        assert!(termination.position.is_none());
    }

    #[test]
    fn team_message_carries_snapshot() {
        let snap = Snapshot::new("Corners", 1, 5).with_energy(42.0);
        let json = serde_json::to_string(&TeamMessage::Snapshot(snap.clone())).unwrap();
        assert!(json.contains("\"kind\":\"snapshot\""));
        let restored: TeamMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, TeamMessage::Snapshot(snap));
    }

    #[test]
    fn self_state_defaults_missing_fields() {
        let observer: SelfState = serde_json::from_str(r#"{"name":"Recon"}"#).unwrap();
        assert_eq!(observer, SelfState::new("Recon"));
    }
}
