//! Per-tick driver: feeds one tick's worth of host input into a registry.
//!
//! Each tick the host hands over the observer's own state, the sensor events
//! raised since the last tick, and any teammate messages received. They are
//! applied in that order:
//!
//! 1. **Observer** -- replace the registry's view of the observing robot so
//!    sightings project from the right position.
//! 2. **Events** -- route sightings and death notices in arrival order.
//! 3. **Messages** -- route teammate snapshots in arrival order.
//!
//! The outcome of every routing is tallied into a [`TickReport`].

use recon_registry::{Registry, RegistryError, Routing, SnapshotFactory, TimelineFactory};
use recon_types::{SelfState, SensorEvent, TeamMessage, Tick};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReconConfig;

/// Everything the host delivers for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// The observing robot's state this tick.
    pub observer: SelfState,
    /// Sensor events in arrival order.
    #[serde(default)]
    pub events: Vec<SensorEvent>,
    /// Teammate messages in arrival order.
    #[serde(default)]
    pub messages: Vec<TeamMessage>,
}

/// Tally of routing outcomes for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The tick the observer reported.
    pub tick: Tick,
    /// Inputs that created a new timeline.
    pub discovered: u32,
    /// Inputs added to an existing timeline.
    pub inserted: u32,
    /// Inputs dropped because the timeline already held that instant.
    pub duplicate: u32,
    /// Inputs describing the observer itself.
    pub self_filtered: u32,
    /// Inputs about robots with no timeline.
    pub ignored: u32,
}

impl TickReport {
    /// Count one routing outcome.
    pub const fn record(&mut self, routing: Routing) {
        let counter = match routing {
            Routing::Discovered => &mut self.discovered,
            Routing::Inserted => &mut self.inserted,
            Routing::Duplicate => &mut self.duplicate,
            Routing::SelfFiltered => &mut self.self_filtered,
            Routing::Ignored => &mut self.ignored,
        };
        *counter = counter.saturating_add(1);
    }

    /// Total number of inputs routed.
    pub const fn total(&self) -> u32 {
        self.discovered
            .saturating_add(self.inserted)
            .saturating_add(self.duplicate)
            .saturating_add(self.self_filtered)
            .saturating_add(self.ignored)
    }
}

/// Apply one tick of host input to `registry`.
///
/// # Errors
///
/// Returns the first [`RegistryError`] raised while routing. Inputs before
/// the failing one stay applied.
pub fn apply_tick<S, T>(
    registry: &mut Registry<S, T>,
    input: &TickInput,
) -> Result<TickReport, RegistryError>
where
    S: SnapshotFactory,
    T: TimelineFactory,
{
    registry.update_observer(input.observer.clone());

    let mut report = TickReport {
        tick: input.observer.time,
        ..TickReport::default()
    };

    for event in &input.events {
        let routing = registry.handle_event(event)?;
        debug!(robot = event.name(), ?routing, "sensor event routed");
        report.record(routing);
    }
    for message in &input.messages {
        report.record(registry.handle_message(message)?);
    }

    debug!(
        tick = report.tick,
        round = input.observer.round,
        discovered = report.discovered,
        inserted = report.inserted,
        duplicate = report.duplicate,
        self_filtered = report.self_filtered,
        ignored = report.ignored,
        "tick applied"
    );

    Ok(report)
}

/// The observer's starting state as named by `config`.
pub fn observer_from_config(config: &ReconConfig) -> SelfState {
    SelfState::new(config.observer.name.clone())
}

/// Build a registry with the standard factories and the configured rules.
pub fn registry_from_config(config: &ReconConfig) -> Registry {
    Registry::standard(observer_from_config(config), config.fire_rules)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use recon_types::{Sighting, Snapshot, Termination};

    use super::*;

    fn sighted(name: &str, time: Tick, energy: f64) -> SensorEvent {
        SensorEvent::Sighted(Sighting {
            name: name.to_owned(),
            round: 0,
            time,
            bearing: 0.5,
            distance: 200.0,
            energy,
            heading: 0.0,
            velocity: 0.0,
        })
    }

    fn observer_at(time: Tick) -> SelfState {
        SelfState {
            time,
            ..SelfState::new("Recon")
        }
    }

    #[test]
    fn report_counts_each_outcome() {
        let mut registry = registry_from_config(&ReconConfig::default());
        let input = TickInput {
            observer: observer_at(1),
            events: vec![
                sighted("a", 1, 100.0),
                sighted("Recon", 1, 100.0),
                SensorEvent::Terminated(Termination {
                    name: "ghost".to_owned(),
                    round: 0,
                    time: 1,
                    energy: None,
                    position: None,
                }),
            ],
            messages: vec![
                TeamMessage::Snapshot(Snapshot::new("a", 0, 1)),
                TeamMessage::Snapshot(Snapshot::new("a", 0, 0)),
            ],
        };

        let report = apply_tick(&mut registry, &input).unwrap();
        assert_eq!(report.tick, 1);
        assert_eq!(report.discovered, 1);
        assert_eq!(report.self_filtered, 1);
        assert_eq!(report.ignored, 1);
        assert_eq!(report.duplicate, 1);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.total(), 5);
        assert_eq!(registry.lookup("a").len(), 2);
    }

    #[test]
    fn events_route_before_messages() {
        let mut registry = registry_from_config(&ReconConfig::default());
        // The message would create the timeline if it ran first; the
        // sighting at the same instant must win instead.
        let input = TickInput {
            observer: observer_at(4),
            events: vec![sighted("b", 4, 55.0)],
            messages: vec![TeamMessage::Snapshot(
                Snapshot::new("b", 0, 4).with_energy(10.0),
            )],
        };

        let report = apply_tick(&mut registry, &input).unwrap();
        assert_eq!(report.discovered, 1);
        assert_eq!(report.duplicate, 1);
        assert!((registry.lookup("b").recent().energy - 55.0).abs() < f64::EPSILON);
    }

    #[test]
    fn observer_is_replaced_each_tick() {
        let mut registry = registry_from_config(&ReconConfig::default());
        let moved = SelfState {
            x: 10.0,
            y: 20.0,
            ..observer_at(3)
        };
        let input = TickInput {
            observer: moved.clone(),
            events: Vec::new(),
            messages: Vec::new(),
        };

        let report = apply_tick(&mut registry, &input).unwrap();
        assert_eq!(report, TickReport { tick: 3, ..TickReport::default() });
        assert_eq!(*registry.observer(), moved);
    }

    #[test]
    fn configured_name_is_filtered() {
        let config = ReconConfig::parse("observer:\n  name: \"team.Lead\"\n").unwrap();
        let mut registry = registry_from_config(&config);
        assert_eq!(registry.observer().name, "team.Lead");

        let routing = registry
            .handle_message(&TeamMessage::Snapshot(Snapshot::new("team.Lead", 0, 1)))
            .unwrap();
        assert_eq!(routing, Routing::SelfFiltered);
    }

    #[test]
    fn tick_input_parses_from_json() {
        let json = r#"{
            "observer": { "name": "Recon", "time": 2, "x": 50.0, "y": 60.0 },
            "events": [
                { "kind": "sighted", "name": "c", "round": 0, "time": 2,
                  "bearing": 0.0, "distance": 10.0, "energy": 90.0,
                  "heading": 0.0, "velocity": 0.0 }
            ]
        }"#;
        let input: TickInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.observer.time, 2);
        assert_eq!(input.events.len(), 1);
        assert!(input.messages.is_empty());

        let mut registry = registry_from_config(&ReconConfig::default());
        let report = apply_tick(&mut registry, &input).unwrap();
        assert_eq!(report.discovered, 1);
        let recent = registry.lookup("c").recent().into_owned();
        assert!((recent.x - 50.0).abs() < 1e-9);
        assert!((recent.y - 70.0).abs() < 1e-9);
    }
}
