//! Factories the registry uses to build snapshots and timelines.
//!
//! The registry never constructs either directly. [`SnapshotFactory`] turns
//! raw sensor input into normalized snapshots; [`TimelineFactory`] creates a
//! timeline for a newly seen robot and the placeholder returned for unknown
//! names. The standard implementations cover the host game's conventions.

use core::f64::consts::{PI, TAU};
use core::fmt;
use std::rc::Rc;

use recon_timeline::{FireRules, Timeline};
use recon_types::{FiredEvent, SelfState, Sighting, Snapshot, Termination};

/// Builds normalized snapshots from raw sensor input.
pub trait SnapshotFactory {
    /// Convert a sighting into an absolute snapshot of the seen robot.
    ///
    /// `previous` is the robot's most recent recorded snapshot, if it has a
    /// timeline, and may be used to fill in the deltas.
    fn from_sighting(
        &self,
        observer: &SelfState,
        sighting: &Sighting,
        previous: Option<&Snapshot>,
    ) -> Snapshot;

    /// Build the final snapshot of a destroyed robot.
    ///
    /// `recent` is the robot's most recent snapshot and supplies every field
    /// the termination does not carry.
    fn terminal(&self, recent: &Snapshot, termination: &Termination) -> Snapshot;
}

/// Creates timelines for the registry.
pub trait TimelineFactory {
    /// Create the timeline of a newly discovered robot, seeded with its first
    /// snapshot.
    fn create(&self, first: Snapshot) -> Timeline;

    /// Create the empty stand-in returned for robots that are not tracked.
    fn placeholder(&self) -> Timeline;
}

/// Snapshot factory for the host game's coordinate conventions.
///
/// Headings and bearings are radians clockwise from north, so a robot at
/// absolute bearing `b` and distance `d` sits at `(x + d sin b, y + d cos b)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSnapshotFactory;

impl StandardSnapshotFactory {
    /// Create the factory.
    pub const fn new() -> Self {
        Self
    }
}

impl SnapshotFactory for StandardSnapshotFactory {
    fn from_sighting(
        &self,
        observer: &SelfState,
        sighting: &Sighting,
        previous: Option<&Snapshot>,
    ) -> Snapshot {
        let absolute_bearing = observer.heading + sighting.bearing;
        let x = sighting.distance.mul_add(absolute_bearing.sin(), observer.x);
        let y = sighting.distance.mul_add(absolute_bearing.cos(), observer.y);

        let (delta_energy, delta_heading, delta_velocity) = previous
            .filter(|prev| prev.round == sighting.round && prev.time < sighting.time)
            .map_or((0.0, 0.0, 0.0), |prev| {
                (
                    sighting.energy - prev.energy,
                    relative_angle(sighting.heading - prev.heading),
                    sighting.velocity - prev.velocity,
                )
            });

        Snapshot::new(sighting.name.clone(), sighting.round, sighting.time)
            .with_position(x, y)
            .with_energy(sighting.energy)
            .with_heading(sighting.heading)
            .with_velocity(sighting.velocity)
            .with_deltas(delta_energy, delta_heading, delta_velocity)
    }

    fn terminal(&self, recent: &Snapshot, termination: &Termination) -> Snapshot {
        let (x, y) = termination.position.unwrap_or((recent.x, recent.y));
        let energy = termination.energy.unwrap_or(0.0);

        let (delta_energy, delta_velocity) = if recent.round == termination.round {
            (energy - recent.energy, -recent.velocity)
        } else {
            (0.0, 0.0)
        };

        Snapshot::new(termination.name.clone(), termination.round, termination.time)
            .with_position(x, y)
            .with_energy(energy)
            .with_heading(recent.heading)
            .with_velocity(0.0)
            .with_deltas(delta_energy, 0.0, delta_velocity)
    }
}

/// Normalize an angle in radians to `[-pi, pi)`.
pub fn relative_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

type FiredHook = Rc<dyn Fn(&FiredEvent)>;

/// Timeline factory that applies one set of [`FireRules`] and attaches the
/// same fired hooks to every timeline it creates.
#[derive(Clone, Default)]
pub struct StandardTimelineFactory {
    rules: FireRules,
    hooks: Vec<FiredHook>,
}

impl StandardTimelineFactory {
    /// Create a factory using `rules` for shot detection.
    pub const fn new(rules: FireRules) -> Self {
        Self {
            rules,
            hooks: Vec::new(),
        }
    }

    /// Attach `hook` as a fired listener on every timeline created from now
    /// on.
    #[must_use]
    pub fn with_fired_hook(mut self, hook: impl Fn(&FiredEvent) + 'static) -> Self {
        self.hooks.push(Rc::new(hook));
        self
    }

    /// Shot-detection thresholds given to new timelines.
    pub const fn rules(&self) -> &FireRules {
        &self.rules
    }
}

impl TimelineFactory for StandardTimelineFactory {
    fn create(&self, first: Snapshot) -> Timeline {
        let mut timeline = Timeline::from_snapshot(first, self.rules);
        for hook in &self.hooks {
            let hook = Rc::clone(hook);
            timeline.on_fired(move |event| hook(event));
        }
        timeline
    }

    fn placeholder(&self) -> Timeline {
        Timeline::new(String::new(), self.rules)
    }
}

impl fmt::Debug for StandardTimelineFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardTimelineFactory")
            .field("rules", &self.rules)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
