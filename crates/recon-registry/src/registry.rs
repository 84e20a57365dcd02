//! Name-keyed registry of robot timelines.
//!
//! The [`Registry`] belongs to one observing robot. It receives everything
//! the observer learns about other robots -- radar sightings, death notices,
//! teammate broadcasts -- and routes each one to the timeline of the robot it
//! describes, creating that timeline on first sighting.
//!
//! # Routing rules
//!
//! - Snapshots of the observer itself are dropped.
//! - A snapshot for a known robot is inserted into its timeline; a repeated
//!   tick is reported as [`Routing::Duplicate`].
//! - A snapshot for an unknown robot creates its timeline and notifies the
//!   discovery listeners.
//! - A death notice for an unknown robot is ignored.
//!
//! Timelines are never removed. A destroyed robot keeps answering queries
//! with its last known state.

use core::cmp::Ordering;
use std::collections::BTreeMap;

use recon_timeline::{FireRules, Timeline};
use recon_types::{
    ListenerId, Listeners, SelfState, SensorEvent, Sighting, Snapshot, TeamMessage, Termination,
};
use tracing::debug;

use crate::error::RegistryError;
use crate::factory::{
    SnapshotFactory, StandardSnapshotFactory, StandardTimelineFactory, TimelineFactory,
};
use crate::view::TimelineView;

/// What happened to a routed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Routing {
    /// A new timeline was created and discovery listeners were notified.
    Discovered,
    /// The snapshot was added to an existing timeline.
    Inserted,
    /// The timeline already had a snapshot at that round and tick.
    Duplicate,
    /// The input described the observer itself and was dropped.
    SelfFiltered,
    /// The input referred to a robot with no timeline and was dropped.
    Ignored,
}

/// Owns and indexes the timelines of every robot an observer has seen.
#[derive(Debug)]
pub struct Registry<S = StandardSnapshotFactory, T = StandardTimelineFactory> {
    /// The observing robot.
    observer: SelfState,

    /// Timelines keyed by robot name.
    timelines: BTreeMap<String, Timeline>,

    /// Callbacks for newly discovered robots.
    discovered: Listeners<Timeline>,

    /// Builds snapshots from raw sensor input.
    snapshots: S,

    /// Builds new timelines and unknown-robot placeholders.
    factory: T,
}

impl Registry {
    /// Create a registry with the standard factories.
    pub fn standard(observer: SelfState, rules: FireRules) -> Self {
        Self::new(
            observer,
            StandardSnapshotFactory::new(),
            StandardTimelineFactory::new(rules),
        )
    }
}

impl<S: SnapshotFactory, T: TimelineFactory> Registry<S, T> {
    /// Create an empty registry for `observer`.
    pub const fn new(observer: SelfState, snapshots: S, factory: T) -> Self {
        Self {
            observer,
            timelines: BTreeMap::new(),
            discovered: Listeners::new(),
            snapshots,
            factory,
        }
    }

    /// The observing robot's current state.
    pub const fn observer(&self) -> &SelfState {
        &self.observer
    }

    /// Replace the observing robot's state, typically once per tick.
    pub fn update_observer(&mut self, observer: SelfState) {
        self.observer = observer;
    }

    /// Route one sensor event.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Timeline`] if a timeline rejects the
    /// resulting snapshot as a contract violation.
    pub fn handle_event(&mut self, event: &SensorEvent) -> Result<Routing, RegistryError> {
        match event {
            SensorEvent::Sighted(sighting) => self.route_sighting(sighting),
            SensorEvent::Terminated(termination) => self.route_termination(termination),
        }
    }

    /// Route one teammate message.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Timeline`] if a timeline rejects the carried
    /// snapshot as a contract violation.
    pub fn handle_message(&mut self, message: &TeamMessage) -> Result<Routing, RegistryError> {
        match message {
            TeamMessage::Snapshot(snapshot) => self.route_observation(snapshot.clone()),
        }
    }

    /// Convert a sighting with the snapshot factory and route the result.
    ///
    /// # Errors
    ///
    /// See [`route_observation`](Self::route_observation).
    pub fn route_sighting(&mut self, sighting: &Sighting) -> Result<Routing, RegistryError> {
        let snapshot = {
            let previous = self.timelines.get(&sighting.name).map(Timeline::recent);
            self.snapshots
                .from_sighting(&self.observer, sighting, previous.as_deref())
        };
        self.route_observation(snapshot)
    }

    /// Route a normalized snapshot to the timeline of the robot it describes.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Timeline`] if the timeline rejects the
    /// snapshot as a contract violation.
    pub fn route_observation(&mut self, snapshot: Snapshot) -> Result<Routing, RegistryError> {
        if snapshot.name == self.observer.name {
            debug!(robot = %snapshot.name, time = snapshot.time, "skipping snapshot of self");
            return Ok(Routing::SelfFiltered);
        }

        if let Some(timeline) = self.timelines.get_mut(&snapshot.name) {
            let routing = if timeline.insert(snapshot)? {
                Routing::Inserted
            } else {
                Routing::Duplicate
            };
            return Ok(routing);
        }

        let name = snapshot.name.clone();
        debug!(robot = %name, round = snapshot.round, time = snapshot.time, "robot discovered");
        let timeline = self.factory.create(snapshot);
        let timeline = self.timelines.entry(name).or_insert(timeline);
        self.discovered.notify(timeline);
        Ok(Routing::Discovered)
    }

    /// Record the destruction of a tracked robot.
    ///
    /// The terminal snapshot is built from the robot's most recent snapshot
    /// and the termination's own fields.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Timeline`] if the timeline rejects the
    /// terminal snapshot as a contract violation.
    pub fn route_termination(&mut self, termination: &Termination) -> Result<Routing, RegistryError> {
        let Some(timeline) = self.timelines.get_mut(&termination.name) else {
            debug!(robot = %termination.name, "termination of unknown robot ignored");
            return Ok(Routing::Ignored);
        };

        let terminal = self.snapshots.terminal(&timeline.recent(), termination);
        if timeline.insert(terminal)? {
            debug!(robot = %termination.name, time = termination.time, "robot terminated");
            Ok(Routing::Inserted)
        } else {
            Ok(Routing::Duplicate)
        }
    }

    /// The timeline of `name`, or an empty placeholder if it is not tracked.
    pub fn lookup(&self, name: &str) -> TimelineView<'_> {
        self.timelines.get(name).map_or_else(
            || TimelineView::Unknown(self.factory.placeholder()),
            TimelineView::Tracked,
        )
    }

    /// Mutable access to a tracked timeline, e.g. to attach fired listeners.
    pub fn timeline_mut(&mut self, name: &str) -> Option<&mut Timeline> {
        self.timelines.get_mut(name)
    }

    /// The "smallest" tracked timeline according to `comparator`.
    ///
    /// Timelines are scanned in name order. The current best is replaced only
    /// when `comparator(best, candidate)` is [`Ordering::Greater`], so ties
    /// keep the earlier timeline. Comparators that want to stick with a
    /// previous choice should build that tolerance in themselves. Returns a
    /// placeholder when nothing is tracked.
    pub fn select_best<F>(&self, mut comparator: F) -> TimelineView<'_>
    where
        F: FnMut(&Timeline, &Timeline) -> Ordering,
    {
        let mut best: Option<&Timeline> = None;
        for candidate in self.timelines.values() {
            best = match best {
                Some(current) if comparator(current, candidate) != Ordering::Greater => {
                    Some(current)
                }
                _ => Some(candidate),
            };
        }
        best.map_or_else(
            || TimelineView::Unknown(self.factory.placeholder()),
            TimelineView::Tracked,
        )
    }

    /// Every tracked timeline, in name order.
    pub fn timelines(&self) -> impl Iterator<Item = &Timeline> {
        self.timelines.values()
    }

    /// Whether `name` has a timeline.
    pub fn contains(&self, name: &str) -> bool {
        self.timelines.contains_key(name)
    }

    /// Number of tracked robots.
    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    /// Whether no robot is tracked.
    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    /// Register a callback for newly discovered robots.
    pub fn on_discovered(&mut self, listener: impl FnMut(&Timeline) + 'static) -> ListenerId {
        self.discovered.add(listener)
    }

    /// Remove a discovery callback. Returns `false` if the handle is unknown.
    pub fn remove_discovered_listener(&mut self, id: ListenerId) -> bool {
        self.discovered.remove(id)
    }
}
