//! Per-robot snapshot timeline.
//!
//! A [`Timeline`] stores every snapshot recorded for one robot, partitioned
//! by round and kept sorted by tick inside each round. The round that was
//! most recently inserted into is the *current* round; its last frame is the
//! robot's *recent* snapshot.
//!
//! Insertion is the only mutation. Each insertion also checks the new frame
//! against its predecessor with [`FireRules`] and notifies the timeline's
//! fired listeners when the pair looks like a shot.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use recon_types::{FiredEvent, ListenerId, Listeners, RoundId, Snapshot, Tick};
use tracing::debug;

use crate::error::TimelineError;
use crate::movie::Movie;
use crate::rules::FireRules;
use crate::search::{nearest_index, start_index};

/// Time-ordered, round-partitioned snapshots of a single robot.
#[derive(Debug)]
pub struct Timeline {
    /// Name of the robot. Fixed at construction.
    name: String,

    /// Snapshot sequences keyed by round, each strictly increasing by time.
    rounds: BTreeMap<RoundId, Vec<Snapshot>>,

    /// Round most recently inserted into.
    current: Option<RoundId>,

    /// Thresholds for shot detection.
    rules: FireRules,

    /// Callbacks for inferred shots.
    fired: Listeners<FiredEvent>,
}

impl Timeline {
    /// Create an empty timeline for the robot `name`.
    pub fn new(name: impl Into<String>, rules: FireRules) -> Self {
        Self {
            name: name.into(),
            rounds: BTreeMap::new(),
            current: None,
            rules,
            fired: Listeners::new(),
        }
    }

    /// Create a timeline whose first snapshot is `first`.
    ///
    /// The timeline takes its name from the snapshot.
    pub fn from_snapshot(first: Snapshot, rules: FireRules) -> Self {
        let mut timeline = Self::new(first.name.clone(), rules);
        timeline.push_new_round(first);
        timeline
    }

    /// Build an independent copy of `source` by replaying every round.
    ///
    /// The copy ends on the same current round as `source`, so its recent
    /// snapshot is equal to the source's. Fired listeners are not copied.
    pub fn replicate(source: &Self) -> Self {
        let mut copy = Self::new(source.name.clone(), source.rules);
        for round in source.round_ids() {
            let frames: Vec<Snapshot> = source.movie_in(0, round).cloned().collect();
            copy.rounds.insert(round, frames);
        }
        copy.current = source.current;
        copy
    }

    /// Name of the robot this timeline tracks.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shot-detection thresholds in use.
    pub const fn rules(&self) -> &FireRules {
        &self.rules
    }

    /// Add a snapshot.
    ///
    /// Returns `Ok(false)` without changing anything if the snapshot's round
    /// already has a frame at the same tick.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::NameMismatch`] if the snapshot belongs to a
    /// different robot.
    pub fn insert(&mut self, snapshot: Snapshot) -> Result<bool, TimelineError> {
        if snapshot.name != self.name {
            return Err(TimelineError::NameMismatch {
                timeline: self.name.clone(),
                snapshot: snapshot.name,
            });
        }

        let round = snapshot.round;
        let time = snapshot.time;
        let frames = self.rounds.entry(round).or_default();

        let before = nearest_index(frames, time);
        let occupied = before
            .and_then(|index| frames.get(index))
            .is_some_and(|frame| frame.time == time);
        if occupied {
            debug!(robot = %self.name, round, time, "duplicate snapshot rejected");
            return Ok(false);
        }

        let position = before.map_or(0, |index| index.saturating_add(1));
        frames.insert(position, snapshot);
        self.current = Some(round);

        let shot = before
            .and_then(|index| frames.get(index).zip(frames.get(position)))
            .and_then(|(prev, curr)| {
                self.rules.detect(prev, curr).map(|power| FiredEvent {
                    snapshot: prev.clone(),
                    power,
                })
            });

        if let Some(event) = shot {
            debug!(
                robot = %self.name,
                round,
                time = event.time(),
                power = event.power,
                "inferred shot"
            );
            self.fired.notify(&event);
        }

        Ok(true)
    }

    /// Most recent snapshot: the last frame of the current round.
    ///
    /// Blank if nothing has been inserted.
    pub fn recent(&self) -> Cow<'_, Snapshot> {
        self.current_frames()
            .and_then(<[Snapshot]>::last)
            .map_or_else(|| Cow::Owned(Snapshot::blank()), Cow::Borrowed)
    }

    /// Snapshot that was current at `time` in the current round.
    ///
    /// See [`snapshot_in`](Self::snapshot_in) for how gaps are resolved.
    pub fn snapshot_at(&self, time: Tick) -> Cow<'_, Snapshot> {
        lookup(self.current_frames(), time)
    }

    /// Snapshot that was current at `time` in `round`.
    ///
    /// Returns the last frame not later than `time`. A time before the first
    /// frame returns the first frame. An unknown round returns the blank
    /// snapshot.
    pub fn snapshot_in(&self, time: Tick, round: RoundId) -> Cow<'_, Snapshot> {
        lookup(self.round_frames(round), time)
    }

    /// Movie over the current round, positioned at its first frame.
    pub fn movie(&self) -> Movie<'_> {
        self.movie_at(0)
    }

    /// Movie over the current round whose first frame is the earliest frame
    /// at or after `time`.
    pub fn movie_at(&self, time: Tick) -> Movie<'_> {
        play(self.current_frames(), time)
    }

    /// Movie over `round` whose first frame is the earliest frame at or after
    /// `time`. Empty if the round has no frames.
    pub fn movie_in(&self, time: Tick, round: RoundId) -> Movie<'_> {
        play(self.round_frames(round), time)
    }

    /// Every round that has at least one snapshot.
    pub fn round_ids(&self) -> BTreeSet<RoundId> {
        self.rounds
            .iter()
            .filter(|(_, frames)| !frames.is_empty())
            .map(|(round, _)| *round)
            .collect()
    }

    /// Round most recently inserted into, if any.
    pub const fn current_round(&self) -> Option<RoundId> {
        self.current
    }

    /// Total number of snapshots across all rounds.
    pub fn len(&self) -> usize {
        self.rounds.values().map(Vec::len).sum()
    }

    /// Whether no snapshot has been recorded.
    pub fn is_empty(&self) -> bool {
        self.rounds.values().all(Vec::is_empty)
    }

    /// Register a callback for inferred shots.
    pub fn on_fired(&mut self, listener: impl FnMut(&FiredEvent) + 'static) -> ListenerId {
        self.fired.add(listener)
    }

    /// Remove a shot callback. Returns `false` if the handle is unknown.
    pub fn remove_fired_listener(&mut self, id: ListenerId) -> bool {
        self.fired.remove(id)
    }

    /// Number of registered shot callbacks.
    pub fn fired_listener_count(&self) -> usize {
        self.fired.len()
    }

    fn current_frames(&self) -> Option<&[Snapshot]> {
        self.current.and_then(|round| self.round_frames(round))
    }

    fn round_frames(&self, round: RoundId) -> Option<&[Snapshot]> {
        self.rounds.get(&round).map(Vec::as_slice)
    }

    fn push_new_round(&mut self, first: Snapshot) {
        let round = first.round;
        self.rounds.insert(round, vec![first]);
        self.current = Some(round);
    }
}

/// Timelines compare by name and recorded data. Listeners are ignored.
impl PartialEq for Timeline {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.current == other.current
            && self.round_ids() == other.round_ids()
            && self
                .round_ids()
                .into_iter()
                .all(|round| self.round_frames(round) == other.round_frames(round))
    }
}

fn lookup(frames: Option<&[Snapshot]>, time: Tick) -> Cow<'_, Snapshot> {
    let Some(frames) = frames else {
        return Cow::Owned(Snapshot::blank());
    };
    let index = nearest_index(frames, time).unwrap_or(0);
    frames
        .get(index)
        .map_or_else(|| Cow::Owned(Snapshot::blank()), Cow::Borrowed)
}

fn play(frames: Option<&[Snapshot]>, time: Tick) -> Movie<'_> {
    frames.map_or_else(Movie::empty, |frames| {
        Movie::new(frames, start_index(frames, time))
    })
}
