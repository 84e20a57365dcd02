//! Feeding a recorded battle log through a registry.
//!
//! A battle log is JSON Lines: one [`TickInput`] per line, in tick order.
//! Blank lines are skipped.

use std::io::BufRead;

use recon_core::{TickInput, TickReport, apply_tick};
use recon_registry::{Registry, SnapshotFactory, TimelineFactory};

use crate::error::ReplayError;

/// Routing outcomes summed over a whole replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayTotals {
    /// Tick records applied.
    pub ticks: u64,
    /// Inputs that created a new timeline.
    pub discovered: u32,
    /// Inputs added to an existing timeline.
    pub inserted: u32,
    /// Inputs dropped as already recorded.
    pub duplicate: u32,
    /// Inputs describing the observer itself.
    pub self_filtered: u32,
    /// Inputs about robots with no timeline.
    pub ignored: u32,
}

impl ReplayTotals {
    /// Fold one tick's report into the totals.
    pub const fn add(&mut self, report: &TickReport) {
        self.ticks = self.ticks.saturating_add(1);
        self.discovered = self.discovered.saturating_add(report.discovered);
        self.inserted = self.inserted.saturating_add(report.inserted);
        self.duplicate = self.duplicate.saturating_add(report.duplicate);
        self.self_filtered = self.self_filtered.saturating_add(report.self_filtered);
        self.ignored = self.ignored.saturating_add(report.ignored);
    }
}

/// Apply every tick record read from `reader` to `registry`.
///
/// Stops at the first bad line; ticks before it stay applied.
pub fn replay<S, T, R>(
    registry: &mut Registry<S, T>,
    reader: R,
) -> Result<ReplayTotals, ReplayError>
where
    S: SnapshotFactory,
    T: TimelineFactory,
    R: BufRead,
{
    let mut totals = ReplayTotals::default();

    for (line, text) in (1_usize..).zip(reader.lines()) {
        let text = text.map_err(|source| ReplayError::Read { line, source })?;
        if text.trim().is_empty() {
            continue;
        }

        let input: TickInput =
            serde_json::from_str(&text).map_err(|source| ReplayError::Parse { line, source })?;
        let report =
            apply_tick(registry, &input).map_err(|source| ReplayError::Route { line, source })?;
        totals.add(&report);
    }

    Ok(totals)
}

/// One human-readable line per tracked robot, in name order.
pub fn summary_lines<S, T>(registry: &Registry<S, T>) -> Vec<String>
where
    S: SnapshotFactory,
    T: TimelineFactory,
{
    registry
        .timelines()
        .map(|timeline| {
            let recent = timeline.recent();
            format!(
                "{}: {} snapshots over rounds {:?}; last seen round {} tick {} at ({:.1}, {:.1}) with {:.1} energy",
                timeline.name(),
                timeline.len(),
                timeline.round_ids(),
                recent.round,
                recent.time,
                recent.x,
                recent.y,
                recent.energy,
            )
        })
        .collect()
}
