//! Nearest-tick search over a time-ordered snapshot sequence.
//!
//! [`nearest_index`] answers "which frame was current at tick `t`": the last
//! frame whose time is not after `t`. Both insertion and every query path go
//! through it, and the movie start position is derived from it:
//!
//! - If a frame exists at exactly `t`, the frame right after
//!   `nearest_index(t - 1)` is that frame.
//! - Otherwise the frame right after `nearest_index(t - 1)` is the first
//!   frame later than `t`.
//!
//! Sequences are strictly increasing by time, so a binary partition gives the
//! answer directly.

use recon_types::{Snapshot, Tick};

/// Index of the last frame with `time <= target`, or `None` when `frames` is
/// empty or every frame is later than `target`.
pub fn nearest_index(frames: &[Snapshot], target: Tick) -> Option<usize> {
    frames
        .partition_point(|frame| frame.time <= target)
        .checked_sub(1)
}

/// Index of the first frame a movie starting at `target` should yield.
///
/// Equal to `frames.len()` when every frame is earlier than `target`.
pub fn start_index(frames: &[Snapshot], target: Tick) -> usize {
    let Some(before) = target.checked_sub(1) else {
        return 0;
    };
    nearest_index(frames, before)
        .and_then(|index| index.checked_add(1))
        .unwrap_or(0)
        .min(frames.len())
}
