//! Bidirectional playback over one round of a timeline.
//!
//! A [`Movie`] is a cursor that sits *between* frames, like a list iterator:
//! [`Movie::next`] yields the frame after the cursor and moves forward,
//! [`Movie::previous`] yields the frame before it and moves back. The cursor
//! never leaves `0..=len`, so a movie is always finite.

use recon_types::Snapshot;

/// Cursor over a time-ordered snapshot sequence.
#[derive(Debug, Clone)]
pub struct Movie<'a> {
    frames: &'a [Snapshot],
    start: usize,
    cursor: usize,
}

impl<'a> Movie<'a> {
    /// Create a movie positioned before `frames[start]`.
    ///
    /// `start` is clamped to `frames.len()`.
    pub fn new(frames: &'a [Snapshot], start: usize) -> Self {
        let start = start.min(frames.len());
        Self {
            frames,
            start,
            cursor: start,
        }
    }

    /// A movie with no frames.
    pub const fn empty() -> Self {
        Self {
            frames: &[],
            start: 0,
            cursor: 0,
        }
    }

    /// Whether a call to [`next`](Iterator::next) would yield a frame.
    pub const fn has_next(&self) -> bool {
        self.cursor < self.frames.len()
    }

    /// Whether a call to [`previous`](Self::previous) would yield a frame.
    pub const fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Index of the frame [`next`](Iterator::next) would yield.
    ///
    /// Equal to the number of frames when the movie is exhausted.
    pub const fn next_index(&self) -> usize {
        self.cursor
    }

    /// Index of the frame [`previous`](Self::previous) would yield.
    pub const fn previous_index(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    /// The frame [`next`](Iterator::next) would yield, without moving.
    pub fn peek(&self) -> Option<&'a Snapshot> {
        self.frames.get(self.cursor)
    }

    /// Step back one frame and return it.
    pub fn previous(&mut self) -> Option<&'a Snapshot> {
        let index = self.cursor.checked_sub(1)?;
        let frame = self.frames.get(index)?;
        self.cursor = index;
        Some(frame)
    }

    /// Return the cursor to where the movie started.
    pub const fn restart(&mut self) {
        self.cursor = self.start;
    }

    /// Total number of frames in the underlying round, regardless of cursor.
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl<'a> Iterator for Movie<'a> {
    type Item = &'a Snapshot;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frames.get(self.cursor)?;
        self.cursor = self.cursor.saturating_add(1);
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frames.len().saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Movie<'_> {}

impl Default for Movie<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(times: &[u64]) -> Vec<Snapshot> {
        times.iter().map(|&t| Snapshot::new("Target", 0, t)).collect()
    }

    fn times<'a>(movie: impl Iterator<Item = &'a Snapshot>) -> Vec<u64> {
        movie.map(|s| s.time).collect()
    }

    #[test]
    fn plays_forward_from_start() {
        let seq = frames(&[1, 2, 3, 4]);
        let movie = Movie::new(&seq, 1);
        assert_eq!(movie.len(), 3);
        assert_eq!(times(movie), vec![2, 3, 4]);
    }

    #[test]
    fn plays_backward() {
        let seq = frames(&[1, 2, 3]);
        let mut movie = Movie::new(&seq, 3);
        assert!(!movie.has_next());
        assert_eq!(movie.previous().map(|s| s.time), Some(3));
        assert_eq!(movie.previous().map(|s| s.time), Some(2));
        assert_eq!(movie.previous().map(|s| s.time), Some(1));
        assert!(movie.previous().is_none());
        assert!(!movie.has_previous());
        assert_eq!(movie.next().map(|s| s.time), Some(1));
    }

    #[test]
    fn next_then_previous_returns_same_frame() {
        let seq = frames(&[5, 6, 7]);
        let mut movie = Movie::new(&seq, 0);
        let forward = movie.next().map(|s| s.time);
        let backward = movie.previous().map(|s| s.time);
        assert_eq!(forward, backward);
        assert_eq!(movie.next_index(), 0);
        assert_eq!(movie.previous_index(), None);
    }

    #[test]
    fn restart_returns_to_original_position() {
        let seq = frames(&[10, 20, 30, 40]);
        let mut movie = Movie::new(&seq, 2);
        assert_eq!(times(movie.by_ref()), vec![30, 40]);
        assert!(!movie.has_next());
        movie.restart();
        assert_eq!(movie.peek().map(|s| s.time), Some(30));
        assert_eq!(movie.next_index(), 2);
        assert_eq!(movie.previous_index(), Some(1));
    }

    #[test]
    fn start_beyond_end_is_clamped() {
        let seq = frames(&[1, 2]);
        let mut movie = Movie::new(&seq, 10);
        assert!(movie.next().is_none());
        assert_eq!(movie.next_index(), 2);
        assert_eq!(movie.frame_count(), 2);
    }

    #[test]
    fn empty_movie_is_exhausted() {
        let mut movie = Movie::empty();
        assert!(!movie.has_next());
        assert!(!movie.has_previous());
        assert!(movie.next().is_none());
        assert!(movie.previous().is_none());
        assert_eq!(Movie::default().len(), 0);
    }
}
