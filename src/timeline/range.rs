//! Half-open time ranges and range sweeps.

use serde::{Deserialize, Serialize};

use super::{Duration, Position};
use crate::{CoreError, CoreResult};

/// A contiguous time range as a half-open interval `[start, end)`.
///
/// The start frame is included, the end frame is not, so adjacent ranges
/// concatenate without overlap or gap. The end must be strictly greater
/// than the start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    start: Position,
    end: Position,
}

impl TimeRange {
    /// Creates a range from start (inclusive) and end (exclusive).
    ///
    /// Fails with `InvalidArgument` when `end <= start`.
    pub fn new(start: Position, end: Position) -> CoreResult<Self> {
        if end <= start {
            return Err(CoreError::invalid(
                "end",
                format!(
                    "end ({}) must be greater than start ({})",
                    end.frames(),
                    start.frames()
                ),
            ));
        }
        Ok(Self { start, end })
    }

    /// Returns the start position.
    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    /// Returns the end position.
    #[must_use]
    pub fn end(&self) -> Position {
        self.end
    }

    /// Returns the range duration (always positive).
    #[must_use]
    pub fn duration(&self) -> Duration {
        // end > start is a constructor invariant
        Duration::from_frames(self.end.frames() - self.start.frames())
    }

    /// Checks whether the position falls inside the range.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Checks whether two ranges share at least one frame.
    ///
    /// Adjacent ranges (one ending where the other begins) do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Checks whether one range ends exactly where the other begins.
    #[must_use]
    pub fn adjacent(&self, other: &TimeRange) -> bool {
        self.end == other.start || other.end == self.start
    }

    /// Returns the overlap region, if any.
    #[must_use]
    pub fn overlap(&self, other: &TimeRange) -> Option<TimeRange> {
        if !self.overlaps(other) {
            return None;
        }
        Some(TimeRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// Alias for [`overlap`](Self::overlap).
    #[must_use]
    pub fn intersection(&self, other: &TimeRange) -> Option<TimeRange> {
        self.overlap(other)
    }

    /// Returns the gap between two ranges, in either order.
    ///
    /// `None` when the ranges overlap or are adjacent.
    #[must_use]
    pub fn gap(&self, other: &TimeRange) -> Option<TimeRange> {
        if self.overlaps(other) || self.adjacent(other) {
            return None;
        }
        let (earlier, later) = if self.end <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        TimeRange::new(earlier.end, later.start).ok()
    }

    /// Returns the union of two contiguous (overlapping or adjacent) ranges.
    ///
    /// `None` when there is a gap between them.
    #[must_use]
    pub fn union(&self, other: &TimeRange) -> Option<TimeRange> {
        if !self.overlaps(other) && !self.adjacent(other) {
            return None;
        }
        Some(TimeRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        })
    }

    /// Returns this range minus another: 0, 1, or 2 remaining pieces.
    #[must_use]
    pub fn difference(&self, other: &TimeRange) -> Vec<TimeRange> {
        if !self.overlaps(other) {
            return vec![*self];
        }
        let mut result = Vec::new();
        if self.start < other.start {
            if let Ok(r) = TimeRange::new(self.start, other.start) {
                result.push(r);
            }
        }
        if self.end > other.end {
            if let Ok(r) = TimeRange::new(other.end, self.end) {
                result.push(r);
            }
        }
        result
    }
}

// =============================================================================
// Range Sweeps
// =============================================================================

/// Sorts by start; when two ranges share a start, the wider one comes first
/// so it absorbs the narrower during the merge sweep.
fn sorted_for_sweep(ranges: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted = ranges.to_vec();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    sorted
}

/// Merges overlapping and adjacent ranges into a minimal covering set.
///
/// O(n log n): sort by start, then one linear sweep.
#[must_use]
pub fn merge_ranges(ranges: &[TimeRange]) -> Vec<TimeRange> {
    let sorted = sorted_for_sweep(ranges);
    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Finds the gaps between the merged coverage of the given ranges.
///
/// Zero-length gaps are omitted; empty input yields empty output.
#[must_use]
pub fn find_gaps(ranges: &[TimeRange]) -> Vec<TimeRange> {
    let merged = merge_ranges(ranges);
    merged
        .windows(2)
        .filter_map(|pair| TimeRange::new(pair[0].end, pair[1].start).ok())
        .collect()
}

/// Total duration covered by the ranges, counting overlaps once.
#[must_use]
pub fn total_coverage(ranges: &[TimeRange]) -> Duration {
    let total: u64 = merge_ranges(ranges)
        .iter()
        .map(|r| r.duration().frames())
        .sum();
    Duration::from_frames(total)
}
