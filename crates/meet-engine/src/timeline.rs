//! Full-day location timelines with relocation segments.
//!
//! A timeline expands one entity's busy intervals into a gap-free cover of
//! the comparison day: where the entity is, minute by minute, including
//! the transit periods between lessons held at different locations. Gaps
//! around a lesson inherit its location — the entity is presumed to arrive
//! ahead of its first lesson and stay put after its last one.

use crate::bells::{DAY_END, DAY_START};
use crate::busy::BusyInterval;

/// Where an entity is during one timeline segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// No lessons at all today — the entity can be anywhere.
    Unconstrained,
    /// Occupied by the schedule, but no location was recorded.
    Unknown,
    /// A concrete campus/building label.
    Known(String),
    /// Relocating between two differing locations; unavailable for
    /// meetings while moving.
    Transit { from: String, to: String },
}

impl Location {
    /// Classify a raw location string: empty means unrecorded.
    pub fn of(raw: &str) -> Self {
        if raw.is_empty() {
            Location::Unknown
        } else {
            Location::Known(raw.to_string())
        }
    }

    /// Whether this label marks a relocation period.
    pub fn is_transit(&self) -> bool {
        matches!(self, Location::Transit { .. })
    }
}

/// One contiguous stretch of the day with a single location label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub start: u16,
    pub end: u16,
    pub label: Location,
}

/// A gap-free, non-overlapping cover of the comparison day for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    /// Build the timeline from merged busy intervals.
    ///
    /// Intervals are clipped to the day window first — evening bell tables
    /// run past 21:00, and minutes outside the window take no part in the
    /// comparison. An entity with no lessons gets a single
    /// [`Location::Unconstrained`] segment; one whose lessons all lack a
    /// location gets a single [`Location::Unknown`] segment.
    pub fn from_busy(busy: &[BusyInterval]) -> Self {
        // Clip to the day window, dropping intervals entirely outside.
        let clipped: Vec<BusyInterval> = busy
            .iter()
            .filter(|iv| iv.start < DAY_END && iv.end > DAY_START)
            .map(|iv| BusyInterval {
                start: iv.start.max(DAY_START),
                end: iv.end.min(DAY_END),
                location: iv.location.clone(),
            })
            .collect();

        if clipped.is_empty() {
            return Self::whole_day(Location::Unconstrained);
        }
        if clipped.iter().all(|iv| iv.location.is_empty()) {
            return Self::whole_day(Location::Unknown);
        }

        // Normalize to a strictly ascending, non-overlapping sequence.
        // Parallel occurrences at the same slot with differing locations
        // overlap here; no precedence between them is defined, so the
        // earliest in sort order claims the timeline.
        let mut occupied: Vec<BusyInterval> = Vec::with_capacity(clipped.len());
        for iv in clipped {
            let start = match occupied.last() {
                Some(prev) => iv.start.max(prev.end),
                None => iv.start,
            };
            if iv.end <= start {
                continue;
            }
            occupied.push(BusyInterval {
                start,
                end: iv.end,
                location: iv.location,
            });
        }

        let mut segments = Vec::with_capacity(occupied.len() * 2 + 1);

        // Lead-in gap: presumed already positioned for the first lesson.
        let first = &occupied[0];
        if DAY_START < first.start {
            segments.push(Segment {
                start: DAY_START,
                end: first.start,
                label: Location::of(&first.location),
            });
        }

        for (i, iv) in occupied.iter().enumerate() {
            segments.push(Segment {
                start: iv.start,
                end: iv.end,
                label: Location::of(&iv.location),
            });
            match occupied.get(i + 1) {
                // Gap to the next lesson: stay put, or relocate when the
                // locations differ.
                Some(next) if iv.end < next.start => {
                    let label = if next.location == iv.location {
                        Location::of(&iv.location)
                    } else {
                        Location::Transit {
                            from: iv.location.clone(),
                            to: next.location.clone(),
                        }
                    };
                    segments.push(Segment {
                        start: iv.end,
                        end: next.start,
                        label,
                    });
                }
                // Back-to-back lessons: no gap to label.
                Some(_) => {}
                // Trailing gap: stay at the last location until day end.
                None => {
                    if iv.end < DAY_END {
                        segments.push(Segment {
                            start: iv.end,
                            end: DAY_END,
                            label: Location::of(&iv.location),
                        });
                    }
                }
            }
        }

        Timeline { segments }
    }

    fn whole_day(label: Location) -> Self {
        Timeline {
            segments: vec![Segment {
                start: DAY_START,
                end: DAY_END,
                label,
            }],
        }
    }

    /// The segments in ascending order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The label of the segment covering all of `[start, end)`, if one
    /// does. Contiguity guarantees at most one such segment.
    pub fn label_covering(&self, start: u16, end: u16) -> Option<&Location> {
        self.segments
            .iter()
            .find(|seg| seg.start <= start && end <= seg.end)
            .map(|seg| &seg.label)
    }

    /// Whether the segments are contiguous, non-overlapping, and exactly
    /// tile the day window.
    pub fn is_contiguous_cover(&self) -> bool {
        let mut cursor = DAY_START;
        for seg in &self.segments {
            if seg.start != cursor || seg.end <= seg.start {
                return false;
            }
            cursor = seg.end;
        }
        cursor == DAY_END
    }
}
