//! Multi-entity window intersection.
//!
//! Slices the day at every timeline boundary and accepts a slice only when
//! every compared entity is out of class, not in transit, and provably in
//! the same place. Ambiguity is rejected: an entity with no lessons at all
//! and an entity pinned to a campus are NOT assumed to be able to meet.

use serde::Serialize;

use crate::bells::{DAY_END, DAY_START};
use crate::busy::BusyInterval;
use crate::error::{EngineError, Result};
use crate::timeline::{Location, Timeline};

/// One entity's day as consumed by the intersector: the genuine lesson
/// intervals plus the location timeline derived from them.
#[derive(Debug, Clone)]
pub struct EntityDay {
    pub busy: Vec<BusyInterval>,
    pub timeline: Timeline,
}

impl EntityDay {
    /// Build from merged busy intervals.
    pub fn new(busy: Vec<BusyInterval>) -> Self {
        let timeline = Timeline::from_busy(&busy);
        Self { busy, timeline }
    }
}

/// Where a shared free window can take place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MeetingPlace {
    /// Every entity is lesson-free all day — any location works.
    Anywhere,
    /// Every entity is at this location.
    At(String),
    /// Every entity is bound to a schedule that records no location; they
    /// agree, but the place itself is not known.
    Unspecified,
}

/// A time range during which every compared entity can meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeWindow {
    pub start: u16,
    pub end: u16,
    pub place: MeetingPlace,
    pub participants: usize,
}

impl FreeWindow {
    pub fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }
}

/// Find the windows during which every entity is simultaneously free and
/// co-located.
///
/// The day is sliced at every timeline segment edge (plus the day bounds)
/// and each slice is judged independently: too short, overlapping a real
/// lesson, covering a transit period, or showing any location
/// disagreement — including an unconstrained entity next to one pinned to
/// a campus — rejects it. Contiguous accepted slices with the same place
/// merge into one window; runs separated by a rejected slice are never
/// stitched together.
///
/// Output is sorted ascending by start and fully deterministic.
///
/// # Errors
/// [`EngineError::NotEnoughEntities`] when fewer than two entities are
/// supplied; checked before any computation.
pub fn find_common_windows(entities: &[EntityDay], min_duration: u16) -> Result<Vec<FreeWindow>> {
    if entities.len() < 2 {
        return Err(EngineError::NotEnoughEntities(entities.len()));
    }

    // Candidate slice boundaries: every segment edge plus the day bounds.
    // Lesson edges are included as well: a timeline that collapsed to a
    // single whole-day segment (lessons without recorded locations) still
    // has to be sliced at its lessons, or the in-class check below would
    // reject the entire day.
    let mut boundaries = vec![DAY_START, DAY_END];
    for entity in entities {
        for seg in entity.timeline.segments() {
            boundaries.push(seg.start);
            boundaries.push(seg.end);
        }
        for iv in &entity.busy {
            if iv.start < DAY_END && iv.end > DAY_START {
                boundaries.push(iv.start.max(DAY_START));
                boundaries.push(iv.end.min(DAY_END));
            }
        }
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut windows: Vec<FreeWindow> = Vec::new();
    for pair in boundaries.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let Some(place) = accept_slice(entities, start, end, min_duration) else {
            continue;
        };
        if let Some(last) = windows.last_mut() {
            if last.end == start && last.place == place {
                last.end = end;
                continue;
            }
        }
        windows.push(FreeWindow {
            start,
            end,
            place,
            participants: entities.len(),
        });
    }
    Ok(windows)
}

/// Judge one candidate slice; `Some(place)` when every entity can meet
/// during it.
fn accept_slice(
    entities: &[EntityDay],
    start: u16,
    end: u16,
    min_duration: u16,
) -> Option<MeetingPlace> {
    if end - start < min_duration {
        return None;
    }

    // A real lesson anywhere in the slice excludes it, whatever the
    // timeline labels say.
    let in_class = entities
        .iter()
        .any(|e| e.busy.iter().any(|iv| iv.start < end && iv.end > start));
    if in_class {
        return None;
    }

    // The contiguity invariant guarantees exactly one covering segment
    // per entity.
    let mut labels = Vec::with_capacity(entities.len());
    for entity in entities {
        labels.push(entity.timeline.label_covering(start, end)?);
    }

    if labels.iter().any(|label| label.is_transit()) {
        return None;
    }
    if labels.iter().all(|label| **label == Location::Unconstrained) {
        return Some(MeetingPlace::Anywhere);
    }
    // Every label must be the same non-transit location value. A mix of
    // unconstrained and a concrete location is a disagreement: shared
    // availability requires provable co-location.
    let first = labels[0];
    if labels.iter().all(|label| *label == first) {
        return match first {
            Location::Known(loc) => Some(MeetingPlace::At(loc.clone())),
            Location::Unknown => Some(MeetingPlace::Unspecified),
            _ => None,
        };
    }
    None
}

/// Free gaps shared by all entities when location is ignored.
///
/// The simplified comparison for meetings where co-location does not
/// matter (remote calls): every entity's lessons are merged into one busy
/// list and the gaps between merged periods, clipped to the day window,
/// are returned. Transit periods and location disagreement do not exist
/// in this mode, so every window is reported as [`MeetingPlace::Anywhere`].
pub fn free_windows_ignoring_location(
    entities: &[EntityDay],
    min_duration: u16,
) -> Result<Vec<FreeWindow>> {
    if entities.len() < 2 {
        return Err(EngineError::NotEnoughEntities(entities.len()));
    }

    // Collect every entity's lessons clipped to the window, discarding
    // intervals entirely outside.
    let mut intervals: Vec<(u16, u16)> = entities
        .iter()
        .flat_map(|e| e.busy.iter())
        .filter(|iv| iv.start < DAY_END && iv.end > DAY_START)
        .map(|iv| (iv.start.max(DAY_START), iv.end.min(DAY_END)))
        .collect();
    intervals.sort_unstable();

    // Merge overlapping or adjacent busy periods.
    let mut merged: Vec<(u16, u16)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    // Walk the gaps between merged periods.
    let mut windows = Vec::new();
    let mut cursor = DAY_START;
    for (busy_start, busy_end) in merged {
        if cursor < busy_start && busy_start - cursor >= min_duration {
            windows.push(FreeWindow {
                start: cursor,
                end: busy_start,
                place: MeetingPlace::Anywhere,
                participants: entities.len(),
            });
        }
        cursor = cursor.max(busy_end);
    }
    if cursor < DAY_END && DAY_END - cursor >= min_duration {
        windows.push(FreeWindow {
            start: cursor,
            end: DAY_END,
            place: MeetingPlace::Anywhere,
            participants: entities.len(),
        });
    }
    Ok(windows)
}
