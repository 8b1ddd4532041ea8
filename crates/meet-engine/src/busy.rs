//! Busy-interval construction — planned lessons to merged, location-tagged
//! intervals in minutes of day.
//!
//! Sorts lessons by resolved start time and merges adjacent-or-overlapping
//! intervals, but only when their location strings are exactly equal: two
//! back-to-back lessons on different campuses stay separate so the
//! timeline builder can insert a relocation segment between them.

use tracing::warn;

use crate::bells::BellSchedule;
use crate::filter::PlannedLesson;

/// A continuous period during which an entity has a lesson.
///
/// `end > start` always holds. The location is the raw campus/building
/// label; empty when the source recorded none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: u16,
    pub end: u16,
    pub location: String,
}

/// Convert planned lessons into sorted, merged busy intervals.
///
/// Lessons whose slot has no mapping in the bell table cannot be placed in
/// time; they are dropped with a warning rather than failing the run.
/// Two intervals merge only when they are adjacent-or-overlapping AND
/// carry exactly equal location strings (empty equals empty, empty never
/// equals non-empty); the merged end is the max of the two ends.
pub fn busy_intervals(lessons: &[PlannedLesson], bells: BellSchedule) -> Vec<BusyInterval> {
    let mut intervals: Vec<BusyInterval> = Vec::with_capacity(lessons.len());
    for planned in lessons {
        let Some(time) = bells.slot_time(planned.slot) else {
            warn!(
                slot = planned.slot,
                subject = %planned.lesson.subject,
                "slot has no bell mapping, lesson excluded from busy intervals"
            );
            continue;
        };
        intervals.push(BusyInterval {
            start: time.start,
            end: time.end,
            location: planned.lesson.location_or_empty().to_string(),
        });
    }

    // Sort by start (then end, then location, for stability).
    intervals.sort_by(|a, b| {
        (a.start, a.end, &a.location).cmp(&(b.start, b.end, &b.location))
    });

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(intervals.len());
    for current in intervals {
        if let Some(last) = merged.last_mut() {
            if current.start <= last.end && current.location == last.location {
                last.end = last.end.max(current.end);
                continue;
            }
        }
        merged.push(current);
    }
    merged
}
