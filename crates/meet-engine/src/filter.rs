//! Date filtering — select the lessons valid on one calendar date.
//!
//! A lesson's validity window is a pair of inclusive `YYYY-MM-DD` bounds.
//! Absent bounds mean the lesson runs all semester. An unparsable bound
//! degrades to "always valid" with a warning — a malformed date in one
//! lesson must never sink the whole computation.

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::bells::BellSchedule;
use crate::document::{Lesson, ScheduleDocument};

/// A lesson occurrence selected for a concrete date, paired with its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLesson {
    pub slot: u8,
    pub lesson: Lesson,
}

/// Lessons valid on `date`, ascending by slot number.
///
/// Multiple occurrences sharing a slot are all retained, in document
/// order — they are parallel sub-group sessions, not duplicates.
pub fn lessons_on(doc: &ScheduleDocument, date: NaiveDate) -> Vec<PlannedLesson> {
    let Some(slots) = doc.day(date.weekday()) else {
        return Vec::new();
    };

    let mut planned = Vec::new();
    // BTreeMap iteration is already slot-ascending.
    for (&slot, occurrences) in slots {
        for lesson in occurrences {
            if runs_on(lesson, date) {
                planned.push(PlannedLesson {
                    slot,
                    lesson: lesson.clone(),
                });
            }
        }
    }
    planned
}

/// The planned lesson (if any) whose bell slot covers `minute`.
///
/// `None` with lessons present means a gap between classes; `None` with an
/// empty list means a lesson-free day.
pub fn lesson_at(lessons: &[PlannedLesson], bells: BellSchedule, minute: u16) -> Option<&PlannedLesson> {
    lessons.iter().find(|planned| {
        bells
            .slot_time(planned.slot)
            .is_some_and(|time| time.start <= minute && minute < time.end)
    })
}

/// Whether the lesson's validity window contains `date`.
///
/// Only lessons carrying both bounds are constrained; the comparison is
/// calendar-date only, not time-aware.
fn runs_on(lesson: &Lesson, date: NaiveDate) -> bool {
    let (Some(start_raw), Some(end_raw)) = (&lesson.start_date, &lesson.end_date) else {
        return true;
    };
    match (parse_day(start_raw), parse_day(end_raw)) {
        (Some(start), Some(end)) => start <= date && date <= end,
        _ => {
            warn!(
                subject = %lesson.subject,
                start = %start_raw,
                end = %end_raw,
                "unparsable lesson validity window, treating as always valid"
            );
            true
        }
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
