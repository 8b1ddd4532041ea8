//! Day pipeline and its bounded-period form.
//!
//! The single-day pipeline is filter → busy intervals → timelines →
//! intersection. The period form applies it once per date of an inclusive
//! range, each date computed from scratch — nothing carries over between
//! days.

use chrono::NaiveDate;

use crate::bells::BellSchedule;
use crate::busy::busy_intervals;
use crate::document::ScheduleDocument;
use crate::error::{EngineError, Result};
use crate::filter::lessons_on;
use crate::intersect::{find_common_windows, EntityDay, FreeWindow};

/// One compared entity: a display name plus its fetched weekly schedule.
#[derive(Debug, Clone)]
pub struct EntitySchedule {
    pub name: String,
    pub document: ScheduleDocument,
}

/// The accepted windows of one date within a compared period.
#[derive(Debug, Clone, PartialEq)]
pub struct DayWindows {
    pub date: NaiveDate,
    pub windows: Vec<FreeWindow>,
}

/// Run the full single-day pipeline for the given entities and date.
///
/// # Errors
/// [`EngineError::NotEnoughEntities`] when fewer than two entities are
/// supplied.
pub fn compare_day(
    entities: &[EntitySchedule],
    bells: BellSchedule,
    date: NaiveDate,
    min_duration: u16,
) -> Result<Vec<FreeWindow>> {
    if entities.len() < 2 {
        return Err(EngineError::NotEnoughEntities(entities.len()));
    }

    let days: Vec<EntityDay> = entities
        .iter()
        .map(|entity| EntityDay::new(busy_intervals(&lessons_on(&entity.document, date), bells)))
        .collect();
    find_common_windows(&days, min_duration)
}

/// Apply [`compare_day`] to every date of the inclusive range.
///
/// Dates that produce no accepted windows are omitted from the result; an
/// empty result is not an error. The range is expected to be small and
/// caller-validated — an inverted range simply yields nothing.
pub fn compare_period(
    entities: &[EntitySchedule],
    bells: BellSchedule,
    start: NaiveDate,
    end: NaiveDate,
    min_duration: u16,
) -> Result<Vec<DayWindows>> {
    if entities.len() < 2 {
        return Err(EngineError::NotEnoughEntities(entities.len()));
    }

    let mut days = Vec::new();
    let mut date = start;
    while date <= end {
        let windows = compare_day(entities, bells, date, min_duration)?;
        if !windows.is_empty() {
            days.push(DayWindows { date, windows });
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    Ok(days)
}
