//! Bell-schedule lookup — slot numbers to clock-time ranges.
//!
//! Three fixed bell tables exist; they differ only in slots 6 and 7, which
//! modified academic calendars push into the evening. A slot with no entry
//! in the table yields `None`, never an error: a lesson that cannot be
//! placed in time is excluded from computation by the caller.

use serde::{Deserialize, Serialize};

/// Start of the comparison day, 09:00, in minutes of day.
pub const DAY_START: u16 = 540;
/// End of the comparison day, 21:00, in minutes of day (exclusive).
pub const DAY_END: u16 = 1260;

/// One of the three named slot → clock-time tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BellSchedule {
    /// Wire code "0" — the regular table.
    #[default]
    Standard,
    /// Wire code "1" — slots 6-7 start later and shrink to 80 minutes.
    EveningShort,
    /// Wire code "2" — slots 6-7 pushed latest, full-length lessons.
    EveningLate,
}

impl BellSchedule {
    /// Parse the code used by the schedule source ("0", "1", "2").
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(BellSchedule::Standard),
            "1" => Some(BellSchedule::EveningShort),
            "2" => Some(BellSchedule::EveningLate),
            _ => None,
        }
    }

    /// Clock range for a slot number, or `None` when the slot has no
    /// mapping in this table.
    pub fn slot_time(self, slot: u8) -> Option<SlotTime> {
        use BellSchedule::*;
        let (start, end) = match (self, slot) {
            (_, 1) => (540, 630),               // 09:00-10:30
            (_, 2) => (640, 730),               // 10:40-12:10
            (_, 3) => (740, 830),               // 12:20-13:50
            (_, 4) => (870, 960),               // 14:30-16:00
            (_, 5) => (970, 1060),              // 16:10-17:40
            (Standard, 6) => (1070, 1160),      // 17:50-19:20
            (Standard, 7) => (1170, 1260),      // 19:30-21:00
            (EveningShort, 6) => (1100, 1180),  // 18:20-19:40
            (EveningShort, 7) => (1190, 1270),  // 19:50-21:10
            (EveningLate, 6) => (1110, 1200),   // 18:30-20:00
            (EveningLate, 7) => (1210, 1300),   // 20:10-21:40
            _ => return None,
        };
        Some(SlotTime { start, end })
    }
}

/// A slot's clock range in minutes of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTime {
    pub start: u16,
    pub end: u16,
}

/// Format minutes of day as "HH:MM".
pub fn clock(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse "HH:MM" into minutes of day.
pub fn parse_clock(raw: &str) -> Option<u16> {
    let (hours, minutes) = raw.split_once(':')?;
    let hours: u16 = hours.parse().ok()?;
    let minutes: u16 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}
