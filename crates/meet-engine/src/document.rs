//! Typed schedule documents at the fetch boundary.
//!
//! The upstream source delivers loosely-shaped JSON. It is deserialized
//! into these strict records once, at the boundary — the algorithmic core
//! never touches an untyped map.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// A single lesson occurrence as delivered by the schedule source.
///
/// Immutable after fetch; owned by the document it arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub subject: String,
    /// Lesson kind (lecture, seminar, lab). Optional in the source data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub teachers: Vec<String>,
    #[serde(default)]
    pub rooms: Vec<String>,
    /// Campus/building label. May be absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Remote-lesson URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Validity window bounds, inclusive, as raw `YYYY-MM-DD` strings.
    /// Kept raw so one malformed value degrades to "always valid" at
    /// filter time instead of failing document deserialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Lesson {
    /// The recorded location, with absent collapsing to the empty string.
    pub fn location_or_empty(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    /// Whether the lesson is held remotely (its link carries a URL).
    pub fn is_remote(&self) -> bool {
        self.link
            .as_deref()
            .is_some_and(|link| link.contains("http://") || link.contains("https://"))
    }
}

/// Slot number → parallel lesson occurrences for one weekday.
///
/// The value is a list, not a single lesson: biweekly and sub-group
/// sessions share a slot.
pub type DaySlots = BTreeMap<u8, Vec<Lesson>>;

/// A full weekly schedule: the seven fixed lowercase weekday names, each
/// mapping slot numbers to the occurrences sharing that slot.
///
/// `BTreeMap` keys keep iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleDocument {
    pub days: BTreeMap<String, DaySlots>,
}

impl ScheduleDocument {
    /// The slot table for a weekday, if the document has one.
    pub fn day(&self, weekday: Weekday) -> Option<&DaySlots> {
        self.days.get(weekday_key(weekday))
    }
}

/// The lowercase weekday name used as a document key.
pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
