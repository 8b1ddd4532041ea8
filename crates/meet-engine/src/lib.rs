//! # meet-engine
//!
//! Location-aware shared free-window computation for academic timetables.
//!
//! Given the weekly lesson tables of several entities (student groups, an
//! instructor), the engine computes the ranges of one day during which
//! every entity is simultaneously out of class AND provably in the same
//! place. Being free at the same minutes is not enough: entities parked
//! at different campuses cannot actually meet in a shared gap, and an
//! entity that is relocating between campuses is not available at all.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use meet_engine::{compare_day, BellSchedule, EntitySchedule, MeetingPlace, ScheduleDocument};
//!
//! // Two groups with no lessons at all can meet anywhere, all day.
//! let a = EntitySchedule { name: "101".into(), document: ScheduleDocument::default() };
//! let b = EntitySchedule { name: "102".into(), document: ScheduleDocument::default() };
//! let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
//!
//! let windows = compare_day(&[a, b], BellSchedule::Standard, date, 60).unwrap();
//! assert_eq!(windows.len(), 1);
//! assert_eq!((windows[0].start, windows[0].end), (540, 1260));
//! assert_eq!(windows[0].place, MeetingPlace::Anywhere);
//! ```
//!
//! ## Modules
//!
//! - [`bells`] — slot number → clock range, three bell-table variants
//! - [`document`] — typed schedule documents at the fetch boundary
//! - [`filter`] — lessons valid on one calendar date
//! - [`busy`] — merged, location-tagged busy intervals
//! - [`timeline`] — gap-free location timelines with transit segments
//! - [`intersect`] — multi-entity window intersection
//! - [`period`] — the day pipeline applied over a date range
//! - [`cache`] — TTL memoization with an injectable clock
//! - [`source`] — cache-fronted fetch boundary
//! - [`error`] — error types

pub mod bells;
pub mod busy;
pub mod cache;
pub mod document;
pub mod error;
pub mod filter;
pub mod intersect;
pub mod period;
pub mod source;
pub mod timeline;

pub use bells::{BellSchedule, DAY_END, DAY_START};
pub use busy::{busy_intervals, BusyInterval};
pub use cache::{Clock, ScheduleCache, SystemClock};
pub use document::{Lesson, ScheduleDocument};
pub use error::EngineError;
pub use filter::{lesson_at, lessons_on, PlannedLesson};
pub use intersect::{
    find_common_windows, free_windows_ignoring_location, EntityDay, FreeWindow, MeetingPlace,
};
pub use period::{compare_day, compare_period, DayWindows, EntitySchedule};
pub use source::{CachedScheduleSource, FetchSchedule, Listing, ScheduleQuery};
pub use timeline::{Location, Segment, Timeline};
