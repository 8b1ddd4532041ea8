//! Tests for multi-entity window intersection.

use meet_engine::{
    busy_intervals, find_common_windows, free_windows_ignoring_location, BellSchedule, EngineError,
    EntityDay, FreeWindow, Lesson, MeetingPlace, PlannedLesson, DAY_END, DAY_START,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Build one entity's day from (slot, location) pairs. An empty location
/// string means the lesson has no recorded location.
fn entity(lessons: &[(u8, &str)]) -> EntityDay {
    let planned: Vec<PlannedLesson> = lessons
        .iter()
        .map(|&(slot, location)| PlannedLesson {
            slot,
            lesson: Lesson {
                subject: format!("subject {slot}"),
                location: (!location.is_empty()).then(|| location.to_string()),
                ..Lesson::default()
            },
        })
        .collect();
    EntityDay::new(busy_intervals(&planned, BellSchedule::Standard))
}

fn free_entity() -> EntityDay {
    entity(&[])
}

fn window(start: u16, end: u16, place: MeetingPlace, participants: usize) -> FreeWindow {
    FreeWindow {
        start,
        end,
        place,
        participants,
    }
}

// ── Entity count contract ───────────────────────────────────────────────────

#[test]
fn fewer_than_two_entities_is_an_invalid_argument() {
    let err = find_common_windows(&[], 0).unwrap_err();
    assert!(matches!(err, EngineError::NotEnoughEntities(0)));

    let err = find_common_windows(&[free_entity()], 0).unwrap_err();
    assert!(matches!(err, EngineError::NotEnoughEntities(1)));
}

// ── Acceptance ──────────────────────────────────────────────────────────────

#[test]
fn two_unconstrained_entities_meet_anywhere_all_day() {
    let windows = find_common_windows(&[free_entity(), free_entity()], 60).unwrap();
    assert_eq!(
        windows,
        vec![window(DAY_START, DAY_END, MeetingPlace::Anywhere, 2)]
    );
}

#[test]
fn participant_count_matches_the_comparison_size() {
    let windows =
        find_common_windows(&[free_entity(), free_entity(), free_entity()], 0).unwrap();
    assert_eq!(windows[0].participants, 3);
}

#[test]
fn shared_location_after_shared_lesson_is_accepted() {
    let a = entity(&[(1, "North Campus")]);
    let b = entity(&[(1, "North Campus")]);

    let windows = find_common_windows(&[a, b], 0).unwrap();
    // The lesson itself is excluded; the rest of the day both entities sit
    // on the north campus.
    assert_eq!(
        windows,
        vec![window(630, DAY_END, MeetingPlace::At("North Campus".into()), 2)]
    );
}

#[test]
fn min_duration_rejects_short_slices() {
    // A free until 10:30, B busy 10:40-12:10: the 10:30-10:40 break is a
    // real shared gap but too short to be a meeting window.
    let a = entity(&[(1, "North Campus")]);
    let b = entity(&[(2, "North Campus")]);

    let with_short = find_common_windows(&[a.clone(), b.clone()], 0).unwrap();
    assert_eq!(
        with_short,
        vec![
            window(630, 640, MeetingPlace::At("North Campus".into()), 2),
            window(730, DAY_END, MeetingPlace::At("North Campus".into()), 2),
        ]
    );

    let with_minimum = find_common_windows(&[a, b], 60).unwrap();
    assert_eq!(
        with_minimum,
        vec![window(730, DAY_END, MeetingPlace::At("North Campus".into()), 2)]
    );
}

#[test]
fn all_unlocated_schedules_agree_on_an_unspecified_place() {
    // Both entities carry lessons without any recorded location. They
    // agree (empty equals empty), so the shared gaps survive, but no
    // concrete place can be named.
    let a = entity(&[(1, "")]);
    let b = entity(&[(2, "")]);

    let windows = find_common_windows(&[a, b], 0).unwrap();
    assert_eq!(
        windows,
        vec![
            window(630, 640, MeetingPlace::Unspecified, 2),
            window(730, DAY_END, MeetingPlace::Unspecified, 2),
        ]
    );
}

// ── Rejection ───────────────────────────────────────────────────────────────

#[test]
fn unconstrained_against_located_is_rejected_all_day() {
    // A is in the gym until 10:30 and implicitly stays there; B has no
    // lessons and could be anywhere. Minute-for-minute both are "free"
    // after 10:30, but co-location cannot be proven, so nothing may be
    // reported.
    let a = entity(&[(1, "Gym")]);
    let b = free_entity();

    let windows = find_common_windows(&[a, b], 0).unwrap();
    assert!(windows.is_empty(), "ambiguous availability must be rejected");
}

#[test]
fn same_slot_at_different_locations_never_appears_in_a_window() {
    let a = entity(&[(3, "North Campus")]);
    let b = entity(&[(3, "South Campus")]);

    let windows = find_common_windows(&[a, b], 0).unwrap();
    // Slot 3 is 12:20-13:50; no window may cover any part of it.
    assert!(windows.iter().all(|w| w.end <= 740 || w.start >= 830));
    // In this construction the entities disagree for the whole day.
    assert!(windows.is_empty());
}

#[test]
fn transit_gaps_are_excluded_even_when_both_entities_share_them() {
    // Both entities move from the north to the south campus across the
    // same lessons; the relocation gap is unavailable despite agreeing.
    let a = entity(&[(1, "North Campus"), (4, "South Campus")]);
    let b = entity(&[(1, "North Campus"), (4, "South Campus")]);

    let windows = find_common_windows(&[a, b], 0).unwrap();
    assert_eq!(
        windows,
        vec![window(960, DAY_END, MeetingPlace::At("South Campus".into()), 2)]
    );
}

#[test]
fn unknown_against_known_location_is_rejected() {
    let a = entity(&[(1, "")]);
    let b = entity(&[(1, "North Campus")]);

    let windows = find_common_windows(&[a, b], 0).unwrap();
    assert!(windows.is_empty());
}

#[test]
fn a_lesson_overrides_any_agreeable_labels() {
    // B's second lesson sits inside what would otherwise be a shared
    // north-campus window.
    let a = entity(&[(1, "North Campus")]);
    let b = entity(&[(1, "North Campus"), (3, "North Campus")]);

    let windows = find_common_windows(&[a, b], 0).unwrap();
    assert_eq!(
        windows,
        vec![
            window(630, 740, MeetingPlace::At("North Campus".into()), 2),
            window(830, DAY_END, MeetingPlace::At("North Campus".into()), 2),
        ]
    );
}

// ── Determinism ─────────────────────────────────────────────────────────────

#[test]
fn identical_input_yields_identical_output() {
    let build = || {
        vec![
            entity(&[(1, "North Campus"), (4, "South Campus")]),
            entity(&[(2, "North Campus")]),
            entity(&[(3, "")]),
        ]
    };

    let first = find_common_windows(&build(), 30).unwrap();
    let second = find_common_windows(&build(), 30).unwrap();
    assert_eq!(first, second);
}

// ── Location-blind variant ──────────────────────────────────────────────────

#[test]
fn ignoring_location_reports_plain_gaps() {
    let a = entity(&[(1, "North Campus")]);
    let b = entity(&[(4, "South Campus")]);

    let windows = free_windows_ignoring_location(&[a, b], 60).unwrap();
    assert_eq!(
        windows,
        vec![
            window(630, 870, MeetingPlace::Anywhere, 2),
            window(960, DAY_END, MeetingPlace::Anywhere, 2),
        ]
    );
}

#[test]
fn ignoring_location_still_applies_min_duration() {
    let a = entity(&[(1, "North Campus")]);
    let b = entity(&[(2, "South Campus")]);

    // Gaps: 10:30-10:40 (10 min) and 12:10-21:00 (530 min).
    let windows = free_windows_ignoring_location(&[a, b], 60).unwrap();
    assert_eq!(
        windows,
        vec![window(730, DAY_END, MeetingPlace::Anywhere, 2)]
    );
}

#[test]
fn ignoring_location_requires_two_entities_too() {
    let err = free_windows_ignoring_location(&[free_entity()], 0).unwrap_err();
    assert!(matches!(err, EngineError::NotEnoughEntities(1)));
}
