//! Tests for the typed document boundary.

use meet_engine::{Lesson, ScheduleDocument};

#[test]
fn deserializes_week_format_with_string_slot_keys() {
    let raw = r#"{
        "monday": {
            "1": [{
                "subject": "Linear Algebra",
                "kind": "lecture",
                "teachers": ["A. Petrov"],
                "rooms": ["201"],
                "location": "North Campus",
                "start_date": "2026-02-01",
                "end_date": "2026-06-30"
            }],
            "3": [
                {"subject": "Physics"},
                {"subject": "Physics Lab", "location": "South Campus"}
            ]
        },
        "friday": {}
    }"#;

    let doc: ScheduleDocument = serde_json::from_str(raw).unwrap();
    assert_eq!(doc.days.len(), 2);

    let monday = &doc.days["monday"];
    assert_eq!(monday[&1].len(), 1);
    assert_eq!(monday[&1][0].subject, "Linear Algebra");
    assert_eq!(monday[&1][0].kind.as_deref(), Some("lecture"));
    assert_eq!(monday[&1][0].location.as_deref(), Some("North Campus"));
    assert_eq!(monday[&1][0].start_date.as_deref(), Some("2026-02-01"));

    // Parallel occurrences share slot 3 — a list, not a single value.
    assert_eq!(monday[&3].len(), 2);
    assert_eq!(monday[&3][0].subject, "Physics");
    assert!(monday[&3][0].teachers.is_empty());
}

#[test]
fn optional_fields_default_when_absent() {
    let lesson: Lesson = serde_json::from_str(r#"{"subject": "History"}"#).unwrap();
    assert!(lesson.kind.is_none());
    assert!(lesson.link.is_none());
    assert!(lesson.teachers.is_empty());
    assert!(lesson.rooms.is_empty());
    assert_eq!(lesson.location_or_empty(), "");
    assert!(!lesson.is_remote());
}

#[test]
fn remote_lesson_detected_by_link_url() {
    let lesson = Lesson {
        link: Some("https://meet.example.edu/algebra".into()),
        ..Lesson::default()
    };
    assert!(lesson.is_remote());

    // A link field without a URL scheme is not a remote lesson.
    let lesson = Lesson {
        link: Some("ask at the dean's office".into()),
        ..Lesson::default()
    };
    assert!(!lesson.is_remote());
}

#[test]
fn unknown_weekday_names_are_kept_but_unreachable() {
    // The source only ever sends the seven lowercase names; anything else
    // simply never matches a date's weekday.
    let raw = r#"{"someday": {"1": [{"subject": "Mystery"}]}}"#;
    let doc: ScheduleDocument = serde_json::from_str(raw).unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    assert!(meet_engine::lessons_on(&doc, date).is_empty());
}
