//! `meet` CLI — compare academic timetables and find shared free windows.
//!
//! Schedule documents are JSON files in the upstream week format (weekday
//! name → slot number → lesson list); the files stand in for the network
//! fetch collaborator.
//!
//! ## Usage
//!
//! ```sh
//! # One group's lessons for a date
//! meet day -s group101.json --date 2026-03-16
//!
//! # What a group is doing at a given moment
//! meet now -s group101.json --date 2026-03-16 --time 12:30
//!
//! # Shared free windows of two groups on one date
//! meet compare -s group101.json -s group102.json --date 2026-03-16 --min-duration 60
//!
//! # The same over an inclusive date range
//! meet period -s group101.json -s group102.json --from 2026-03-16 --to 2026-03-20
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use meet_engine::{
    bells, compare_day, compare_period, free_windows_ignoring_location, lesson_at, lessons_on,
    busy_intervals, BellSchedule, EntityDay, EntitySchedule, FreeWindow, MeetingPlace,
    PlannedLesson, ScheduleDocument,
};

#[derive(Parser)]
#[command(
    name = "meet",
    version,
    about = "Shared free-window finder for academic timetables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one entity's lessons for a date
    Day {
        /// Schedule document (JSON file)
        #[arg(short, long)]
        schedule: String,
        /// Target date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Bell table code (0, 1 or 2)
        #[arg(long, default_value = "0")]
        bells: String,
    },
    /// Show what an entity is doing at a given moment
    Now {
        /// Schedule document (JSON file)
        #[arg(short, long)]
        schedule: String,
        /// Target date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Clock time, HH:MM
        #[arg(long)]
        time: String,
        /// Bell table code (0, 1 or 2)
        #[arg(long, default_value = "0")]
        bells: String,
    },
    /// Find shared free windows for one date
    Compare {
        /// Schedule documents (JSON files), one per entity; at least two
        #[arg(short, long = "schedule", required = true)]
        schedules: Vec<String>,
        /// Target date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Minimum window length in minutes
        #[arg(long, default_value_t = 0)]
        min_duration: u16,
        /// Bell table code (0, 1 or 2)
        #[arg(long, default_value = "0")]
        bells: String,
        /// Ignore locations (remote-meeting mode)
        #[arg(long)]
        any_location: bool,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Find shared free windows over an inclusive date range
    Period {
        /// Schedule documents (JSON files), one per entity; at least two
        #[arg(short, long = "schedule", required = true)]
        schedules: Vec<String>,
        /// First date of the range, YYYY-MM-DD
        #[arg(long)]
        from: NaiveDate,
        /// Last date of the range (inclusive), YYYY-MM-DD
        #[arg(long)]
        to: NaiveDate,
        /// Minimum window length in minutes
        #[arg(long, default_value_t = 0)]
        min_duration: u16,
        /// Bell table code (0, 1 or 2)
        #[arg(long, default_value = "0")]
        bells: String,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// One window as presented to the user: clock strings and the location
/// label, with "Any" standing for the all-unconstrained case.
#[derive(Serialize)]
struct WindowReport {
    start: String,
    end: String,
    duration_minutes: u16,
    place: String,
}

impl From<&FreeWindow> for WindowReport {
    fn from(window: &FreeWindow) -> Self {
        let place = match &window.place {
            MeetingPlace::Anywhere => "Any".to_string(),
            MeetingPlace::At(loc) => loc.clone(),
            MeetingPlace::Unspecified => "unspecified".to_string(),
        };
        WindowReport {
            start: bells::clock(window.start),
            end: bells::clock(window.end),
            duration_minutes: window.duration_minutes(),
            place,
        }
    }
}

#[derive(Serialize)]
struct DayReport {
    date: NaiveDate,
    windows: Vec<WindowReport>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Day {
            schedule,
            date,
            bells,
        } => {
            let entity = load_entity(&schedule)?;
            let bells = parse_bells(&bells)?;
            print_day(&entity, bells, date);
        }
        Commands::Now {
            schedule,
            date,
            time,
            bells,
        } => {
            let entity = load_entity(&schedule)?;
            let bells = parse_bells(&bells)?;
            let minute = bells::parse_clock(&time)
                .with_context(|| format!("invalid clock time: {time} (expected HH:MM)"))?;
            print_now(&entity, bells, date, minute);
        }
        Commands::Compare {
            schedules,
            date,
            min_duration,
            bells,
            any_location,
            json,
        } => {
            let entities = load_entities(&schedules)?;
            let bells = parse_bells(&bells)?;
            let windows = if any_location {
                let days: Vec<EntityDay> = entities
                    .iter()
                    .map(|e| EntityDay::new(busy_intervals(&lessons_on(&e.document, date), bells)))
                    .collect();
                free_windows_ignoring_location(&days, min_duration)?
            } else {
                compare_day(&entities, bells, date, min_duration)?
            };
            let reports: Vec<WindowReport> = windows.iter().map(WindowReport::from).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print_compare(&entities, date, min_duration, &reports);
            }
        }
        Commands::Period {
            schedules,
            from,
            to,
            min_duration,
            bells,
            json,
        } => {
            let entities = load_entities(&schedules)?;
            let bells = parse_bells(&bells)?;
            let days = compare_period(&entities, bells, from, to, min_duration)?;
            let reports: Vec<DayReport> = days
                .iter()
                .map(|day| DayReport {
                    date: day.date,
                    windows: day.windows.iter().map(WindowReport::from).collect(),
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print_period(&entities, from, to, &reports);
            }
        }
    }

    Ok(())
}

fn load_entity(path: &str) -> Result<EntitySchedule> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schedule file: {path}"))?;
    let document: ScheduleDocument = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse schedule document: {path}"))?;
    let name = std::path::Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(EntitySchedule { name, document })
}

fn load_entities(paths: &[String]) -> Result<Vec<EntitySchedule>> {
    paths.iter().map(|path| load_entity(path)).collect()
}

fn parse_bells(code: &str) -> Result<BellSchedule> {
    BellSchedule::from_code(code)
        .with_context(|| format!("unknown bell table code: {code} (expected 0, 1 or 2)"))
}

fn print_day(entity: &EntitySchedule, bells: BellSchedule, date: NaiveDate) {
    println!("{} ({}) — {}", date, date.format("%A"), entity.name);
    let lessons = lessons_on(&entity.document, date);
    if lessons.is_empty() {
        println!("no lessons");
        return;
    }
    for planned in &lessons {
        println!("{}", lesson_line(planned, bells));
    }
}

/// One lesson as a display line: clock range, subject, kind, teachers,
/// and the room/location or remote link.
fn lesson_line(planned: &PlannedLesson, bells: BellSchedule) -> String {
    let time = match bells.slot_time(planned.slot) {
        Some(time) => format!("{}-{}", bells::clock(time.start), bells::clock(time.end)),
        None => format!("slot {}", planned.slot),
    };
    let lesson = &planned.lesson;

    let mut line = format!("{time}  {}", lesson.subject);
    if let Some(kind) = &lesson.kind {
        line.push_str(&format!(" ({kind})"));
    }
    if !lesson.teachers.is_empty() {
        line.push_str(&format!(" — {}", lesson.teachers.join(", ")));
    }
    if lesson.is_remote() {
        if let Some(link) = &lesson.link {
            line.push_str(&format!(" — online: {link}"));
        }
    } else if !lesson.rooms.is_empty() {
        line.push_str(&format!(" — {}", lesson.rooms.join(", ")));
        if let Some(location) = lesson.location.as_deref().filter(|loc| !loc.is_empty()) {
            line.push_str(&format!(" ({location})"));
        }
    } else if let Some(location) = lesson.location.as_deref().filter(|loc| !loc.is_empty()) {
        line.push_str(&format!(" — {location}"));
    }
    line
}

fn print_now(entity: &EntitySchedule, bells: BellSchedule, date: NaiveDate, minute: u16) {
    let lessons = lessons_on(&entity.document, date);
    if lessons.is_empty() {
        println!("no lessons today");
        return;
    }
    match lesson_at(&lessons, bells, minute) {
        Some(planned) => println!("in class: {}", lesson_line(planned, bells)),
        None => println!("between classes"),
    }
}

fn print_compare(
    entities: &[EntitySchedule],
    date: NaiveDate,
    min_duration: u16,
    reports: &[WindowReport],
) {
    let names: Vec<&str> = entities.iter().map(|e| e.name.as_str()).collect();
    println!("{} ({}) — {}", date, date.format("%A"), names.join(", "));
    if min_duration > 0 {
        println!("minimum window: {min_duration} min");
    }
    if reports.is_empty() {
        println!("no shared free windows");
        return;
    }
    for report in reports {
        println!("{}", window_line(report));
    }
}

fn print_period(
    entities: &[EntitySchedule],
    from: NaiveDate,
    to: NaiveDate,
    reports: &[DayReport],
) {
    let names: Vec<&str> = entities.iter().map(|e| e.name.as_str()).collect();
    println!("{from} to {to} — {}", names.join(", "));
    if reports.is_empty() {
        println!("no shared free windows in the period");
        return;
    }
    for day in reports {
        println!();
        println!("{} ({})", day.date, day.date.format("%A"));
        for report in &day.windows {
            println!("  {}", window_line(report));
        }
    }
}

fn window_line(report: &WindowReport) -> String {
    let place = match report.place.as_str() {
        "Any" => "anywhere".to_string(),
        "unspecified" => "shared schedule, location unrecorded".to_string(),
        loc => format!("at {loc}"),
    };
    format!(
        "{} - {} ({} min) — {place}",
        report.start, report.end, report.duration_minutes
    )
}
