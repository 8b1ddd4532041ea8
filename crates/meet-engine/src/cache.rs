//! TTL schedule cache with an injectable clock.
//!
//! A process-lifetime memo in front of the slow upstream fetch. Entries
//! expire lazily on lookup; `clear` is invoked by an external daily
//! maintenance job, not by the engine itself. There is no size-based
//! eviction: the key space is bounded by the small set of distinct
//! queries actually made, so TTL-only retention is an accepted tradeoff.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Cache TTL for fetched weekly schedules.
pub const SCHEDULE_TTL_HOURS: i64 = 24;
/// Cache TTL for directory listings (group/teacher catalogs).
pub const DIRECTORY_TTL_HOURS: i64 = 168;

/// A time source. Injectable so TTL expiry is testable without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct Entry {
    value: Value,
    expires_at: DateTime<Utc>,
}

/// TTL-keyed store for raw fetched payloads.
///
/// All operations serialize on a single interior mutex; contention is
/// expected to be light.
pub struct ScheduleCache<C = SystemClock> {
    entries: Mutex<HashMap<String, Entry>>,
    clock: C,
}

impl ScheduleCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ScheduleCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ScheduleCache<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Look up a key. An expired entry is evicted and reported as a miss.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some(entry) if self.clock.now() < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value for `ttl_hours`.
    pub fn set(&self, key: &str, value: Value, ttl_hours: i64) {
        let expires_at = self.clock.now() + Duration::hours(ttl_hours);
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .insert(key.to_string(), Entry { value, expires_at });
    }

    /// Drop one key, used when a cached value turns out to be corrupt.
    pub fn evict(&self, key: &str) {
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .remove(key);
    }

    /// Drop every entry. Run by the external daily maintenance job.
    pub fn clear(&self) {
        self.entries.lock().expect("cache mutex poisoned").clear();
    }
}
