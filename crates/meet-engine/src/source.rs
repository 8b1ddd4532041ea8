//! The fetch boundary — cache in front of the upstream schedule source.
//!
//! The engine never talks to the network itself. A collaborator implements
//! [`FetchSchedule`]; [`CachedScheduleSource`] memoizes its results and
//! converts raw payloads into typed documents right here, so the
//! algorithmic core only ever sees [`ScheduleDocument`] values.
//!
//! Concurrent misses for the same key each trigger their own fetch; the
//! redundant upstream work of a cache stampede is an accepted
//! inefficiency, not a defect to engineer away.

use serde_json::Value;
use tracing::warn;

use crate::cache::{Clock, ScheduleCache, SystemClock, DIRECTORY_TTL_HOURS, SCHEDULE_TTL_HOURS};
use crate::document::ScheduleDocument;
use crate::error::{EngineError, Result};
use crate::period::EntitySchedule;

/// What schedule is being asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleQuery {
    /// A student group, by group number.
    Group(String),
    /// An instructor, by full name.
    Teacher(String),
    /// A room, by room number.
    Room(String),
}

impl ScheduleQuery {
    /// The entity name shown in errors and reports.
    pub fn entity_name(&self) -> &str {
        match self {
            ScheduleQuery::Group(id) | ScheduleQuery::Teacher(id) | ScheduleQuery::Room(id) => id,
        }
    }

    /// The cache key for this query, e.g. `schedule:group:101:false`.
    pub fn cache_key(&self, exam_session: bool) -> String {
        let (kind, id) = match self {
            ScheduleQuery::Group(id) => ("group", id),
            ScheduleQuery::Teacher(id) => ("teacher", id),
            ScheduleQuery::Room(id) => ("room", id),
        };
        format!("schedule:{kind}:{id}:{exam_session}")
    }
}

/// A cachable catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Groups,
    Teachers,
}

impl Listing {
    fn cache_key(self) -> &'static str {
        match self {
            Listing::Groups => "directory:groups",
            Listing::Teachers => "directory:teachers",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Listing::Groups => "groups",
            Listing::Teachers => "teachers",
        }
    }
}

/// The upstream fetch collaborator. Implementations may hit the network,
/// read files, or serve canned fixtures in tests.
pub trait FetchSchedule {
    /// Raw weekly schedule payload for one entity.
    fn fetch_schedule(&self, query: &ScheduleQuery, exam_session: bool) -> anyhow::Result<Value>;

    /// Raw directory listing payload.
    fn fetch_directory(&self, listing: Listing) -> anyhow::Result<Value>;
}

/// Cache-fronted access to a [`FetchSchedule`] collaborator.
pub struct CachedScheduleSource<F, C: Clock = SystemClock> {
    fetcher: F,
    cache: ScheduleCache<C>,
}

impl<F: FetchSchedule> CachedScheduleSource<F, SystemClock> {
    pub fn new(fetcher: F) -> Self {
        Self::with_cache(fetcher, ScheduleCache::new())
    }
}

impl<F: FetchSchedule, C: Clock> CachedScheduleSource<F, C> {
    pub fn with_cache(fetcher: F, cache: ScheduleCache<C>) -> Self {
        Self { fetcher, cache }
    }

    pub fn cache(&self) -> &ScheduleCache<C> {
        &self.cache
    }

    /// Typed weekly schedule for one entity, memoized for 24 hours.
    ///
    /// A cached payload that no longer parses is treated as a miss —
    /// warned, evicted, and re-fetched, never surfaced as an error.
    ///
    /// # Errors
    /// [`EngineError::EntityUnavailable`] when the fetch fails or the
    /// fresh payload is malformed; the caller must abort any comparison
    /// involving this entity rather than mix in a partial result.
    pub fn schedule(&self, query: &ScheduleQuery, exam_session: bool) -> Result<ScheduleDocument> {
        let key = query.cache_key(exam_session);
        if let Some(raw) = self.cache.get(&key) {
            match serde_json::from_value::<ScheduleDocument>(raw) {
                Ok(doc) => return Ok(doc),
                Err(err) => {
                    warn!(key = %key, error = %err, "cached schedule no longer parses, refetching");
                    self.cache.evict(&key);
                }
            }
        }

        let unavailable = |err: &dyn std::fmt::Display, what: &str| {
            warn!(entity = %query.entity_name(), error = %err, "{what}");
            EngineError::EntityUnavailable {
                entity: query.entity_name().to_string(),
            }
        };
        let raw = self
            .fetcher
            .fetch_schedule(query, exam_session)
            .map_err(|err| unavailable(&err, "schedule fetch failed"))?;
        let doc: ScheduleDocument = serde_json::from_value(raw.clone())
            .map_err(|err| unavailable(&err, "schedule payload malformed"))?;

        self.cache.set(&key, raw, SCHEDULE_TTL_HOURS);
        Ok(doc)
    }

    /// Fetch every compared entity's schedule, aborting on the first
    /// failure. A comparison is meaningless when one side's schedule is
    /// missing, so a partial set is never returned.
    pub fn entities(
        &self,
        queries: &[ScheduleQuery],
        exam_session: bool,
    ) -> Result<Vec<EntitySchedule>> {
        queries
            .iter()
            .map(|query| {
                Ok(EntitySchedule {
                    name: query.entity_name().to_string(),
                    document: self.schedule(query, exam_session)?,
                })
            })
            .collect()
    }

    /// Raw directory listing, memoized for a week.
    ///
    /// # Errors
    /// [`EngineError::DirectoryUnavailable`] when the fetch fails.
    pub fn directory(&self, listing: Listing) -> Result<Value> {
        let key = listing.cache_key();
        if let Some(raw) = self.cache.get(key) {
            return Ok(raw);
        }
        let raw = self.fetcher.fetch_directory(listing).map_err(|err| {
            warn!(listing = listing.name(), error = %err, "directory fetch failed");
            EngineError::DirectoryUnavailable(listing.name().to_string())
        })?;
        self.cache.set(key, raw.clone(), DIRECTORY_TTL_HOURS);
        Ok(raw)
    }
}
