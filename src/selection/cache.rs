// ABOUTME: Bounded TTL cache for model selection responses with an injectable clock
// ABOUTME: Evicts expired entries first, then the oldest fifth, before inserting at capacity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use pierre_core::constants::cache::{EVICTION_DIVISOR, KEY_SEGMENT_SEPARATOR};
use pierre_core::models::equipment::normalize_equipment;
use pierre_core::models::{ExerciseSelectionResponse, SlotRequirements};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::SelectionCacheConfig;
use crate::errors::AppResult;
use crate::llm::sanitize::sanitize_limitations;

/// Time source for cache expiry
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset_ms: AtomicU64,
}

impl ManualClock {
    /// Clock frozen at the current instant
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let millis = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.offset_ms.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = Duration::from_millis(self.offset_ms.load(Ordering::SeqCst));
        self.origin.checked_add(offset).unwrap_or(self.origin)
    }
}

/// Cached response with its creation instant
#[derive(Debug, Clone)]
struct CacheEntry {
    response: ExerciseSelectionResponse,
    created_at: Instant,
}

/// Cache occupancy snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Entries held, expired or not
    pub total_entries: usize,
    /// Entries still within their TTL
    pub valid_entries: usize,
    /// Capacity
    pub max_size: usize,
    /// Entry lifetime
    pub ttl_seconds: u64,
}

/// Cache key for a selection request
///
/// Segments: workout type, sorted muscles, count, goal, experience, deload
/// flag, sorted normalized equipment, sorted sanitized limitations.
#[must_use]
pub fn cache_key(requirements: &SlotRequirements) -> String {
    let mut muscles = requirements.target_muscles.clone();
    muscles.sort();
    let equipment: Vec<String> = normalize_equipment(&requirements.available_equipment)
        .into_iter()
        .collect();
    let mut limitations = sanitize_limitations(&requirements.limitations);
    limitations.sort();

    let sep = KEY_SEGMENT_SEPARATOR;
    let mut key = String::with_capacity(128);
    let _ = write!(
        key,
        "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
        requirements.workout_type,
        muscles.join(","),
        requirements.exercise_count,
        requirements.goal,
        requirements.experience_level,
        requirements.is_deload,
        equipment.join(","),
        limitations.join(",")
    );
    key
}

/// Selection response cache
///
/// Reads never reorder entries, so the store's least-recently-used end is
/// always the oldest insertion.
#[derive(Clone)]
pub struct SelectionCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    max_entries: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SelectionCache {
    /// Create a cache on the wall clock
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for a zero capacity or TTL
    pub fn new(config: &SelectionCacheConfig) -> AppResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a cache on a supplied clock
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for a zero capacity or TTL
    pub fn with_clock(config: &SelectionCacheConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            store: Arc::new(RwLock::new(LruCache::unbounded())),
            max_entries: config.max_entries,
            ttl: Duration::from_secs(config.ttl_secs),
            clock,
        })
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.created_at) > self.ttl
    }

    /// Cached response for `key` if it is within its TTL
    ///
    /// An expired entry is removed on lookup.
    pub async fn get(&self, key: &str) -> Option<ExerciseSelectionResponse> {
        let now = self.clock.now();
        {
            let store = self.store.read().await;
            match store.peek(key) {
                None => return None,
                Some(entry) if !self.is_expired(entry, now) => {
                    return Some(entry.response.clone());
                }
                Some(_) => {}
            }
        }
        self.store.write().await.pop(key);
        debug!(key, "Selection cache entry expired");
        None
    }

    /// Store a response
    ///
    /// At capacity, expired entries are purged first; if the cache is still
    /// full the oldest `max(1, len / 5)` entries are dropped.
    pub async fn insert(&self, key: String, response: ExerciseSelectionResponse) {
        let now = self.clock.now();
        let mut store = self.store.write().await;
        if !store.contains(&key) && store.len() >= self.max_entries {
            let expired: Vec<String> = store
                .iter()
                .filter(|(_, entry)| self.is_expired(entry, now))
                .map(|(k, _)| k.clone())
                .collect();
            for k in &expired {
                store.pop(k);
            }

            let mut evicted = 0;
            if store.len() >= self.max_entries {
                let count = (store.len() / EVICTION_DIVISOR).max(1);
                for _ in 0..count {
                    store.pop_lru();
                }
                evicted = count;
            }
            debug!(
                expired = expired.len(),
                evicted,
                remaining = store.len(),
                "Selection cache made room"
            );
        }
        store.push(
            key,
            CacheEntry {
                response,
                created_at: now,
            },
        );
    }

    /// Occupancy snapshot
    pub async fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let store = self.store.read().await;
        let valid_entries = store
            .iter()
            .filter(|(_, entry)| !self.is_expired(entry, now))
            .count();
        CacheStats {
            total_entries: store.len(),
            valid_entries,
            max_size: self.max_entries,
            ttl_seconds: self.ttl.as_secs(),
        }
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    /// Number of entries held
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the cache holds nothing
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_core::models::{ExperienceLevel, TrainingGoal, WorkoutType};

    fn cache(max_entries: usize, ttl_secs: u64) -> (SelectionCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let config = SelectionCacheConfig {
            max_entries,
            ttl_secs,
        };
        (
            SelectionCache::with_clock(&config, clock.clone()).unwrap(),
            clock,
        )
    }

    #[test]
    fn test_key_is_order_insensitive() {
        let base = SlotRequirements::new(
            WorkoutType::Push,
            TrainingGoal::Hypertrophy,
            ExperienceLevel::Intermediate,
        );
        let a = base
            .clone()
            .with_target_muscles(vec!["triceps".to_owned(), "chest".to_owned()])
            .with_equipment(vec!["Squat_Rack".to_owned(), "dumbbell".to_owned()])
            .with_limitations(vec!["knee\npain".to_owned()]);
        let b = base
            .with_target_muscles(vec!["chest".to_owned(), "triceps".to_owned()])
            .with_equipment(vec!["dumbbells".to_owned(), "rack".to_owned()])
            .with_limitations(vec!["knee pain".to_owned()]);
        assert_eq!(cache_key(&a), cache_key(&b));
        assert_eq!(
            cache_key(&a),
            "push:chest,triceps:5:hypertrophy:intermediate:false:dumbbells,rack:knee pain"
        );
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let (cache, clock) = cache(10, 60);
        cache.insert("k".to_owned(), ExerciseSelectionResponse::empty()).await;
        clock.advance(Duration::from_secs(60));
        assert!(cache.get("k").await.is_some());
        clock.advance(Duration::from_secs(1));
        assert!(cache.get("k").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_eviction_purges_expired_first() {
        let (cache, clock) = cache(5, 60);
        cache.insert("old".to_owned(), ExerciseSelectionResponse::empty()).await;
        clock.advance(Duration::from_secs(120));
        for i in 0..4 {
            cache.insert(format!("k{i}"), ExerciseSelectionResponse::empty()).await;
        }
        cache.insert("new".to_owned(), ExerciseSelectionResponse::empty()).await;
        assert_eq!(cache.len().await, 5);
        assert!(cache.get("k0").await.is_some());
        assert!(cache.get("old").await.is_none());
    }

    #[tokio::test]
    async fn test_eviction_drops_oldest_fifth() {
        let (cache, clock) = cache(10, 3_600);
        for i in 0..10 {
            cache.insert(format!("k{i}"), ExerciseSelectionResponse::empty()).await;
            clock.advance(Duration::from_secs(1));
        }
        cache.insert("k10".to_owned(), ExerciseSelectionResponse::empty()).await;
        assert_eq!(cache.len().await, 9);
        assert!(cache.get("k0").await.is_none());
        assert!(cache.get("k1").await.is_none());
        assert!(cache.get("k2").await.is_some());
        assert!(cache.get("k10").await.is_some());
    }

    #[tokio::test]
    async fn test_stats_and_clear() {
        let (cache, clock) = cache(10, 60);
        cache.insert("a".to_owned(), ExerciseSelectionResponse::empty()).await;
        clock.advance(Duration::from_secs(61));
        cache.insert("b".to_owned(), ExerciseSelectionResponse::empty()).await;
        let stats = cache.stats().await;
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 1);
        assert_eq!(stats.max_size, 10);
        assert_eq!(stats.ttl_seconds, 60);
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
