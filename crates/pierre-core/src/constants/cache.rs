// ABOUTME: Selection cache constants for capacity, TTL, and forced eviction
// ABOUTME: Defaults for the in-process LLM response cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default maximum cached selection responses
pub const DEFAULT_SELECTION_CACHE_MAX_ENTRIES: usize = 500;

/// Default selection response TTL (1 hour)
pub const DEFAULT_SELECTION_CACHE_TTL_SECS: u64 = 3_600;

/// Forced eviction removes `len / EVICTION_DIVISOR` entries (oldest 20%)
pub const EVICTION_DIVISOR: usize = 5;

/// Separator between cache key segments
pub const KEY_SEGMENT_SEPARATOR: char = ':';
