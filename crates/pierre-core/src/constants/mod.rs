// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants organized by domain for the Pierre program engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! This module organizes engine constants by domain for better maintainability.
//! Constants are grouped into logical domains rather than being in a single large file.

/// Selection response cache constants (capacity, TTL)
pub mod cache;

/// Exercise selection constants (scoring weights, request bounds, search limits)
pub mod selection;

/// Service identifiers used in structured logs
pub mod service_names {
    /// Program engine service name
    pub const PIERRE_PROGRAM_ENGINE: &str = "pierre-program-engine";
    /// Service label used in external-service errors raised by the LLM client
    pub const LLM_SERVICE: &str = "LLM";
}

/// LLM client defaults
pub mod llm {
    /// Default chat-completions base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default model for exercise selection (cost efficient)
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    /// Sampling temperature for exercise selection
    pub const SELECTION_TEMPERATURE: f32 = 0.7;
    /// Token ceiling for one selection response
    pub const SELECTION_MAX_TOKENS: u32 = 2000;
    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Default request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
}

/// Retry and backoff defaults for model calls
pub mod retry {
    /// Additional attempts after the first call (3 calls in total)
    pub const DEFAULT_MAX_RETRIES: u32 = 2;
    /// Upper bound accepted for `max_retries`
    pub const MAX_ALLOWED_RETRIES: u32 = 10;
    /// Base backoff for generic failures in milliseconds
    pub const DEFAULT_BASE_BACKOFF_MS: u64 = 1_000;
    /// Base backoff for rate-limit failures in milliseconds
    pub const DEFAULT_RATE_LIMIT_BACKOFF_MS: u64 = 5_000;
    /// Ceiling applied to every backoff, jitter included, in milliseconds
    pub const DEFAULT_MAX_BACKOFF_MS: u64 = 20_000;
    /// Exclusive upper bound of the random jitter in milliseconds
    pub const DEFAULT_MAX_JITTER_MS: u64 = 1_000;
}

/// Periodization tables
pub mod periodization {
    /// Deload cadence in weeks for beginners
    pub const BEGINNER_DELOAD_FREQUENCY: u32 = 6;
    /// Deload cadence in weeks for intermediates
    pub const INTERMEDIATE_DELOAD_FREQUENCY: u32 = 4;
    /// Deload cadence in weeks for advanced lifters
    pub const ADVANCED_DELOAD_FREQUENCY: u32 = 3;
    /// Programs at least this long always end with a deload week
    pub const FINAL_DELOAD_MIN_WEEKS: u32 = 6;
    /// Intensity multiplier applied on deload weeks
    pub const DELOAD_INTENSITY_FACTOR: f64 = 0.6;
    /// Volume multiplier applied on deload weeks
    pub const DELOAD_VOLUME_FACTOR: f64 = 0.5;
    /// Fraction of the program spent in block accumulation
    pub const BLOCK_ACCUMULATION_FRACTION: f64 = 0.4;
    /// Fraction of the program completed at the end of block transmutation
    pub const BLOCK_TRANSMUTATION_FRACTION: f64 = 0.8;
    /// Maximum duration accepted for a program
    pub const MAX_DURATION_WEEKS: u32 = 52;
    /// Maximum sessions per week
    pub const MAX_SESSIONS_PER_WEEK: u32 = 7;
}

/// Program validation thresholds
pub mod validation {
    /// Opposing muscle groups beyond this set ratio produce a warning
    pub const MAX_BALANCE_RATIO: f64 = 1.5;
    /// Major muscle groups checked for weekly volume
    pub const MAJOR_MUSCLES: [&str; 6] = [
        "chest",
        "lats",
        "quadriceps",
        "hamstrings",
        "glutes",
        "anterior_deltoid",
    ];
}

/// Template scoring weights
pub mod templates {
    /// Base score for a goal and experience match
    pub const SCORE_BASE: f64 = 20.0;
    /// Exact sessions-per-week match
    pub const SCORE_SESSIONS_MATCH: f64 = 30.0;
    /// Sessions within one of the request
    pub const SCORE_SESSIONS_CLOSE: f64 = 15.0;
    /// Exact duration match
    pub const SCORE_DURATION_MATCH: f64 = 25.0;
    /// Duration within the tolerance window
    pub const SCORE_DURATION_CLOSE: f64 = 10.0;
    /// Maximum popularity bonus
    pub const SCORE_POPULARITY_MAX: f64 = 15.0;
    /// Usage count at which the popularity bonus saturates
    pub const POPULARITY_SATURATION: f64 = 100.0;
    /// Allowed duration difference in weeks when matching templates
    pub const DURATION_TOLERANCE_WEEKS: u32 = 2;
    /// Session count assumed for templates without a first week
    pub const DEFAULT_TEMPLATE_SESSIONS: usize = 3;
    /// Fewest exercise slots kept on a deload week
    pub const MIN_DELOAD_SLOTS: u32 = 3;
    /// Slots removed on deload weeks
    pub const DELOAD_SLOT_REDUCTION: u32 = 2;
}

/// Environment variable names read by the engine configuration
pub mod env_config {
    /// API key enabling LLM-backed selection
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Chat-completions base URL
    pub const LLM_BASE_URL: &str = "PIERRE_LLM_BASE_URL";
    /// Model identifier
    pub const LLM_MODEL: &str = "PIERRE_LLM_MODEL";
    /// Request timeout in seconds
    pub const LLM_TIMEOUT_SECS: &str = "PIERRE_LLM_TIMEOUT_SECS";
    /// Additional attempts after the first model call
    pub const SELECTOR_MAX_RETRIES: &str = "PIERRE_SELECTOR_MAX_RETRIES";
    /// Generic backoff base in milliseconds
    pub const SELECTOR_BASE_BACKOFF_MS: &str = "PIERRE_SELECTOR_BASE_BACKOFF_MS";
    /// Rate-limit backoff base in milliseconds
    pub const SELECTOR_RATE_LIMIT_BACKOFF_MS: &str = "PIERRE_SELECTOR_RATE_LIMIT_BACKOFF_MS";
    /// Backoff ceiling in milliseconds
    pub const SELECTOR_MAX_BACKOFF_MS: &str = "PIERRE_SELECTOR_MAX_BACKOFF_MS";
    /// Jitter bound in milliseconds
    pub const SELECTOR_MAX_JITTER_MS: &str = "PIERRE_SELECTOR_MAX_JITTER_MS";
    /// Selection cache capacity
    pub const SELECTION_CACHE_MAX_ENTRIES: &str = "PIERRE_SELECTION_CACHE_MAX_ENTRIES";
    /// Selection cache TTL in seconds
    pub const SELECTION_CACHE_TTL_SECS: &str = "PIERRE_SELECTION_CACHE_TTL_SECS";
}
