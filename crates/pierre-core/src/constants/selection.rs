// ABOUTME: Exercise selection constants for scoring weights and request bounds
// ABOUTME: Shared by the deterministic ranker, the LLM selector, and the catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Weight of primary-muscle overlap in a candidate score
pub const MUSCLE_OVERLAP_WEIGHT: f64 = 0.6;

/// Weight of a category match in a candidate score
pub const CATEGORY_MATCH_WEIGHT: f64 = 0.3;

/// Weight of equipment overlap in a candidate score
pub const EQUIPMENT_OVERLAP_WEIGHT: f64 = 0.1;

/// Smallest exercise count a slot may request
pub const MIN_EXERCISE_COUNT: u32 = 3;

/// Largest exercise count a slot may request
pub const MAX_EXERCISE_COUNT: u32 = 12;

/// Sets bounds for one selected exercise
pub const MIN_SETS: u32 = 1;
/// Sets bounds for one selected exercise
pub const MAX_SETS: u32 = 10;

/// Rest bounds in seconds
pub const MIN_REST_SECONDS: u32 = 30;
/// Rest bounds in seconds
pub const MAX_REST_SECONDS: u32 = 300;

/// Estimated workout duration bounds in minutes
pub const MIN_DURATION_MINUTES: u32 = 20;
/// Estimated workout duration bounds in minutes
pub const MAX_DURATION_MINUTES: u32 = 120;

/// Defaults for fields the model leaves out
pub const DEFAULT_SETS: u32 = 3;
/// Defaults for fields the model leaves out
pub const DEFAULT_REPS: &str = "8-12";
/// Defaults for fields the model leaves out
pub const DEFAULT_REST_SECONDS: u32 = 90;
/// Defaults for fields the model leaves out
pub const DEFAULT_DURATION_MINUTES: u32 = 45;

/// Minutes budgeted per exercise when estimating a fallback workout
pub const FALLBACK_MINUTES_PER_EXERCISE: u32 = 8;
/// Warm-up minutes added to a fallback estimate
pub const FALLBACK_WARMUP_MINUTES: u32 = 10;
/// Notes attached to a deterministic fallback workout
pub const FALLBACK_WORKOUT_NOTES: &str = "Fallback selection due to LLM unavailability";

/// Catalog search limit when filling a single slot
pub const SLOT_SEARCH_LIMIT: usize = 50;
/// Catalog limit when listing candidates for a workout
pub const WORKOUT_CANDIDATE_LIMIT: usize = 50;
/// Default limit for `get_all`
pub const CATALOG_LIST_LIMIT: usize = 500;
/// Default limit for similar-exercise search
pub const SIMILAR_EXERCISE_LIMIT: usize = 5;

/// Longest limitation string kept after sanitization
pub const MAX_LIMITATION_LENGTH: usize = 100;
/// Most limitations forwarded to the model
pub const MAX_LIMITATIONS_COUNT: usize = 10;
