// ABOUTME: Exercise selection: deterministic ranking and the model-backed selector
// ABOUTME: Selector outcomes report degradation as data instead of errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Selection
//!
//! Two selectors fill a workout from [`SlotRequirements`]:
//!
//! - [`DeterministicSelector`] ranks the candidates with the pure scorer from
//!   `pierre-intelligence` and applies a goal rep scheme.
//! - [`LlmExerciseSelector`] asks a language model, caches good answers, and
//!   retries with backoff. When every attempt fails it returns the
//!   deterministic workout as [`SelectionOutcome::Degraded`]; provider errors
//!   never escape.
//!
//! [`SlotRequirements`]: pierre_core::models::SlotRequirements

/// Selection response cache
pub mod cache;
/// Catalog-backed deterministic selection
pub mod deterministic;
/// Model-backed selection
pub mod llm_selector;
/// Model reply parsing
pub mod response;
/// Retry budget and backoff
pub mod retry;

pub use cache::{cache_key, CacheStats, Clock, ManualClock, SelectionCache, SystemClock};
pub use deterministic::{placeholder_exercise, DeterministicSelector, RepScheme};
pub use llm_selector::LlmExerciseSelector;
pub use response::parse_selection_response;
pub use retry::{FailureKind, RetryPolicy};

use pierre_core::models::ExerciseSelectionResponse;
use serde::{Deserialize, Serialize};

/// Why a selection fell back to the deterministic workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradationReason {
    /// Model calls made
    pub attempts: u32,
    /// Text of the last failure
    pub last_error: String,
}

/// Result of a model-backed selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// Model answer (fresh or cached)
    Success {
        /// Selected workout
        response: ExerciseSelectionResponse,
    },
    /// Deterministic workout after the model failed
    Degraded {
        /// Selected workout
        response: ExerciseSelectionResponse,
        /// What went wrong
        reason: DegradationReason,
    },
}

impl SelectionOutcome {
    /// The workout, whichever path produced it
    #[must_use]
    pub const fn response(&self) -> &ExerciseSelectionResponse {
        match self {
            Self::Success { response } | Self::Degraded { response, .. } => response,
        }
    }

    /// Take the workout
    #[must_use]
    pub fn into_response(self) -> ExerciseSelectionResponse {
        match self {
            Self::Success { response } | Self::Degraded { response, .. } => response,
        }
    }

    /// Whether the deterministic fallback was used
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Degradation details, if any
    #[must_use]
    pub const fn degradation(&self) -> Option<&DegradationReason> {
        match self {
            Self::Success { .. } => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }
}
