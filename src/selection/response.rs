// ABOUTME: Parses and repairs a model's exercise selection reply
// ABOUTME: Drops unknown and repeated ids, fills missing fields, clamps ranges, and renumbers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{HashMap, HashSet};

use pierre_core::constants::selection::{
    DEFAULT_DURATION_MINUTES, DEFAULT_REPS, DEFAULT_REST_SECONDS, DEFAULT_SETS,
    MAX_DURATION_MINUTES, MAX_REST_SECONDS, MAX_SETS, MIN_DURATION_MINUTES, MIN_REST_SECONDS,
    MIN_SETS,
};
use pierre_core::models::{
    Exercise, ExerciseSelection, ExerciseSelectionResponse, SlotRequirements,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    exercises: Vec<RawSelection>,
    #[serde(default)]
    workout_notes: Option<String>,
    #[serde(default)]
    estimated_duration_minutes: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSelection {
    #[serde(default)]
    exercise_id: Option<String>,
    #[serde(default)]
    exercise_name: Option<String>,
    #[serde(default)]
    sets: Option<f64>,
    #[serde(default)]
    reps: Option<Value>,
    #[serde(default)]
    rest_seconds: Option<f64>,
    #[serde(default)]
    superset_group: Option<Value>,
    #[serde(default)]
    notes: Option<String>,
}

fn clamp_u32(value: Option<f64>, default: u32, min: u32, max: u32) -> u32 {
    value
        .filter(|v| v.is_finite())
        .map_or(default, |v| v.round().clamp(f64::from(min), f64::from(max)) as u32)
}

/// Models send reps as "8-12", 10, or null
fn reps_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        _ => DEFAULT_REPS.to_owned(),
    }
}

fn superset_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Strip a Markdown code fence some models wrap JSON in
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

/// Turn a model reply into a usable selection
///
/// Ids outside the requirement's candidates and repeated ids are dropped;
/// `sets`, `rest_seconds`, and the duration are clamped; missing fields take
/// their defaults; orders are renumbered 1..N in the model's order.
///
/// # Errors
///
/// Returns `SerializationError` when the reply is empty, is not a JSON
/// object of the expected shape, or leaves no usable exercise.
pub fn parse_selection_response(
    content: &str,
    requirements: &SlotRequirements,
) -> AppResult<ExerciseSelectionResponse> {
    let body = strip_code_fence(content);
    if body.is_empty() {
        return Err(AppError::serialization("Empty response from LLM"));
    }
    let raw: RawResponse = serde_json::from_str(body)
        .map_err(|e| AppError::serialization(format!("Malformed selection JSON: {e}")))?;

    let candidates: HashMap<&str, &Exercise> = requirements
        .candidates
        .iter()
        .map(|e| (e.id.as_str(), e))
        .collect();
    let mut seen = HashSet::new();
    let mut exercises = Vec::with_capacity(raw.exercises.len());

    for item in raw.exercises {
        let Some(id) = item.exercise_id.map(|id| id.trim().to_owned()) else {
            debug!("Dropping selection without exercise_id");
            continue;
        };
        let Some(exercise) = candidates.get(id.as_str()) else {
            warn!(exercise_id = %id, "LLM selected an exercise outside the candidate list");
            continue;
        };
        if !seen.insert(id.clone()) {
            debug!(exercise_id = %id, "Dropping repeated selection");
            continue;
        }
        let order = u32::try_from(exercises.len()).unwrap_or(u32::MAX).saturating_add(1);
        exercises.push(ExerciseSelection {
            exercise_name: item
                .exercise_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| exercise.name.clone()),
            exercise_id: id,
            sets: clamp_u32(item.sets, DEFAULT_SETS, MIN_SETS, MAX_SETS),
            reps: reps_text(item.reps),
            rest_seconds: clamp_u32(
                item.rest_seconds,
                DEFAULT_REST_SECONDS,
                MIN_REST_SECONDS,
                MAX_REST_SECONDS,
            ),
            order,
            superset_group: superset_text(item.superset_group),
            notes: item.notes.filter(|n| !n.trim().is_empty()),
        });
    }

    if exercises.is_empty() {
        return Err(AppError::serialization(
            "LLM response contained no usable exercises",
        ));
    }
    if exercises.len() > requirements.exercise_count as usize {
        debug!(
            returned = exercises.len(),
            requested = requirements.exercise_count,
            "Truncating oversized selection"
        );
        exercises.truncate(requirements.exercise_count as usize);
    }

    Ok(ExerciseSelectionResponse {
        exercises,
        workout_notes: raw.workout_notes.filter(|n| !n.trim().is_empty()),
        estimated_duration_minutes: clamp_u32(
            raw.estimated_duration_minutes,
            DEFAULT_DURATION_MINUTES,
            MIN_DURATION_MINUTES,
            MAX_DURATION_MINUTES,
        ),
    })
}
