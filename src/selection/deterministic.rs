// ABOUTME: Deterministic exercise selection over catalog data
// ABOUTME: Ranked picks, goal rep schemes for fallback workouts, slot filling, and alternatives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::sync::Arc;

use pierre_core::constants::selection::{
    FALLBACK_MINUTES_PER_EXERCISE, FALLBACK_WARMUP_MINUTES, FALLBACK_WORKOUT_NOTES,
    MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, SLOT_SEARCH_LIMIT,
};
use pierre_core::models::equipment::{equipment_satisfied, normalize_equipment};
use pierre_core::models::{
    Exercise, ExerciseCandidate, ExerciseSelection, ExerciseSelectionResponse, MovementPattern,
    SlotRequirements, TrainingGoal, WorkoutType,
};
use pierre_intelligence::rank_candidates;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::{ExerciseQuery, ExerciseRepository};

/// Sets, reps, and rest for a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepScheme {
    /// Rep target
    pub reps: &'static str,
    /// Working sets outside deload weeks
    pub sets: u32,
    /// Rest between sets in seconds
    pub rest_seconds: u32,
}

impl RepScheme {
    /// Scheme used by fallback workouts
    #[must_use]
    pub const fn for_goal(goal: TrainingGoal) -> Self {
        let (reps, sets, rest_seconds) = match goal {
            TrainingGoal::Strength => ("3-5", 4, 150),
            TrainingGoal::Hypertrophy => ("8-12", 4, 90),
            TrainingGoal::Endurance => ("15-20", 3, 60),
            TrainingGoal::WeightLoss => ("12-15", 3, 45),
            TrainingGoal::GeneralFitness => ("10-15", 3, 60),
            TrainingGoal::SportSpecific => ("6-10", 4, 90),
        };
        Self {
            reps,
            sets,
            rest_seconds,
        }
    }

    /// Sets for a week; deload weeks drop one set but keep at least two
    #[must_use]
    pub fn sets_for_week(&self, is_deload: bool) -> u32 {
        if is_deload {
            self.sets.saturating_sub(1).max(2)
        } else {
            self.sets
        }
    }
}

/// Movement pattern assumed for a placeholder when the slot names none
const fn default_pattern(workout_type: WorkoutType) -> MovementPattern {
    match workout_type {
        WorkoutType::Push | WorkoutType::Upper => MovementPattern::Push,
        WorkoutType::Pull => MovementPattern::Pull,
        WorkoutType::Legs | WorkoutType::Lower | WorkoutType::FullBody => MovementPattern::Squat,
        WorkoutType::Arms => MovementPattern::Core,
    }
}

fn title_case(token: &str) -> String {
    token
        .split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Synthesized exercise for a slot the catalog cannot fill
///
/// Named "{Pattern} {Muscle} Exercise" with id `{pattern}-{muscle}-{8 hex}`;
/// every call yields a fresh id.
#[must_use]
pub fn placeholder_exercise(requirements: &SlotRequirements) -> Exercise {
    let pattern = requirements
        .movement_pattern
        .unwrap_or_else(|| default_pattern(requirements.workout_type));
    let muscle = requirements
        .target_muscles
        .first()
        .map_or("general", String::as_str);
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();

    let mut exercise = Exercise::new(
        format!("{}-{}-{suffix}", pattern.as_str(), muscle.replace('_', "-")),
        format!("{} {} Exercise", pattern.title(), title_case(muscle)),
        pattern,
        requirements.reference_category,
    );
    exercise.primary_muscles.clone_from(&requirements.target_muscles);
    exercise.is_placeholder = true;
    exercise
}

/// Catalog-backed deterministic selector
#[derive(Clone)]
pub struct DeterministicSelector {
    catalog: Arc<dyn ExerciseRepository>,
}

impl DeterministicSelector {
    /// Create a selector over a catalog
    #[must_use]
    pub fn new(catalog: Arc<dyn ExerciseRepository>) -> Self {
        Self { catalog }
    }

    /// Best candidates for the slot, at most `exercise_count`
    ///
    /// Pure: the same requirements always yield the same ranking.
    #[must_use]
    pub fn select(requirements: &SlotRequirements) -> Vec<ExerciseCandidate> {
        rank_candidates(requirements)
    }

    /// Complete workout from ranked candidates and the goal's rep scheme
    #[must_use]
    pub fn fallback_response(requirements: &SlotRequirements) -> ExerciseSelectionResponse {
        let scheme = RepScheme::for_goal(requirements.goal);
        let sets = scheme.sets_for_week(requirements.is_deload);

        let exercises: Vec<ExerciseSelection> = Self::select(requirements)
            .into_iter()
            .zip(1_u32..)
            .map(|(candidate, order)| ExerciseSelection {
                exercise_id: candidate.exercise.id,
                exercise_name: candidate.exercise.name,
                sets,
                reps: scheme.reps.to_owned(),
                rest_seconds: scheme.rest_seconds,
                order,
                superset_group: None,
                notes: None,
            })
            .collect();

        let count = u32::try_from(exercises.len()).unwrap_or(u32::MAX);
        let minutes = count
            .saturating_mul(FALLBACK_MINUTES_PER_EXERCISE)
            .saturating_add(FALLBACK_WARMUP_MINUTES)
            .clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES);

        debug!(
            workout_type = %requirements.workout_type,
            exercise_count = exercises.len(),
            "Built deterministic workout"
        );
        ExerciseSelectionResponse {
            exercises,
            workout_notes: Some(FALLBACK_WORKOUT_NOTES.to_owned()),
            estimated_duration_minutes: minutes,
        }
    }

    /// Best catalog exercise for one slot, or a placeholder
    ///
    /// Searches by the slot's muscles, pattern, and category, skipping
    /// `exclude_ids` and anything needing unavailable equipment. Catalog
    /// failures are logged and produce a placeholder.
    pub async fn fill_exercise_slot(
        &self,
        requirements: &SlotRequirements,
        available_equipment: &[String],
        exclude_ids: &[String],
    ) -> Exercise {
        let available = normalize_equipment(available_equipment);
        let equipment: Vec<String> = available.iter().cloned().collect();
        let query = ExerciseQuery::default()
            .with_muscles(&requirements.target_muscles)
            .with_equipment(&equipment)
            .with_movement_pattern(requirements.movement_pattern)
            .with_category(Some(requirements.reference_category))
            .with_limit(SLOT_SEARCH_LIMIT);

        let found = match self.catalog.search(&query).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "Catalog search failed while filling a slot");
                Vec::new()
            }
        };

        let excluded: HashSet<&str> = exclude_ids.iter().map(String::as_str).collect();
        let eligible: Vec<Exercise> = found
            .into_iter()
            .filter(|e| !excluded.contains(e.id.as_str()))
            .filter(|e| equipment_satisfied(&e.equipment, &available))
            .collect();

        let slot = requirements
            .clone()
            .with_equipment(equipment)
            .with_candidates(eligible);
        match rank_candidates(&slot).into_iter().next() {
            Some(best) => best.exercise,
            None => {
                let placeholder = placeholder_exercise(requirements);
                warn!(
                    exercise_id = %placeholder.id,
                    "No catalog exercise fits the slot, using placeholder"
                );
                placeholder
            }
        }
    }

    /// Similar exercises performable with the available equipment
    pub async fn get_alternatives(
        &self,
        exercise_id: &str,
        available_equipment: &[String],
        limit: usize,
    ) -> Vec<Exercise> {
        let available = normalize_equipment(available_equipment);
        self.catalog
            .get_similar_exercises(exercise_id, limit.saturating_mul(2))
            .await
            .into_iter()
            .filter(|e| equipment_satisfied(&e.equipment, &available))
            .take(limit)
            .collect()
    }
}
