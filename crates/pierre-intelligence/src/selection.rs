// ABOUTME: Deterministic exercise scoring, ranking, and similarity
// ABOUTME: Pure functions over catalog records; same input always yields the same ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use pierre_core::constants::selection::{
    CATEGORY_MATCH_WEIGHT, EQUIPMENT_OVERLAP_WEIGHT, MUSCLE_OVERLAP_WEIGHT,
};
use pierre_core::models::equipment::{equipment_satisfied, normalize_equipment};
use pierre_core::models::{Exercise, ExerciseCandidate, SlotRequirements};

fn overlap_ratio(items: &[String], targets: &[String]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    let targets: HashSet<&str> = targets.iter().map(String::as_str).collect();
    let hits = items
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>()
        .intersection(&targets)
        .count();
    hits as f64 / targets.len() as f64
}

/// Fit score of an exercise for a slot, in 0.0-1.0
///
/// `0.6 * muscle overlap + 0.3 * category match + 0.1 * equipment overlap`,
/// where muscle overlap is relative to the target muscles and equipment
/// overlap is relative to the (normalized) available equipment.
#[must_use]
pub fn score_candidate(
    exercise: &Exercise,
    requirements: &SlotRequirements,
    available_equipment: &BTreeSet<String>,
) -> f64 {
    let muscle = overlap_ratio(&exercise.primary_muscles, &requirements.target_muscles);
    let category = if exercise.category == requirements.reference_category {
        1.0
    } else {
        0.0
    };
    let equipment_hits = normalize_equipment(&exercise.equipment)
        .intersection(available_equipment)
        .count();
    let equipment = equipment_hits as f64 / available_equipment.len().max(1) as f64;

    EQUIPMENT_OVERLAP_WEIGHT.mul_add(
        equipment,
        MUSCLE_OVERLAP_WEIGHT.mul_add(muscle, CATEGORY_MATCH_WEIGHT * category),
    )
}

/// Candidate ordering: score descending, compound first, then name
fn compare_candidates(a: &ExerciseCandidate, b: &ExerciseCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.exercise.category.rank().cmp(&b.exercise.category.rank()))
        .then_with(|| a.exercise.name.cmp(&b.exercise.name))
}

/// Rank the requirement's candidates and keep the best `exercise_count`
///
/// Exercises needing unavailable equipment are dropped, repeated ids keep
/// their first occurrence, and a movement-pattern preference narrows the
/// pool only when something eligible matches it. The sort is stable so equal
/// candidates keep catalog order.
#[must_use]
pub fn rank_candidates(requirements: &SlotRequirements) -> Vec<ExerciseCandidate> {
    let available = normalize_equipment(&requirements.available_equipment);

    let mut seen = HashSet::new();
    let eligible: Vec<&Exercise> = requirements
        .candidates
        .iter()
        .filter(|exercise| equipment_satisfied(&exercise.equipment, &available))
        .filter(|exercise| seen.insert(exercise.id.as_str()))
        .collect();

    let pool: Vec<&Exercise> = match requirements.movement_pattern {
        Some(pattern) if eligible.iter().any(|e| e.movement_pattern == pattern) => eligible
            .into_iter()
            .filter(|e| e.movement_pattern == pattern)
            .collect(),
        _ => eligible,
    };

    let mut ranked: Vec<ExerciseCandidate> = pool
        .into_iter()
        .map(|exercise| ExerciseCandidate {
            score: score_candidate(exercise, requirements, &available),
            exercise: exercise.clone(),
        })
        .collect();
    ranked.sort_by(compare_candidates);
    ranked.truncate(requirements.exercise_count as usize);
    ranked
}

/// How interchangeable `other` is with `source`, in 0.0-1.0
///
/// Callers are expected to pre-filter to the same movement pattern.
#[must_use]
pub fn similarity_score(source: &Exercise, other: &Exercise) -> f64 {
    let muscle = overlap_ratio(&other.primary_muscles, &source.primary_muscles);
    let category = if other.category == source.category {
        1.0
    } else {
        0.0
    };
    let equipment = if source.equipment.is_empty() || other.equipment.is_empty() {
        0.0
    } else {
        overlap_ratio(&other.equipment, &source.equipment)
    };

    EQUIPMENT_OVERLAP_WEIGHT.mul_add(
        equipment,
        MUSCLE_OVERLAP_WEIGHT.mul_add(muscle, CATEGORY_MATCH_WEIGHT * category),
    )
}
