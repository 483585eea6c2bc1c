// ABOUTME: Built-in workout splits used when no stored template fits a request
// ABOUTME: Maps sessions per week and goal to day layouts, muscle groups, and slot counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{TrainingGoal, WorkoutSlot, WorkoutType};

const STANDARD_MINUTES: u32 = 60;
const ARMS_MINUTES: u32 = 45;

const PUSH: &[&str] = &["chest", "anterior_deltoid", "triceps"];
const PULL: &[&str] = &["lats", "rhomboids", "rear_deltoid", "biceps"];
const LEGS: &[&str] = &["quadriceps", "hamstrings", "glutes", "calves"];
const UPPER_A: &[&str] = &["chest", "lats", "anterior_deltoid", "triceps", "biceps"];
const UPPER_B: &[&str] = &["chest", "rhomboids", "rear_deltoid", "triceps", "biceps"];
const ARMS_CORE: &[&str] = &["biceps", "triceps", "forearms", "core"];

/// Build a workout slot from borrowed muscle names
pub(crate) fn workout_slot(
    day_of_week: u32,
    name: &str,
    workout_type: WorkoutType,
    muscles: &[&str],
    exercise_slots: u32,
    target_duration_minutes: u32,
) -> WorkoutSlot {
    WorkoutSlot {
        day_of_week,
        name: name.to_owned(),
        workout_type,
        muscle_groups: muscles.iter().map(|m| (*m).to_owned()).collect(),
        exercise_slots,
        target_duration_minutes,
    }
}

fn full_body() -> Vec<WorkoutSlot> {
    vec![
        workout_slot(
            1,
            "Full Body A",
            WorkoutType::FullBody,
            &["chest", "lats", "quadriceps", "hamstrings", "anterior_deltoid", "biceps", "triceps"],
            6,
            STANDARD_MINUTES,
        ),
        workout_slot(
            3,
            "Full Body B",
            WorkoutType::FullBody,
            &["chest", "rhomboids", "glutes", "quadriceps", "rear_deltoid", "biceps", "triceps"],
            6,
            STANDARD_MINUTES,
        ),
        workout_slot(
            5,
            "Full Body C",
            WorkoutType::FullBody,
            &["chest", "lats", "hamstrings", "calves", "anterior_deltoid", "core"],
            6,
            STANDARD_MINUTES,
        ),
    ]
}

fn push_pull_legs() -> Vec<WorkoutSlot> {
    vec![
        workout_slot(1, "Push Day", WorkoutType::Push, PUSH, 5, STANDARD_MINUTES),
        workout_slot(3, "Pull Day", WorkoutType::Pull, PULL, 5, STANDARD_MINUTES),
        workout_slot(5, "Legs Day", WorkoutType::Legs, LEGS, 5, STANDARD_MINUTES),
    ]
}

fn upper_lower() -> Vec<WorkoutSlot> {
    vec![
        workout_slot(1, "Upper Body A", WorkoutType::Upper, UPPER_A, 6, STANDARD_MINUTES),
        workout_slot(2, "Lower Body A", WorkoutType::Lower, LEGS, 5, STANDARD_MINUTES),
        workout_slot(4, "Upper Body B", WorkoutType::Upper, UPPER_B, 6, STANDARD_MINUTES),
        workout_slot(5, "Lower Body B", WorkoutType::Lower, LEGS, 5, STANDARD_MINUTES),
    ]
}

fn ppl_upper_lower() -> Vec<WorkoutSlot> {
    vec![
        workout_slot(1, "Push Day", WorkoutType::Push, PUSH, 5, STANDARD_MINUTES),
        workout_slot(2, "Pull Day", WorkoutType::Pull, PULL, 5, STANDARD_MINUTES),
        workout_slot(3, "Legs Day", WorkoutType::Legs, LEGS, 5, STANDARD_MINUTES),
        workout_slot(5, "Upper Body", WorkoutType::Upper, UPPER_A, 6, STANDARD_MINUTES),
        workout_slot(6, "Lower Body", WorkoutType::Lower, LEGS, 5, STANDARD_MINUTES),
    ]
}

fn ppl_twice() -> Vec<WorkoutSlot> {
    vec![
        workout_slot(1, "Push Day A", WorkoutType::Push, PUSH, 5, STANDARD_MINUTES),
        workout_slot(2, "Pull Day A", WorkoutType::Pull, PULL, 5, STANDARD_MINUTES),
        workout_slot(3, "Legs Day A", WorkoutType::Legs, LEGS, 5, STANDARD_MINUTES),
        workout_slot(4, "Push Day B", WorkoutType::Push, PUSH, 5, STANDARD_MINUTES),
        workout_slot(5, "Pull Day B", WorkoutType::Pull, PULL, 5, STANDARD_MINUTES),
        workout_slot(6, "Legs Day B", WorkoutType::Legs, LEGS, 5, STANDARD_MINUTES),
    ]
}

fn ppl_twice_plus() -> Vec<WorkoutSlot> {
    let mut workouts = ppl_twice();
    workouts.push(workout_slot(7, "Arms & Core", WorkoutType::Arms, ARMS_CORE, 6, ARMS_MINUTES));
    workouts
}

/// Split identifier and workouts for a session count
///
/// Counts outside 1-7 are clamped. Full body serves one or two sessions by
/// keeping its first days; three sessions use push/pull/legs for strength and
/// hypertrophy and full body otherwise.
#[must_use]
pub fn default_split(goal: TrainingGoal, sessions_per_week: u32) -> (&'static str, Vec<WorkoutSlot>) {
    let sessions = sessions_per_week.clamp(1, 7);
    let (split_type, mut workouts) = match sessions {
        1 | 2 => ("full_body", full_body()),
        3 if matches!(goal, TrainingGoal::Strength | TrainingGoal::Hypertrophy) => {
            ("push_pull_legs", push_pull_legs())
        }
        3 => ("full_body", full_body()),
        4 => ("upper_lower", upper_lower()),
        5 => ("ppl_upper_lower", ppl_upper_lower()),
        6 => ("ppl_twice", ppl_twice()),
        _ => ("ppl_twice_plus", ppl_twice_plus()),
    };
    workouts.truncate(sessions as usize);
    (split_type, workouts)
}

/// Week focus text for synthesized structures
#[must_use]
pub const fn goal_focus(goal: TrainingGoal) -> &'static str {
    match goal {
        TrainingGoal::Strength => "Strength Development",
        TrainingGoal::Hypertrophy => "Muscle Building",
        TrainingGoal::Endurance => "Muscular Endurance",
        TrainingGoal::WeightLoss => "Fat Loss & Conditioning",
        TrainingGoal::GeneralFitness => "General Fitness",
        TrainingGoal::SportSpecific => "Sport Performance",
    }
}
