// ABOUTME: Integration tests for catalog-backed deterministic exercise selection
// ABOUTME: Runs ranking against the seeded catalog for every workout type and equipment set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashSet;

use anyhow::Result;
use common::{init_test_logging, owned, seeded_catalog, GYM_EQUIPMENT};
use pierre_program_engine::catalog::ExerciseRepository;
use pierre_program_engine::models::{
    Exercise, ExperienceLevel, SlotRequirements, TrainingGoal, WorkoutType,
};
use pierre_program_engine::selection::DeterministicSelector;

const WORKOUT_TYPES: [WorkoutType; 7] = [
    WorkoutType::Push,
    WorkoutType::Pull,
    WorkoutType::Legs,
    WorkoutType::Upper,
    WorkoutType::Lower,
    WorkoutType::FullBody,
    WorkoutType::Arms,
];

fn ids(exercises: Vec<Exercise>) -> HashSet<String> {
    exercises.into_iter().map(|e| e.id).collect()
}

async fn requirements_for(
    workout_type: WorkoutType,
    equipment: &[&str],
    count: u32,
) -> Result<SlotRequirements> {
    let equipment = owned(equipment);
    let candidates = seeded_catalog()
        .get_for_workout_type(workout_type, &equipment, 50)
        .await?;
    Ok(
        SlotRequirements::new(workout_type, TrainingGoal::Hypertrophy, ExperienceLevel::Intermediate)
            .with_target_muscles(
                workout_type
                    .target_muscles()
                    .iter()
                    .map(|m| (*m).to_owned())
                    .collect(),
            )
            .with_equipment(equipment)
            .with_exercise_count(count)
            .with_candidates(candidates),
    )
}

#[tokio::test]
async fn test_gym_candidates_by_workout_type() -> Result<()> {
    init_test_logging();
    let catalog = seeded_catalog();
    let gym = owned(&GYM_EQUIPMENT);

    let push = ids(catalog.get_for_workout_type(WorkoutType::Push, &gym, 50).await?);
    let pull = ids(catalog.get_for_workout_type(WorkoutType::Pull, &gym, 50).await?);
    let legs = ids(catalog.get_for_workout_type(WorkoutType::Legs, &gym, 50).await?);

    for id in ["barbell-bench-press", "incline-dumbbell-press", "overhead-press", "push-up"] {
        assert!(push.contains(id), "push missing {id}");
    }
    assert!(pull.contains("barbell-row"));
    assert!(!pull.contains("pull-up"), "pull-up needs a bar");
    for id in ["barbell-squat", "romanian-deadlift", "calf-raise"] {
        assert!(legs.contains(id), "legs missing {id}");
    }
    Ok(())
}

#[tokio::test]
async fn test_selection_properties_hold_for_every_workout_type() -> Result<()> {
    init_test_logging();
    for equipment in [&GYM_EQUIPMENT[..], &["dumbbells"][..], &[][..]] {
        for workout_type in WORKOUT_TYPES {
            for count in [3, 5, 8] {
                let requirements = requirements_for(workout_type, equipment, count).await?;
                let selected = DeterministicSelector::select(&requirements);

                assert!(selected.len() <= count as usize);
                let unique: HashSet<&str> =
                    selected.iter().map(|c| c.exercise.id.as_str()).collect();
                assert_eq!(unique.len(), selected.len(), "{workout_type} duplicates");
                for candidate in &selected {
                    assert!(
                        candidate
                            .exercise
                            .equipment
                            .iter()
                            .all(|item| equipment.contains(&item.as_str())),
                        "{} needs equipment outside {equipment:?}",
                        candidate.exercise.id
                    );
                }

                // same input, same output
                let again = DeterministicSelector::select(&requirements);
                let first: Vec<&str> = selected.iter().map(|c| c.exercise.id.as_str()).collect();
                let second: Vec<&str> = again.iter().map(|c| c.exercise.id.as_str()).collect();
                assert_eq!(first, second);
            }
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_bodyweight_push_day() -> Result<()> {
    init_test_logging();
    let requirements = requirements_for(WorkoutType::Push, &[], 5).await?;

    let response = DeterministicSelector::fallback_response(&requirements);

    assert_eq!(response.exercise_ids(), vec!["push-up"]);
    assert_eq!(response.exercises[0].reps, "8-12");
    assert_eq!(response.exercises[0].sets, 4);
    Ok(())
}
