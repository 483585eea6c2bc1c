// ABOUTME: Criterion benchmarks for periodization, candidate ranking, and full generation
// ABOUTME: Measures the deterministic paths that run for every generated workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the program engine.
//!
//! Measures week planning across program lengths, ranking against the seeded
//! catalog, and end-to-end deterministic generation.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pierre_program_engine::catalog::{ExerciseRepository, InMemoryExerciseRepository};
use pierre_program_engine::generator::{GenerateProgramRequest, ProgramGenerator};
use pierre_program_engine::intelligence::{rank_candidates, PeriodizationService};
use pierre_program_engine::models::{
    ExperienceLevel, SlotRequirements, TrainingGoal, WorkoutType,
};
use pierre_program_engine::templates::InMemoryTemplateRepository;
use tokio::runtime::Runtime;

const GYM_EQUIPMENT: [&str; 4] = ["barbell", "dumbbells", "bench", "squat_rack"];

fn gym_equipment() -> Vec<String> {
    GYM_EQUIPMENT.iter().map(|e| (*e).to_owned()).collect()
}

/// Benchmark week planning for every model at several program lengths
fn bench_periodization(c: &mut Criterion) {
    let service = PeriodizationService::new();
    let mut group = c.benchmark_group("periodization");

    for weeks in [4_u32, 12, 52] {
        group.throughput(Throughput::Elements(u64::from(weeks)));
        for (goal, experience) in [
            (TrainingGoal::Hypertrophy, ExperienceLevel::Intermediate),
            (TrainingGoal::Strength, ExperienceLevel::Intermediate),
            (TrainingGoal::Strength, ExperienceLevel::Advanced),
            (TrainingGoal::Endurance, ExperienceLevel::Beginner),
        ] {
            let model = service.select_periodization_model(goal, experience, weeks);
            group.bench_with_input(
                BenchmarkId::new(model.as_str(), weeks),
                &weeks,
                |b, &weeks| {
                    b.iter(|| {
                        service.plan_progression(
                            black_box(weeks),
                            goal,
                            experience,
                            Some(model),
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark candidate ranking against the seeded catalog
fn bench_ranking(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let catalog = InMemoryExerciseRepository::seeded();
    let equipment = gym_equipment();
    let mut group = c.benchmark_group("ranking");

    for workout_type in [WorkoutType::Push, WorkoutType::Legs, WorkoutType::FullBody] {
        let candidates = rt
            .block_on(catalog.get_for_workout_type(workout_type, &equipment, 50))
            .unwrap();
        let requirements = SlotRequirements::new(
            workout_type,
            TrainingGoal::Hypertrophy,
            ExperienceLevel::Intermediate,
        )
        .with_target_muscles(
            workout_type
                .target_muscles()
                .iter()
                .map(|m| (*m).to_owned())
                .collect(),
        )
        .with_equipment(equipment.clone())
        .with_exercise_count(5)
        .with_candidates(candidates);

        group.bench_function(workout_type.as_str(), |b| {
            b.iter(|| rank_candidates(black_box(&requirements)));
        });
    }

    group.finish();
}

/// Benchmark deterministic generation end to end
fn bench_generation(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let generator = ProgramGenerator::new(
        Arc::new(InMemoryExerciseRepository::seeded()),
        Arc::new(InMemoryTemplateRepository::seeded()),
    );
    let mut group = c.benchmark_group("generation");
    group.sample_size(30);

    for (weeks, sessions) in [(4_u32, 3_u32), (12, 4), (24, 6)] {
        let request = GenerateProgramRequest::new(
            TrainingGoal::Hypertrophy,
            ExperienceLevel::Intermediate,
            weeks,
            sessions,
        )
        .with_equipment(&GYM_EQUIPMENT);

        group.throughput(Throughput::Elements(u64::from(weeks * sessions)));
        group.bench_with_input(
            BenchmarkId::new("deterministic", format!("{weeks}w_{sessions}s")),
            &request,
            |b, request| {
                b.iter(|| rt.block_on(async { generator.generate(black_box(request)).await }));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_periodization, bench_ranking, bench_generation);
criterion_main!(benches);
