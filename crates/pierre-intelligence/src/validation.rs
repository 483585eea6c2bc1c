// ABOUTME: Program validator checking equipment, volume, uniqueness, balance, and limitations
// ABOUTME: Produces structured findings instead of failing so callers can decide what to do
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Program Validation
//!
//! Static checks over an assembled [`TrainingProgram`]. Error-severity issues
//! make the program invalid; warnings are advisory.
//!
//! | Check | Severity | Scope |
//! |-------|----------|-------|
//! | Equipment availability | error | every exercise |
//! | Weekly volume per major muscle | warning | every week |
//! | Duplicate exercise in a workout | error | every workout |
//! | Opposing muscle balance | warning | whole program |
//! | Limitation conflicts | warning | every exercise |

use std::collections::{BTreeSet, HashMap, HashSet};
use std::slice;

use pierre_core::constants::validation::{MAJOR_MUSCLES, MAX_BALANCE_RATIO};
use pierre_core::models::equipment::{missing_equipment, normalize_equipment};
use pierre_core::models::{
    ExperienceLevel, ProgramWeek, ProgramWorkout, Severity, TrainingProgram, ValidationIssue,
    ValidationResult,
};
use tracing::debug;

/// Opposing muscle groups compared for balance
const BALANCE_PAIRS: [(&[&str], &[&str]); 3] = [
    (&["chest", "anterior_deltoid"], &["lats", "rhomboids", "rear_deltoid"]),
    (&["quadriceps"], &["hamstrings", "glutes"]),
    (&["biceps"], &["triceps"]),
];

/// Muscles stressed by common limitation keywords
const LIMITATION_MUSCLES: [(&str, &[&str]); 7] = [
    ("shoulder", &["anterior_deltoid", "rear_deltoid", "lateral_deltoid"]),
    ("back", &["lats", "rhomboids", "erector_spinae", "lower_back"]),
    ("knee", &["quadriceps", "hamstrings"]),
    ("hip", &["hip_flexors", "glutes", "adductors"]),
    ("wrist", &["forearms"]),
    ("elbow", &["biceps", "triceps", "forearms"]),
    ("ankle", &["calves", "tibialis"]),
];

/// What the athlete brings to the program
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Available equipment (raw; normalized on construction)
    pub available_equipment: BTreeSet<String>,
    /// Athlete experience, drives volume bounds
    pub experience_level: ExperienceLevel,
    /// Injuries or restrictions
    pub limitations: Vec<String>,
}

impl ValidationContext {
    /// Build a context, normalizing equipment
    #[must_use]
    pub fn new<S: AsRef<str>>(
        available_equipment: &[S],
        experience_level: ExperienceLevel,
        limitations: Vec<String>,
    ) -> Self {
        Self {
            available_equipment: normalize_equipment(available_equipment),
            experience_level,
            limitations,
        }
    }

    fn muscles_to_avoid(&self) -> HashSet<&'static str> {
        let mut muscles = HashSet::new();
        for limitation in &self.limitations {
            let lowered = limitation.to_lowercase();
            for (keyword, affected) in LIMITATION_MUSCLES {
                if lowered.contains(keyword) {
                    muscles.extend(affected.iter().copied());
                }
            }
        }
        muscles
    }
}

/// Weekly set bounds used by the volume check
const fn volume_bounds(experience: ExperienceLevel) -> (u32, u32) {
    match experience {
        ExperienceLevel::Beginner => (8, 12),
        ExperienceLevel::Intermediate => (12, 18),
        ExperienceLevel::Advanced => (16, 25),
    }
}

fn workout_location(week_number: u32, workout: &ProgramWorkout) -> String {
    format!("Week {week_number}, {}", workout.name)
}

/// Static program checker
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramValidator;

impl ProgramValidator {
    /// Create a validator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run every check over a program
    #[must_use]
    pub fn validate_program(
        &self,
        program: &TrainingProgram,
        context: &ValidationContext,
    ) -> ValidationResult {
        let mut issues = Vec::new();

        for week in &program.weeks {
            for workout in &week.workouts {
                Self::check_equipment(week.week_number, workout, context, &mut issues);
            }
            Self::check_volume(week, context.experience_level, &mut issues);
            for workout in &week.workouts {
                Self::check_uniqueness(week.week_number, workout, &mut issues);
            }
        }
        Self::check_balance(&program.weeks, &mut issues);
        Self::check_limitations(&program.weeks, context, &mut issues);

        let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
        let warnings = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count();
        let is_valid = errors == 0;
        let summary = if issues.is_empty() {
            "Program validated successfully with no issues.".to_owned()
        } else if is_valid {
            format!("Program valid with {warnings} warning(s).")
        } else {
            format!("Program invalid: {errors} error(s), {warnings} warning(s).")
        };

        debug!(
            program_id = %program.id,
            errors,
            warnings,
            "Program validation complete"
        );

        ValidationResult {
            is_valid,
            issues,
            summary,
        }
    }

    /// Equipment, uniqueness, and limitation checks for one workout
    #[must_use]
    pub fn validate_workout(
        &self,
        workout: &ProgramWorkout,
        context: &ValidationContext,
    ) -> ValidationResult {
        let mut issues = Vec::new();
        Self::check_equipment(1, workout, context, &mut issues);
        Self::check_uniqueness(1, workout, &mut issues);

        let week = ProgramWeek {
            week_number: 1,
            focus: String::new(),
            intensity_percent: 0.0,
            volume_modifier: 1.0,
            is_deload: false,
            notes: None,
            workouts: vec![workout.clone()],
        };
        Self::check_limitations(slice::from_ref(&week), context, &mut issues);

        let is_valid = !issues.iter().any(|i| i.severity == Severity::Error);
        let summary = format!(
            "Workout {}: {} issue(s)",
            if is_valid { "valid" } else { "invalid" },
            issues.len()
        );
        ValidationResult {
            is_valid,
            issues,
            summary,
        }
    }

    fn check_equipment(
        week_number: u32,
        workout: &ProgramWorkout,
        context: &ValidationContext,
        issues: &mut Vec<ValidationIssue>,
    ) {
        for exercise in &workout.exercises {
            let missing = missing_equipment(&exercise.equipment, &context.available_equipment);
            if missing.is_empty() {
                continue;
            }
            let usable: Vec<String> = normalize_equipment(&exercise.equipment)
                .intersection(&context.available_equipment)
                .cloned()
                .collect();
            let replacement = if usable.is_empty() {
                "bodyweight".to_owned()
            } else {
                usable.join(", ")
            };
            issues.push(
                ValidationIssue::error(
                    format!(
                        "Exercise '{}' requires unavailable equipment: {}",
                        exercise.selection.exercise_name,
                        missing.join(", ")
                    ),
                    workout_location(week_number, workout),
                )
                .with_suggestion(format!("Replace with an exercise using: {replacement}")),
            );
        }
    }

    fn check_volume(week: &ProgramWeek, experience: ExperienceLevel, issues: &mut Vec<ValidationIssue>) {
        let mut sets_by_muscle: HashMap<&str, u32> = HashMap::new();
        for workout in &week.workouts {
            for exercise in &workout.exercises {
                for muscle in &exercise.primary_muscles {
                    *sets_by_muscle.entry(muscle.as_str()).or_default() += exercise.selection.sets;
                }
            }
        }

        let (mut min_sets, mut max_sets) = volume_bounds(experience);
        if week.is_deload {
            min_sets /= 2;
            max_sets /= 2;
        }

        let location = format!("Week {}", week.week_number);
        for muscle in MAJOR_MUSCLES {
            let sets = sets_by_muscle.get(muscle).copied().unwrap_or(0);
            if sets > 0 && sets < min_sets {
                issues.push(
                    ValidationIssue::warning(
                        format!("Low volume for {muscle}: {sets} sets (minimum: {min_sets})"),
                        location.clone(),
                    )
                    .with_suggestion(format!("Consider adding more {muscle} exercises")),
                );
            } else if sets > max_sets {
                issues.push(
                    ValidationIssue::warning(
                        format!("High volume for {muscle}: {sets} sets (maximum: {max_sets})"),
                        location.clone(),
                    )
                    .with_suggestion(format!(
                        "Consider reducing {muscle} volume to prevent overtraining"
                    )),
                );
            }
        }
    }

    fn check_uniqueness(week_number: u32, workout: &ProgramWorkout, issues: &mut Vec<ValidationIssue>) {
        let mut seen = HashSet::new();
        for exercise in &workout.exercises {
            if !seen.insert(exercise.selection.exercise_id.as_str()) {
                issues.push(
                    ValidationIssue::error(
                        format!(
                            "Duplicate exercise '{}' in same workout",
                            exercise.selection.exercise_name
                        ),
                        workout_location(week_number, workout),
                    )
                    .with_suggestion("Replace duplicate with a variation or different exercise"),
                );
            }
        }
    }

    fn check_balance(weeks: &[ProgramWeek], issues: &mut Vec<ValidationIssue>) {
        let mut totals: HashMap<&str, u32> = HashMap::new();
        for week in weeks {
            for workout in &week.workouts {
                for exercise in &workout.exercises {
                    for muscle in &exercise.primary_muscles {
                        *totals.entry(muscle.as_str()).or_default() += exercise.selection.sets;
                    }
                }
            }
        }
        let sum = |muscles: &[&str]| -> u32 {
            muscles.iter().map(|m| totals.get(m).copied().unwrap_or(0)).sum()
        };

        for (push_side, pull_side) in BALANCE_PAIRS {
            let push = sum(push_side);
            let pull = sum(pull_side);
            if push == 0 || pull == 0 {
                continue;
            }
            let ratio = f64::from(push.max(pull)) / f64::from(push.min(pull));
            if ratio > MAX_BALANCE_RATIO {
                let lacking = if push > pull { "pull" } else { "push" };
                issues.push(
                    ValidationIssue::warning(
                        format!("Muscle imbalance detected: {push} push sets vs {pull} pull sets"),
                        "Program-wide",
                    )
                    .with_suggestion(format!("Consider adding more {lacking} exercises")),
                );
            }
        }
    }

    fn check_limitations(
        weeks: &[ProgramWeek],
        context: &ValidationContext,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let avoid = context.muscles_to_avoid();
        if avoid.is_empty() {
            return;
        }

        for week in weeks {
            for workout in &week.workouts {
                for exercise in &workout.exercises {
                    let affected: Vec<&str> = exercise
                        .primary_muscles
                        .iter()
                        .map(String::as_str)
                        .filter(|m| avoid.contains(m))
                        .collect();
                    if affected.is_empty() {
                        continue;
                    }
                    issues.push(
                        ValidationIssue::warning(
                            format!(
                                "Exercise '{}' may aggravate limitation: targets {}",
                                exercise.selection.exercise_name,
                                affected.join(", ")
                            ),
                            workout_location(week.week_number, workout),
                        )
                        .with_suggestion("Consider replacing with a safer alternative"),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pierre_core::models::{
        ExerciseSelection, PeriodizationModel, ProgramExercise, TrainingGoal, WorkoutType,
    };
    use uuid::Uuid;

    fn exercise(id: &str, sets: u32, muscles: &[&str], equipment: &[&str]) -> ProgramExercise {
        ProgramExercise {
            selection: ExerciseSelection {
                exercise_id: id.to_owned(),
                exercise_name: id.to_owned(),
                sets,
                reps: "8-12".to_owned(),
                rest_seconds: 90,
                order: 1,
                superset_group: None,
                notes: None,
            },
            primary_muscles: muscles.iter().map(|m| (*m).to_owned()).collect(),
            equipment: equipment.iter().map(|e| (*e).to_owned()).collect(),
        }
    }

    fn workout(day: u32, exercises: Vec<ProgramExercise>) -> ProgramWorkout {
        ProgramWorkout {
            day_of_week: day,
            name: format!("Day {day}"),
            workout_type: WorkoutType::FullBody,
            target_duration_minutes: 60,
            notes: None,
            exercises,
        }
    }

    fn program(workouts: Vec<ProgramWorkout>, is_deload: bool) -> TrainingProgram {
        TrainingProgram {
            id: Uuid::new_v4(),
            name: "Test Program".to_owned(),
            description: String::new(),
            goal: TrainingGoal::Hypertrophy,
            experience_level: ExperienceLevel::Intermediate,
            periodization_model: PeriodizationModel::Linear,
            duration_weeks: 1,
            sessions_per_week: workouts.len() as u32,
            available_equipment: Vec::new(),
            weeks: vec![ProgramWeek {
                week_number: 1,
                focus: "Muscle Building".to_owned(),
                intensity_percent: 0.7,
                volume_modifier: 1.0,
                is_deload,
                notes: None,
                workouts,
            }],
            created_at: Utc::now(),
        }
    }

    fn context(equipment: &[&str], limitations: &[&str]) -> ValidationContext {
        ValidationContext::new(
            equipment,
            ExperienceLevel::Intermediate,
            limitations.iter().map(|l| (*l).to_owned()).collect(),
        )
    }

    #[test]
    fn test_clean_program_has_no_issues() {
        let program = program(
            vec![workout(1, vec![exercise("push-up", 3, &["triceps"], &[])])],
            false,
        );
        let result = ProgramValidator::new().validate_program(&program, &context(&[], &[]));
        assert!(result.is_valid);
        assert_eq!(result.summary, "Program validated successfully with no issues.");
    }

    #[test]
    fn test_missing_equipment_is_error() {
        let program = program(
            vec![workout(
                1,
                vec![exercise("barbell-squat", 3, &["calves"], &["barbell", "squat_rack"])],
            )],
            false,
        );
        let result = ProgramValidator::new().validate_program(&program, &context(&["barbell"], &[]));
        assert!(!result.is_valid);
        let error = result.errors().next().unwrap();
        assert_eq!(
            error.message,
            "Exercise 'barbell-squat' requires unavailable equipment: rack"
        );
        assert_eq!(error.location, "Week 1, Day 1");
        assert_eq!(
            error.suggestion.as_deref(),
            Some("Replace with an exercise using: barbell")
        );
        assert_eq!(result.summary, "Program invalid: 1 error(s), 0 warning(s).");
    }

    #[test]
    fn test_aliases_satisfy_equipment() {
        let program = program(
            vec![workout(1, vec![exercise("row", 3, &["biceps"], &["dumbbell"])])],
            false,
        );
        let result = ProgramValidator::new().validate_program(&program, &context(&["dumbbells"], &[]));
        assert!(result.is_valid);
    }

    #[test]
    fn test_duplicates_only_flagged_within_a_workout() {
        let curl = || exercise("dumbbell-curl", 3, &["biceps"], &[]);
        let across = program(vec![workout(1, vec![curl()]), workout(3, vec![curl()])], false);
        assert!(ProgramValidator::new()
            .validate_program(&across, &context(&[], &[]))
            .is_valid);

        let within = program(vec![workout(1, vec![curl(), curl()])], false);
        let result = ProgramValidator::new().validate_program(&within, &context(&[], &[]));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors().next().unwrap().message,
            "Duplicate exercise 'dumbbell-curl' in same workout"
        );
    }

    #[test]
    fn test_volume_bounds_halve_on_deload() {
        let chest = |sets| vec![workout(1, vec![exercise("bench", sets, &["chest"], &[])])];

        let low = ProgramValidator::new().validate_program(&program(chest(6), false), &context(&[], &[]));
        assert!(low
            .warnings()
            .any(|w| w.message == "Low volume for chest: 6 sets (minimum: 12)"));

        let deload = ProgramValidator::new().validate_program(&program(chest(6), true), &context(&[], &[]));
        assert_eq!(deload.warning_count(), 0);

        let high = ProgramValidator::new().validate_program(&program(chest(10), true), &context(&[], &[]));
        assert!(high
            .warnings()
            .any(|w| w.message == "High volume for chest: 10 sets (maximum: 9)"));
    }

    #[test]
    fn test_imbalance_warning() {
        let program = program(
            vec![workout(
                1,
                vec![
                    exercise("curl", 6, &["biceps"], &[]),
                    exercise("pushdown", 2, &["triceps"], &[]),
                ],
            )],
            false,
        );
        let result = ProgramValidator::new().validate_program(&program, &context(&[], &[]));
        let warning = result.warnings().next().unwrap();
        assert_eq!(warning.message, "Muscle imbalance detected: 6 push sets vs 2 pull sets");
        assert_eq!(warning.location, "Program-wide");
        assert_eq!(
            warning.suggestion.as_deref(),
            Some("Consider adding more pull exercises")
        );
        assert_eq!(result.summary, "Program valid with 1 warning(s).");
    }

    #[test]
    fn test_limitation_keyword_matches_case_insensitively() {
        let workout = workout(
            1,
            vec![
                exercise("overhead-press", 3, &["anterior_deltoid"], &[]),
                exercise("leg-curl", 3, &["calves"], &[]),
            ],
        );
        let result = ProgramValidator::new()
            .validate_workout(&workout, &context(&[], &["Left SHOULDER pain"]));
        assert!(result.is_valid);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(
            result.issues[0].message,
            "Exercise 'overhead-press' may aggravate limitation: targets anterior_deltoid"
        );
        assert_eq!(result.summary, "Workout valid: 1 issue(s)");
    }
}
