// ABOUTME: Assembled training program and reusable program template models
// ABOUTME: Programs nest weeks, workouts, and exercises; templates describe the weekly skeleton
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::periodization::PeriodizationModel;
use super::selection::{ExerciseSelection, WorkoutType};
use super::training::{ExperienceLevel, TrainingGoal};

// ============================================================================
// Assembled Program
// ============================================================================

/// Exercise placed in a workout
///
/// Carries the exercise's primary muscles and equipment so a program can be
/// validated without consulting the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramExercise {
    /// Prescription
    #[serde(flatten)]
    pub selection: ExerciseSelection,
    /// Primary muscles of the exercise
    #[serde(default)]
    pub primary_muscles: Vec<String>,
    /// Equipment the exercise requires
    #[serde(default)]
    pub equipment: Vec<String>,
}

/// One training session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramWorkout {
    /// Day of week (1 = Monday)
    pub day_of_week: u32,
    /// Display name ("Push Day")
    pub name: String,
    /// Workout type
    pub workout_type: WorkoutType,
    /// Planned duration
    pub target_duration_minutes: u32,
    /// Session notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Exercises in performance order
    pub exercises: Vec<ProgramExercise>,
}

impl ProgramWorkout {
    /// Whether the exercise id appears in this workout
    #[must_use]
    pub fn contains(&self, exercise_id: &str) -> bool {
        self.exercises
            .iter()
            .any(|e| e.selection.exercise_id == exercise_id)
    }
}

/// One week of a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramWeek {
    /// 1-based index
    pub week_number: u32,
    /// Focus label ("Volume Accumulation")
    pub focus: String,
    /// Intensity (0.0-1.0)
    pub intensity_percent: f64,
    /// Volume multiplier (0.0-2.0)
    pub volume_modifier: f64,
    /// Recovery week
    pub is_deload: bool,
    /// Week note from periodization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Sessions in day order
    pub workouts: Vec<ProgramWorkout>,
}

/// Complete generated program, ready to persist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingProgram {
    /// Program id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Summary sentence
    pub description: String,
    /// Goal
    pub goal: TrainingGoal,
    /// Athlete experience
    pub experience_level: ExperienceLevel,
    /// Periodization model in use
    pub periodization_model: PeriodizationModel,
    /// Weeks
    pub duration_weeks: u32,
    /// Sessions per week
    pub sessions_per_week: u32,
    /// Equipment available to the athlete
    pub available_equipment: Vec<String>,
    /// Weeks in order
    pub weeks: Vec<ProgramWeek>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl TrainingProgram {
    /// Every workout of every week, in order
    pub fn workouts(&self) -> impl Iterator<Item = (&ProgramWeek, &ProgramWorkout)> {
        self.weeks
            .iter()
            .flat_map(|week| week.workouts.iter().map(move |workout| (week, workout)))
    }

    /// Total exercise entries across the program
    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.workouts().map(|(_, w)| w.exercises.len()).sum()
    }
}

// ============================================================================
// Templates
// ============================================================================

/// Workout within a template week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSlot {
    /// Day of week (1 = Monday)
    pub day_of_week: u32,
    /// Display name
    pub name: String,
    /// Workout type
    pub workout_type: WorkoutType,
    /// Muscles the workout targets
    pub muscle_groups: Vec<String>,
    /// Number of exercises to select
    pub exercise_slots: u32,
    /// Planned duration
    pub target_duration_minutes: u32,
}

/// Repeating week layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPattern {
    /// Focus text for the week
    pub focus: String,
    /// Workouts in day order
    pub workouts: Vec<WorkoutSlot>,
}

/// Skeleton shared by every week of a program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramStructure {
    /// Weeks per mesocycle
    pub mesocycle_length: u32,
    /// Weeks between deloads
    pub deload_frequency: u32,
    /// Split identifier ("push_pull_legs")
    pub split_type: String,
    /// Week layouts; the first one drives generation
    pub weeks: Vec<WeekPattern>,
}

impl ProgramStructure {
    /// Workouts of the first week pattern
    #[must_use]
    pub fn first_week_workouts(&self) -> &[WorkoutSlot] {
        self.weeks.first().map_or(&[], |w| w.workouts.as_slice())
    }
}

/// Stored program template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramTemplate {
    /// Template id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Goal served
    pub goal: TrainingGoal,
    /// Experience served
    pub experience_level: ExperienceLevel,
    /// Intended duration
    pub duration_weeks: u32,
    /// Times the template has been used
    pub usage_count: u64,
    /// Shipped with the system rather than created by a user
    pub is_system: bool,
    /// Creator for user templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Weekly skeleton
    pub structure: ProgramStructure,
}

impl ProgramTemplate {
    /// Sessions per week implied by the first week pattern
    #[must_use]
    pub fn sessions_per_week(&self) -> Option<usize> {
        self.structure.weeks.first().map(|w| w.workouts.len())
    }
}
