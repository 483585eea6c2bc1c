// ABOUTME: Exercise selection request and response models
// ABOUTME: Slot requirements, scored candidates, and the selections a workout is built from
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::exercise::{Exercise, ExerciseCategory, MovementPattern};
use super::training::{ExperienceLevel, TrainingGoal};
use crate::constants::selection::{
    DEFAULT_DURATION_MINUTES, MAX_EXERCISE_COUNT, MAX_LIMITATIONS_COUNT, MIN_EXERCISE_COUNT,
};
use crate::errors::{AppError, AppResult};

/// Kind of workout a slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Chest, shoulders, triceps
    Push,
    /// Back, rear delts, biceps
    Pull,
    /// Lower body
    Legs,
    /// Upper body
    Upper,
    /// Lower body (upper/lower split)
    Lower,
    /// Whole body
    FullBody,
    /// Arms and core
    Arms,
}

impl WorkoutType {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Legs => "legs",
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::FullBody => "full_body",
            Self::Arms => "arms",
        }
    }

    /// Primary muscles a catalog lookup for this workout type targets
    #[must_use]
    pub const fn target_muscles(&self) -> &'static [&'static str] {
        match self {
            Self::Push => &["chest", "anterior_deltoid", "triceps"],
            Self::Pull => &["lats", "rhomboids", "biceps", "rear_deltoid"],
            Self::Legs | Self::Lower => &["quadriceps", "hamstrings", "glutes", "calves"],
            Self::Upper => &["chest", "lats", "anterior_deltoid", "triceps", "biceps"],
            Self::FullBody => &["chest", "lats", "quadriceps", "hamstrings", "glutes"],
            Self::Arms => &["biceps", "triceps", "forearms", "core"],
        }
    }
}

impl Display for WorkoutType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "push" => Ok(Self::Push),
            "pull" => Ok(Self::Pull),
            "legs" => Ok(Self::Legs),
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "full_body" => Ok(Self::FullBody),
            "arms" => Ok(Self::Arms),
            other => Err(AppError::invalid_input(format!(
                "Unknown workout type: '{other}'. Valid options: push, pull, legs, upper, lower, full_body, arms"
            ))),
        }
    }
}

/// Everything a selector needs to fill one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRequirements {
    /// Workout being filled
    pub workout_type: WorkoutType,
    /// Muscles the workout should train
    pub target_muscles: Vec<String>,
    /// Equipment the athlete has (raw; normalized by consumers)
    pub available_equipment: Vec<String>,
    /// Preferred movement pattern, if any
    pub movement_pattern: Option<MovementPattern>,
    /// Category rewarded by the scorer
    pub reference_category: ExerciseCategory,
    /// Number of exercises wanted (3-12)
    pub exercise_count: u32,
    /// Program goal
    pub goal: TrainingGoal,
    /// Athlete experience
    pub experience_level: ExperienceLevel,
    /// Week intensity (0.0-1.0)
    pub intensity_percent: f64,
    /// Week volume multiplier (0.0-2.0)
    pub volume_modifier: f64,
    /// Recovery week
    pub is_deload: bool,
    /// Injuries or restrictions in the athlete's own words
    pub limitations: Vec<String>,
    /// Exercises the selector may choose from
    pub candidates: Vec<Exercise>,
}

impl SlotRequirements {
    /// Requirements with neutral week parameters and no candidates
    #[must_use]
    pub fn new(
        workout_type: WorkoutType,
        goal: TrainingGoal,
        experience_level: ExperienceLevel,
    ) -> Self {
        Self {
            workout_type,
            target_muscles: Vec::new(),
            available_equipment: Vec::new(),
            movement_pattern: None,
            reference_category: ExerciseCategory::Compound,
            exercise_count: 5,
            goal,
            experience_level,
            intensity_percent: 0.75,
            volume_modifier: 1.0,
            is_deload: false,
            limitations: Vec::new(),
            candidates: Vec::new(),
        }
    }

    /// Set target muscles
    #[must_use]
    pub fn with_target_muscles(mut self, muscles: Vec<String>) -> Self {
        self.target_muscles = muscles;
        self
    }

    /// Set available equipment
    #[must_use]
    pub fn with_equipment(mut self, equipment: Vec<String>) -> Self {
        self.available_equipment = equipment;
        self
    }

    /// Prefer a movement pattern
    #[must_use]
    pub const fn with_movement_pattern(mut self, pattern: MovementPattern) -> Self {
        self.movement_pattern = Some(pattern);
        self
    }

    /// Set the category rewarded by scoring
    #[must_use]
    pub const fn with_reference_category(mut self, category: ExerciseCategory) -> Self {
        self.reference_category = category;
        self
    }

    /// Set the number of exercises wanted
    #[must_use]
    pub const fn with_exercise_count(mut self, count: u32) -> Self {
        self.exercise_count = count;
        self
    }

    /// Apply a week's intensity, volume, and deload flag
    #[must_use]
    pub const fn with_week(mut self, intensity: f64, volume: f64, is_deload: bool) -> Self {
        self.intensity_percent = intensity;
        self.volume_modifier = volume;
        self.is_deload = is_deload;
        self
    }

    /// Set limitations, keeping at most ten
    #[must_use]
    pub fn with_limitations(mut self, limitations: Vec<String>) -> Self {
        self.limitations = limitations.into_iter().take(MAX_LIMITATIONS_COUNT).collect();
        self
    }

    /// Set candidate exercises
    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<Exercise>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Check numeric ranges
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when the exercise count, intensity, or volume
    /// falls outside its allowed range.
    pub fn validate(&self) -> AppResult<()> {
        if !(MIN_EXERCISE_COUNT..=MAX_EXERCISE_COUNT).contains(&self.exercise_count) {
            return Err(AppError::out_of_range(format!(
                "exercise_count must be between {MIN_EXERCISE_COUNT} and {MAX_EXERCISE_COUNT}, got {}",
                self.exercise_count
            )));
        }
        if !(0.0..=1.0).contains(&self.intensity_percent) {
            return Err(AppError::out_of_range(format!(
                "intensity_percent must be between 0.0 and 1.0, got {}",
                self.intensity_percent
            )));
        }
        if !(0.0..=2.0).contains(&self.volume_modifier) {
            return Err(AppError::out_of_range(format!(
                "volume_modifier must be between 0.0 and 2.0, got {}",
                self.volume_modifier
            )));
        }
        Ok(())
    }
}

/// A catalog exercise with its fit score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCandidate {
    /// The exercise
    pub exercise: Exercise,
    /// Fit score in 0.0-1.0
    pub score: f64,
}

/// One exercise chosen for a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSelection {
    /// Catalog id
    pub exercise_id: String,
    /// Display name
    pub exercise_name: String,
    /// Working sets (1-10)
    pub sets: u32,
    /// Rep target, e.g. "8-12"
    pub reps: String,
    /// Rest between sets (30-300)
    pub rest_seconds: u32,
    /// Position in the workout, starting at 1
    pub order: u32,
    /// Exercises sharing a group are performed back to back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superset_group: Option<String>,
    /// Coaching cue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Selector output for one workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSelectionResponse {
    /// Ordered selections
    pub exercises: Vec<ExerciseSelection>,
    /// Notes for the whole session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_notes: Option<String>,
    /// Estimated duration (20-120)
    pub estimated_duration_minutes: u32,
}

impl ExerciseSelectionResponse {
    /// Empty response with the default duration
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            exercises: Vec::new(),
            workout_notes: None,
            estimated_duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }

    /// Ids in selection order
    #[must_use]
    pub fn exercise_ids(&self) -> Vec<&str> {
        self.exercises.iter().map(|e| e.exercise_id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let base = SlotRequirements::new(
            WorkoutType::Push,
            TrainingGoal::Strength,
            ExperienceLevel::Beginner,
        );
        assert!(base.clone().validate().is_ok());

        let error = base.clone().with_exercise_count(2).validate().unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        assert!(base.clone().with_exercise_count(13).validate().is_err());
        assert!(base.clone().with_week(1.2, 1.0, false).validate().is_err());
        assert!(base.with_week(0.7, 2.5, false).validate().is_err());
    }

    #[test]
    fn test_limitations_capped() {
        let many = (0..15).map(|i| format!("issue {i}")).collect();
        let req = SlotRequirements::new(
            WorkoutType::Legs,
            TrainingGoal::Endurance,
            ExperienceLevel::Advanced,
        )
        .with_limitations(many);
        assert_eq!(req.limitations.len(), 10);
    }

    #[test]
    fn test_workout_type_round_trip() {
        assert_eq!("full_body".parse::<WorkoutType>().unwrap(), WorkoutType::FullBody);
        assert_eq!(WorkoutType::Arms.to_string(), "arms");
    }
}
