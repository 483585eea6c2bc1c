// ABOUTME: Core data models for the Pierre program engine
// ABOUTME: Re-exports goals, exercises, week parameters, selections, programs, and validation records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain serializable records passed between the engine's components. None of
//! these types own storage; callers persist a finished `TrainingProgram`
//! however they like.
//!
//! ## Core Models
//!
//! - `TrainingGoal`, `ExperienceLevel`: who the program is for
//! - `Exercise`: read-only catalog entry
//! - `WeekParameters`: periodization output for one week
//! - `SlotRequirements`, `ExerciseSelectionResponse`: selector input and output
//! - `TrainingProgram`, `ProgramTemplate`: assembled program and reusable skeleton
//! - `ValidationResult`: findings from program validation

// Domain modules
mod exercise;
mod periodization;
mod program;
mod selection;
mod training;
mod validation;

/// Equipment presets, aliases, and subset checks
pub mod equipment;

// Training domain
pub use training::{ExperienceLevel, TrainingGoal};

// Exercise catalog
pub use exercise::{Exercise, ExerciseCategory, MovementPattern};

// Periodization
pub use periodization::{BlockPhase, EffortType, PeriodizationModel, TrainingFocus, WeekParameters};

// Selection
pub use selection::{
    ExerciseCandidate, ExerciseSelection, ExerciseSelectionResponse, SlotRequirements, WorkoutType,
};

// Programs and templates
pub use program::{
    ProgramExercise, ProgramStructure, ProgramTemplate, ProgramWeek, ProgramWorkout,
    TrainingProgram, WeekPattern, WorkoutSlot,
};

// Validation
pub use validation::{Severity, ValidationIssue, ValidationResult};
