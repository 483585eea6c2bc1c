// ABOUTME: Program generator orchestrating templates, periodization, selection, and validation
// ABOUTME: Always produces a program; missing templates, model outages, and empty catalogs degrade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Program Generation
//!
//! [`ProgramGenerator::generate`] turns a [`GenerateProgramRequest`] into a
//! complete [`TrainingProgram`]:
//!
//! 1. pick the best stored template, or synthesize a default split
//! 2. choose a periodization model and plan every week
//! 3. fill each workout of each week through the model-backed selector when
//!    one is configured, otherwise through deterministic ranking
//! 4. validate the assembled program
//!
//! Generation only fails for an invalid request or a misconfigured engine.
//! Validation findings come back in [`GeneratedProgram::validation`].

/// Generation request
pub mod request;

pub use request::GenerateProgramRequest;

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use pierre_core::constants::selection::{
    MAX_EXERCISE_COUNT, MIN_EXERCISE_COUNT, WORKOUT_CANDIDATE_LIMIT,
};
use pierre_core::constants::templates::{DELOAD_SLOT_REDUCTION, MIN_DELOAD_SLOTS};
use pierre_core::models::{
    Exercise, ExerciseSelection, ExerciseSelectionResponse, PeriodizationModel, ProgramExercise,
    ProgramStructure, ProgramWeek, ProgramWorkout, SlotRequirements, TrainingGoal,
    TrainingProgram, ValidationResult, WeekParameters, WorkoutSlot,
};
use pierre_intelligence::{PeriodizationService, ProgramValidator, ValidationContext};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::catalog::ExerciseRepository;
use crate::config::EngineConfig;
use crate::errors::AppResult;
use crate::llm::OpenAiCompatibleProvider;
use crate::logging::EngineLogger;
use crate::selection::{placeholder_exercise, DeterministicSelector, LlmExerciseSelector, RepScheme};
use crate::templates::splits::goal_focus;
use crate::templates::{TemplateRepository, TemplateSelector};

const DELOAD_WEEK_FOCUS: &str = "Recovery & Deload";
const PLACEHOLDER_NOTES: &str = "Placeholder: swap in an exercise you can perform";
const FALLBACK_NOTICE: &str =
    "AI exercise selection was unavailable for some workouts; catalog ranking was used instead";

/// How a program was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Template the structure came from; `None` for the default split
    pub template_id: Option<Uuid>,
    /// Periodization model in use
    pub periodization_model: PeriodizationModel,
    /// When generation finished
    pub generated_at: DateTime<Utc>,
    /// Wall time spent generating
    pub generation_time_ms: u64,
    /// At least one workout came from the language model
    pub llm_used: bool,
    /// Workouts where the model failed and ranking filled in
    pub fallback_count: u32,
    /// Validation found no errors
    pub validation_passed: bool,
    /// Validation warnings
    pub warning_count: usize,
}

/// Generator output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedProgram {
    /// The assembled program
    pub program: TrainingProgram,
    /// Validator findings
    pub validation: ValidationResult,
    /// Provenance
    pub metadata: GenerationMetadata,
    /// Human-readable notes about choices made during generation
    pub suggestions: Vec<String>,
}

/// Running counts across one generation
#[derive(Debug, Default)]
struct GenerationTally {
    llm_workouts: u32,
    fallback_count: u32,
    notices: Vec<String>,
}

impl GenerationTally {
    fn notice(&mut self, text: String) {
        if !self.notices.contains(&text) {
            self.notices.push(text);
        }
    }
}

/// Top-level program generation service
#[derive(Clone)]
pub struct ProgramGenerator {
    catalog: Arc<dyn ExerciseRepository>,
    templates: TemplateSelector,
    periodization: PeriodizationService,
    validator: ProgramValidator,
    llm: Option<LlmExerciseSelector>,
}

impl ProgramGenerator {
    /// Deterministic generator with default periodization tables
    #[must_use]
    pub fn new(catalog: Arc<dyn ExerciseRepository>, templates: Arc<dyn TemplateRepository>) -> Self {
        Self {
            catalog,
            templates: TemplateSelector::new(templates),
            periodization: PeriodizationService::new(),
            validator: ProgramValidator::new(),
            llm: None,
        }
    }

    /// Replace the periodization service
    #[must_use]
    pub fn with_periodization(mut self, periodization: PeriodizationService) -> Self {
        self.periodization = periodization;
        self
    }

    /// Route workout selection through a language model
    #[must_use]
    pub fn with_llm_selector(mut self, selector: LlmExerciseSelector) -> Self {
        self.llm = Some(selector);
        self
    }

    /// Build a generator from engine configuration
    ///
    /// The model-backed selector is wired in only when an API key is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the configuration fails validation, or an
    /// internal error when the HTTP client cannot be built.
    pub fn from_config(
        config: &EngineConfig,
        catalog: Arc<dyn ExerciseRepository>,
        templates: Arc<dyn TemplateRepository>,
    ) -> AppResult<Self> {
        config.validate()?;
        let periodization = PeriodizationService::with_config(config.periodization.clone())?;
        let generator = Self::new(catalog, templates).with_periodization(periodization);

        if !config.llm.is_enabled() {
            info!("No LLM API key configured, exercise selection is deterministic");
            return Ok(generator);
        }

        let provider = OpenAiCompatibleProvider::from_llm_config(&config.llm)?;
        let selector = LlmExerciseSelector::new(
            Arc::new(provider),
            config.llm.model.clone(),
            &config.retry,
            &config.cache,
        )?;
        Ok(generator.with_llm_selector(selector))
    }

    /// Whether a model-backed selector is configured
    #[must_use]
    pub const fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Generate a complete program
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` or `InvalidInput` when the request is invalid.
    /// Template, catalog, and model failures never fail generation.
    #[instrument(skip(self, request), fields(goal = %request.goal, weeks = request.duration_weeks))]
    pub async fn generate(&self, request: &GenerateProgramRequest) -> AppResult<GeneratedProgram> {
        request.validate()?;
        let started = Instant::now();
        info!(
            goal = %request.goal,
            experience = %request.experience_level,
            weeks = request.duration_weeks,
            sessions = request.sessions_per_week,
            "Generating program"
        );

        let mut suggestions = Vec::new();
        let (structure, template_id) = self.resolve_structure(request, &mut suggestions).await;

        let model = self.periodization.select_periodization_model(
            request.goal,
            request.experience_level,
            request.duration_weeks,
        );
        let plan = self.periodization.plan_progression(
            request.duration_weeks,
            request.goal,
            request.experience_level,
            Some(model),
        );
        suggestions.push(format!("Using {model} periodization"));

        let slots = structure.first_week_workouts();
        let mut tally = GenerationTally::default();
        let mut weeks = Vec::with_capacity(plan.len());
        for params in &plan {
            let mut workouts = Vec::with_capacity(slots.len());
            for slot in slots {
                workouts.push(self.build_workout(request, params, slot, &mut tally).await);
            }
            weeks.push(ProgramWeek {
                week_number: params.week_number,
                focus: week_focus(params, request.goal),
                intensity_percent: params.intensity_percent,
                volume_modifier: params.volume_modifier,
                is_deload: params.is_deload,
                notes: params.notes.clone(),
                workouts,
            });
        }

        let program = TrainingProgram {
            id: Uuid::new_v4(),
            name: program_name(request),
            description: program_description(request),
            goal: request.goal,
            experience_level: request.experience_level,
            periodization_model: model,
            duration_weeks: request.duration_weeks,
            sessions_per_week: request.sessions_per_week,
            available_equipment: request.equipment_available.clone(),
            weeks,
            created_at: Utc::now(),
        };

        let context = ValidationContext::new(
            &request.equipment_available,
            request.experience_level,
            request.limitations.clone(),
        );
        let validation = self.validator.validate_program(&program, &context);
        if !validation.is_valid {
            warn!(
                program_id = %program.id,
                errors = validation.errors().count(),
                summary = %validation.summary,
                "Generated program failed validation"
            );
        }
        suggestions.extend(validation.warnings().map(|w| format!("Note: {}", w.message)));
        suggestions.extend(tally.notices);

        let generation_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let metadata = GenerationMetadata {
            template_id,
            periodization_model: model,
            generated_at: Utc::now(),
            generation_time_ms,
            llm_used: tally.llm_workouts > 0,
            fallback_count: tally.fallback_count,
            validation_passed: validation.is_valid,
            warning_count: validation.warning_count(),
        };
        EngineLogger::log_generation(
            &program.id.to_string(),
            model.as_str(),
            program.duration_weeks,
            metadata.llm_used,
            metadata.fallback_count,
            generation_time_ms,
        );

        Ok(GeneratedProgram {
            program,
            validation,
            metadata,
            suggestions,
        })
    }

    async fn resolve_structure(
        &self,
        request: &GenerateProgramRequest,
        suggestions: &mut Vec<String>,
    ) -> (ProgramStructure, Option<Uuid>) {
        let best = self
            .templates
            .select_best_template(
                request.goal,
                request.experience_level,
                request.sessions_per_week,
                request.duration_weeks,
            )
            .await
            .filter(|m| !m.template.structure.first_week_workouts().is_empty());

        if let Some(best) = best {
            let template_id = best.template.id;
            if !self.templates.increment_usage_count(template_id).await {
                warn!(template_id = %template_id, "Template usage count was not updated");
            }
            suggestions.push(format!("Using template: {}", best.template.name));
            return (best.template.structure, Some(template_id));
        }

        suggestions.push("Using default workout structure".to_owned());
        let structure = TemplateSelector::default_structure(
            request.goal,
            request.sessions_per_week,
            request.duration_weeks,
        );
        (structure, None)
    }

    async fn build_workout(
        &self,
        request: &GenerateProgramRequest,
        params: &WeekParameters,
        slot: &WorkoutSlot,
        tally: &mut GenerationTally,
    ) -> ProgramWorkout {
        let candidates = match self
            .catalog
            .get_for_workout_type(
                slot.workout_type,
                &request.equipment_available,
                WORKOUT_CANDIDATE_LIMIT,
            )
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    workout_type = %slot.workout_type,
                    error = %e,
                    "Catalog lookup failed, continuing without candidates"
                );
                Vec::new()
            }
        };

        let target_muscles = if slot.muscle_groups.is_empty() {
            slot.workout_type
                .target_muscles()
                .iter()
                .map(|m| (*m).to_owned())
                .collect()
        } else {
            slot.muscle_groups.clone()
        };
        let requirements =
            SlotRequirements::new(slot.workout_type, request.goal, request.experience_level)
                .with_target_muscles(target_muscles)
                .with_equipment(request.equipment_available.clone())
                .with_exercise_count(slot_count(slot.exercise_slots, params.is_deload))
                .with_week(params.intensity_percent, params.volume_modifier, params.is_deload)
                .with_limitations(request.limitations.clone())
                .with_candidates(candidates);

        let response = if requirements.candidates.is_empty() {
            None
        } else {
            Some(self.select(&requirements, tally).await).filter(|r| !r.exercises.is_empty())
        };

        let (exercises, notes) = match response {
            Some(response) => {
                let exercises = response
                    .exercises
                    .into_iter()
                    .map(|selection| program_exercise(selection, &requirements.candidates))
                    .collect();
                (exercises, response.workout_notes)
            }
            None => {
                tally.notice(format!(
                    "No {} exercises match the available equipment; a placeholder was added",
                    slot.workout_type
                ));
                (vec![placeholder_entry(&requirements)], None)
            }
        };

        ProgramWorkout {
            day_of_week: slot.day_of_week,
            name: slot.name.clone(),
            workout_type: slot.workout_type,
            target_duration_minutes: slot.target_duration_minutes,
            notes,
            exercises,
        }
    }

    async fn select(
        &self,
        requirements: &SlotRequirements,
        tally: &mut GenerationTally,
    ) -> ExerciseSelectionResponse {
        let Some(llm) = &self.llm else {
            let mut response = DeterministicSelector::fallback_response(requirements);
            response.workout_notes = None;
            return response;
        };

        let outcome = llm.select_exercises(requirements, true).await;
        if let Some(reason) = outcome.degradation() {
            debug!(
                workout_type = %requirements.workout_type,
                attempts = reason.attempts,
                "Workout filled by deterministic fallback"
            );
            tally.fallback_count += 1;
            tally.notice(FALLBACK_NOTICE.to_owned());
        } else {
            tally.llm_workouts += 1;
        }
        outcome.into_response()
    }
}

/// Exercise slots for a week; deload weeks drop two slots but keep at least three
fn slot_count(slots: u32, is_deload: bool) -> u32 {
    let slots = if is_deload {
        slots.saturating_sub(DELOAD_SLOT_REDUCTION).max(MIN_DELOAD_SLOTS)
    } else {
        slots
    };
    slots.clamp(MIN_EXERCISE_COUNT, MAX_EXERCISE_COUNT)
}

fn program_exercise(selection: ExerciseSelection, candidates: &[Exercise]) -> ProgramExercise {
    let source = candidates.iter().find(|e| e.id == selection.exercise_id);
    ProgramExercise {
        primary_muscles: source.map(|e| e.primary_muscles.clone()).unwrap_or_default(),
        equipment: source.map(|e| e.equipment.clone()).unwrap_or_default(),
        selection,
    }
}

fn placeholder_entry(requirements: &SlotRequirements) -> ProgramExercise {
    let exercise = placeholder_exercise(requirements);
    let scheme = RepScheme::for_goal(requirements.goal);
    ProgramExercise {
        selection: ExerciseSelection {
            exercise_id: exercise.id,
            exercise_name: exercise.name,
            sets: scheme.sets_for_week(requirements.is_deload),
            reps: scheme.reps.to_owned(),
            rest_seconds: scheme.rest_seconds,
            order: 1,
            superset_group: None,
            notes: Some(PLACEHOLDER_NOTES.to_owned()),
        },
        primary_muscles: exercise.primary_muscles,
        equipment: exercise.equipment,
    }
}

fn week_focus(params: &WeekParameters, goal: TrainingGoal) -> String {
    let focus = if params.is_deload {
        DELOAD_WEEK_FOCUS
    } else if let Some(phase) = params.phase {
        phase.focus_label()
    } else {
        goal_focus(goal)
    };
    focus.to_owned()
}

const fn goal_name(goal: TrainingGoal) -> &'static str {
    match goal {
        TrainingGoal::Strength => "Strength",
        TrainingGoal::Hypertrophy => "Hypertrophy",
        TrainingGoal::Endurance => "Endurance",
        TrainingGoal::WeightLoss => "Fat Loss",
        TrainingGoal::GeneralFitness => "Fitness",
        TrainingGoal::SportSpecific => "Sport Performance",
    }
}

fn program_name(request: &GenerateProgramRequest) -> String {
    format!(
        "{}-Week {} Program",
        request.duration_weeks,
        goal_name(request.goal)
    )
}

fn program_description(request: &GenerateProgramRequest) -> String {
    format!(
        "A {}-week {} program designed for {} lifters, with {} sessions per week.",
        request.duration_weeks,
        request.goal.as_str().replace('_', " "),
        request.experience_level,
        request.sessions_per_week
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_core::models::{
        BlockPhase, ExerciseCategory, ExperienceLevel, MovementPattern, TrainingFocus, WorkoutType,
    };

    fn week(is_deload: bool, phase: Option<BlockPhase>) -> WeekParameters {
        WeekParameters {
            week_number: 1,
            model: PeriodizationModel::Block,
            intensity_percent: 0.7,
            volume_modifier: 1.0,
            is_deload,
            focus: TrainingFocus::Hypertrophy,
            phase,
            effort_type: None,
            notes: None,
        }
    }

    #[test]
    fn test_slot_count_for_deload_weeks() {
        assert_eq!(slot_count(5, false), 5);
        assert_eq!(slot_count(5, true), 3);
        assert_eq!(slot_count(8, true), 6);
        assert_eq!(slot_count(4, true), 3);
        assert_eq!(slot_count(20, false), 12);
        assert_eq!(slot_count(1, false), 3);
    }

    #[test]
    fn test_week_focus_precedence() {
        let goal = TrainingGoal::Hypertrophy;
        assert_eq!(
            week_focus(&week(true, Some(BlockPhase::Realization)), goal),
            "Recovery & Deload"
        );
        assert_eq!(
            week_focus(&week(false, Some(BlockPhase::Transmutation)), goal),
            "Intensity Transmutation"
        );
        assert_eq!(week_focus(&week(false, None), goal), "Muscle Building");
    }

    #[test]
    fn test_program_naming() {
        let request = GenerateProgramRequest::new(
            TrainingGoal::WeightLoss,
            ExperienceLevel::Beginner,
            6,
            3,
        );
        assert_eq!(program_name(&request), "6-Week Fat Loss Program");
        assert_eq!(
            program_description(&request),
            "A 6-week weight loss program designed for beginner lifters, with 3 sessions per week."
        );
    }

    #[test]
    fn test_placeholder_entry_is_bodyweight() {
        let requirements = SlotRequirements::new(
            WorkoutType::Pull,
            TrainingGoal::Strength,
            ExperienceLevel::Intermediate,
        )
        .with_target_muscles(vec!["lats".to_owned()])
        .with_week(0.6, 0.5, true);
        let entry = placeholder_entry(&requirements);
        assert!(entry.equipment.is_empty());
        assert_eq!(entry.selection.order, 1);
        assert_eq!(entry.selection.sets, 3);
        assert_eq!(entry.selection.reps, "3-5");
        assert_eq!(entry.primary_muscles, vec!["lats".to_owned()]);
    }

    #[test]
    fn test_program_exercise_copies_catalog_fields() {
        let candidates = vec![Exercise::new(
            "barbell-row",
            "Barbell Row",
            MovementPattern::Pull,
            ExerciseCategory::Compound,
        )
        .with_primary(&["lats"])];
        let selection = ExerciseSelection {
            exercise_id: "barbell-row".to_owned(),
            exercise_name: "Barbell Row".to_owned(),
            sets: 4,
            reps: "8-12".to_owned(),
            rest_seconds: 90,
            order: 1,
            superset_group: None,
            notes: None,
        };
        let entry = program_exercise(selection, &candidates);
        assert_eq!(entry.primary_muscles, vec!["lats".to_owned()]);
    }
}
