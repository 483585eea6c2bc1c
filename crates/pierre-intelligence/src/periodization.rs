// ABOUTME: Periodization service computing weekly intensity, volume, and deload schedule
// ABOUTME: Implements linear, undulating, block, conjugate, and reverse linear models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Periodization
//!
//! Every model produces a raw intensity in roughly 0.50-1.0 and a volume
//! multiplier. Raw intensity is normalized against that span and rescaled
//! into the goal's intensity band, then deload weeks cut both values.
//!
//! Progress through the program is `p = (week - 1) / max(total - 1, 1)`.
//!
//! | Model | Intensity | Volume |
//! |-------|-----------|--------|
//! | linear | `0.65 + 0.30p` | `1.0 - 0.30p` |
//! | undulating | heavy session `0.85 + min(0.02(w-1), 0.10)`, capped at 0.95 | `0.8` |
//! | block | per phase, see [`PeriodizationService::block_progression`] | per phase |
//! | conjugate | effort by week (ME, DE, RE, ME) plus a 3-week wave | per effort |
//! | reverse linear | `0.90 - 0.30p` | `0.70 + 0.60p` |

use std::collections::BTreeSet;

use pierre_core::constants::periodization::{
    BLOCK_ACCUMULATION_FRACTION, BLOCK_TRANSMUTATION_FRACTION,
};
use pierre_core::errors::{AppError, AppResult};
use pierre_core::models::{
    BlockPhase, EffortType, ExperienceLevel, PeriodizationModel, TrainingFocus, TrainingGoal,
    WeekParameters,
};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, PeriodizationConfig};

/// Undulating session patterns: heavy, light, moderate as (intensity, volume)
const UNDULATING_PATTERNS: [(f64, f64); 3] = [(0.85, 0.8), (0.65, 1.2), (0.75, 1.0)];

/// Conjugate effort rotation indexed by `(week - 1) % 4`
const CONJUGATE_ROTATION: [EffortType; 4] = [
    EffortType::MaxEffort,
    EffortType::DynamicEffort,
    EffortType::RepetitionEffort,
    EffortType::MaxEffort,
];

/// Conjugate wave offsets indexed by `(week - 1) % 3`
const CONJUGATE_WAVE: [f64; 3] = [-0.03, 0.0, 0.03];

/// Weekly working sets per muscle recommended for an experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeLimits {
    /// Minimum weekly sets
    pub min_sets: u32,
    /// Maximum weekly sets
    pub max_sets: u32,
}

/// Deterministic periodization planner
#[derive(Debug, Clone, Default)]
pub struct PeriodizationService {
    config: PeriodizationConfig,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn fraction_of(total_weeks: u32, fraction: f64) -> u32 {
    (f64::from(total_weeks) * fraction).floor() as u32
}

/// Progress through a span of `len` weeks starting at `start`, 0.0 when the span is a single week
fn span_progress(week: u32, start: u32, len: u32) -> f64 {
    if len > 1 {
        f64::from(week - start) / f64::from(len - 1)
    } else {
        0.0
    }
}

impl PeriodizationService {
    /// Service with the default tables
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Service with custom tables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration fails validation.
    pub fn with_config(config: PeriodizationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &PeriodizationConfig {
        &self.config
    }

    // ========================================================================
    // Model selection and deload schedule
    // ========================================================================

    /// Recommend a model for the athlete and program length
    #[must_use]
    pub const fn select_periodization_model(
        &self,
        goal: TrainingGoal,
        experience: ExperienceLevel,
        duration_weeks: u32,
    ) -> PeriodizationModel {
        match goal {
            TrainingGoal::Strength => match experience {
                ExperienceLevel::Advanced => PeriodizationModel::Conjugate,
                _ if duration_weeks >= 8 => PeriodizationModel::Block,
                _ => PeriodizationModel::Linear,
            },
            TrainingGoal::Hypertrophy => match experience {
                ExperienceLevel::Intermediate | ExperienceLevel::Advanced => {
                    PeriodizationModel::Undulating
                }
                ExperienceLevel::Beginner => PeriodizationModel::Linear,
            },
            TrainingGoal::Endurance => PeriodizationModel::ReverseLinear,
            TrainingGoal::SportSpecific if duration_weeks >= 12 => PeriodizationModel::Block,
            TrainingGoal::SportSpecific => PeriodizationModel::Undulating,
            TrainingGoal::WeightLoss | TrainingGoal::GeneralFitness => PeriodizationModel::Linear,
        }
    }

    /// Weeks that should be deloads
    ///
    /// Block programs deload at the end of accumulation and transmutation and
    /// peak through realization. Other models deload on a fixed cadence and
    /// finish with a deload when the program is long enough.
    #[must_use]
    pub fn calculate_deload_weeks(
        &self,
        duration_weeks: u32,
        experience: ExperienceLevel,
        model: PeriodizationModel,
    ) -> BTreeSet<u32> {
        let mut weeks = BTreeSet::new();

        if model == PeriodizationModel::Block {
            let accumulation_end = fraction_of(duration_weeks, BLOCK_ACCUMULATION_FRACTION);
            let transmutation_end = fraction_of(duration_weeks, BLOCK_TRANSMUTATION_FRACTION);
            for week in [accumulation_end, transmutation_end] {
                if week > 0 && week <= duration_weeks {
                    weeks.insert(week);
                }
            }
            return weeks;
        }

        let frequency = self.config.deload.frequency(experience).max(1);
        weeks.extend((frequency..=duration_weeks).step_by(frequency as usize));
        if duration_weeks >= self.config.deload.final_deload_min_weeks {
            weeks.insert(duration_weeks);
        }
        weeks
    }

    /// Recommended weekly set range for an experience level
    #[must_use]
    pub const fn volume_limits(&self, experience: ExperienceLevel) -> VolumeLimits {
        match experience {
            ExperienceLevel::Beginner => VolumeLimits {
                min_sets: 10,
                max_sets: 12,
            },
            ExperienceLevel::Intermediate => VolumeLimits {
                min_sets: 12,
                max_sets: 18,
            },
            ExperienceLevel::Advanced => VolumeLimits {
                min_sets: 16,
                max_sets: 25,
            },
        }
    }

    // ========================================================================
    // Raw model progressions
    // ========================================================================

    /// Linear: intensity climbs 0.65 → 0.95 while volume falls 1.0 → 0.7
    #[must_use]
    pub fn linear_progression(week: u32, total_weeks: u32) -> (f64, f64) {
        let progress = span_progress(week, 1, total_weeks);
        (
            round3(0.30f64.mul_add(progress, 0.65)),
            round3((-0.30f64).mul_add(progress, 1.0)),
        )
    }

    /// Undulating: heavy/light/moderate session pattern plus a small weekly bonus
    #[must_use]
    pub fn undulating_progression(week: u32, session: u32) -> (f64, f64) {
        let (base_intensity, volume) =
            UNDULATING_PATTERNS[(session.saturating_sub(1) % 3) as usize];
        let weekly_bonus = (0.02 * f64::from(week.saturating_sub(1))).min(0.10);
        (
            round3((base_intensity + weekly_bonus).min(0.95)),
            round3(volume),
        )
    }

    /// Block: 40% accumulation, 40% transmutation, 20% realization
    #[must_use]
    pub fn block_progression(week: u32, total_weeks: u32) -> (f64, f64, BlockPhase) {
        let accumulation_end = fraction_of(total_weeks, BLOCK_ACCUMULATION_FRACTION);
        let transmutation_end = fraction_of(total_weeks, BLOCK_TRANSMUTATION_FRACTION);

        let (phase, intensity, volume) = if week <= accumulation_end {
            let q = span_progress(week, 1, accumulation_end);
            (
                BlockPhase::Accumulation,
                0.05f64.mul_add(q, 0.65),
                (-0.1f64).mul_add(q, 1.2),
            )
        } else if week <= transmutation_end {
            let q = span_progress(
                week,
                accumulation_end + 1,
                transmutation_end - accumulation_end,
            );
            (
                BlockPhase::Transmutation,
                0.10f64.mul_add(q, 0.75),
                (-0.15f64).mul_add(q, 1.0),
            )
        } else {
            let q = span_progress(week, transmutation_end + 1, total_weeks - transmutation_end);
            (
                BlockPhase::Realization,
                0.07f64.mul_add(q, 0.88),
                (-0.15f64).mul_add(q, 0.75),
            )
        };

        (round3(intensity), round3(volume), phase)
    }

    /// Conjugate: effort type rotates by week with a 3-week intensity wave
    #[must_use]
    pub fn conjugate_progression(week: u32) -> (f64, f64, EffortType) {
        let index = week.saturating_sub(1) as usize;
        let effort = CONJUGATE_ROTATION[index % CONJUGATE_ROTATION.len()];
        let (base_intensity, volume) = match effort {
            EffortType::MaxEffort => (0.92, 0.6),
            EffortType::DynamicEffort => (0.55, 1.3),
            EffortType::RepetitionEffort => (0.70, 1.1),
        };
        let intensity = (base_intensity + CONJUGATE_WAVE[index % CONJUGATE_WAVE.len()]).clamp(0.50, 0.98);
        (round3(intensity), round3(volume), effort)
    }

    /// Reverse linear: intensity falls 0.90 → 0.60 while volume rises 0.7 → 1.3
    #[must_use]
    pub fn reverse_linear_progression(week: u32, total_weeks: u32) -> (f64, f64) {
        let progress = span_progress(week, 1, total_weeks);
        (
            round3((-0.30f64).mul_add(progress, 0.90)),
            round3(0.60f64.mul_add(progress, 0.70)),
        )
    }

    // ========================================================================
    // Week parameters
    // ========================================================================

    /// Full parameters for one week
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` if `total_weeks` is zero or `week` falls
    /// outside `1..=total_weeks`.
    pub fn get_week_parameters(
        &self,
        week: u32,
        total_weeks: u32,
        model: PeriodizationModel,
        goal: TrainingGoal,
        experience: ExperienceLevel,
    ) -> AppResult<WeekParameters> {
        Self::check_week(week, total_weeks)?;
        let deloads = self.calculate_deload_weeks(total_weeks, experience, model);
        Ok(self.build_week(week, total_weeks, model, goal, deloads.contains(&week)))
    }

    /// Parameters for every week of a program
    ///
    /// When `model` is `None` the model comes from
    /// [`Self::select_periodization_model`].
    #[must_use]
    pub fn plan_progression(
        &self,
        duration_weeks: u32,
        goal: TrainingGoal,
        experience: ExperienceLevel,
        model: Option<PeriodizationModel>,
    ) -> Vec<WeekParameters> {
        let model =
            model.unwrap_or_else(|| self.select_periodization_model(goal, experience, duration_weeks));
        let deloads = self.calculate_deload_weeks(duration_weeks, experience, model);

        (1..=duration_weeks)
            .map(|week| self.build_week(week, duration_weeks, model, goal, deloads.contains(&week)))
            .collect()
    }

    /// Linear-model intensity scaled to the goal's band
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` if `total_weeks` is zero or `week` falls
    /// outside `1..=total_weeks`.
    pub fn intensity_target(&self, goal: TrainingGoal, week: u32, total_weeks: u32) -> AppResult<f64> {
        Self::check_week(week, total_weeks)?;
        let (raw, _) = Self::linear_progression(week, total_weeks);
        Ok(round3(self.scale_to_goal(raw, goal)))
    }

    fn check_week(week: u32, total_weeks: u32) -> AppResult<()> {
        if total_weeks < 1 {
            return Err(AppError::out_of_range(format!(
                "Total weeks must be at least 1, got {total_weeks}"
            )));
        }
        if week < 1 || week > total_weeks {
            return Err(AppError::out_of_range(format!(
                "Week {week} out of range [1, {total_weeks}]"
            )));
        }
        Ok(())
    }

    fn scale_to_goal(&self, raw_intensity: f64, goal: TrainingGoal) -> f64 {
        let normalized = ((raw_intensity - 0.50) / 0.50).clamp(0.0, 1.0);
        self.config.intensity_ranges.for_goal(goal).scale(normalized)
    }

    /// Assumes `1 <= week <= total_weeks`
    fn build_week(
        &self,
        week: u32,
        total_weeks: u32,
        model: PeriodizationModel,
        goal: TrainingGoal,
        is_deload: bool,
    ) -> WeekParameters {
        let mut phase = None;
        let mut effort_type = None;

        let (raw_intensity, mut volume) = match model {
            PeriodizationModel::Linear => Self::linear_progression(week, total_weeks),
            PeriodizationModel::Undulating => Self::undulating_progression(week, 1),
            PeriodizationModel::Block => {
                let (intensity, volume, block_phase) = Self::block_progression(week, total_weeks);
                phase = Some(block_phase);
                (intensity, volume)
            }
            PeriodizationModel::Conjugate => {
                let (intensity, volume, effort) = Self::conjugate_progression(week);
                effort_type = Some(effort);
                (intensity, volume)
            }
            PeriodizationModel::ReverseLinear => {
                Self::reverse_linear_progression(week, total_weeks)
            }
        };

        let mut intensity = self.scale_to_goal(raw_intensity, goal);
        if is_deload {
            intensity *= self.config.deload.intensity_factor;
            volume *= self.config.deload.volume_factor;
        }
        let intensity = round3(intensity.clamp(0.0, 1.0));
        let volume = round3(volume.clamp(0.0, 2.0));

        WeekParameters {
            week_number: week,
            model,
            intensity_percent: intensity,
            volume_modifier: volume,
            is_deload,
            focus: determine_focus(intensity, is_deload, effort_type),
            phase,
            effort_type,
            notes: week_notes(week, total_weeks, is_deload, phase, effort_type).map(str::to_owned),
        }
    }
}

/// Dominant quality of a week
#[must_use]
pub fn determine_focus(
    intensity: f64,
    is_deload: bool,
    effort_type: Option<EffortType>,
) -> TrainingFocus {
    if is_deload {
        return TrainingFocus::Deload;
    }
    match effort_type {
        Some(EffortType::MaxEffort) => TrainingFocus::Strength,
        Some(EffortType::DynamicEffort) => TrainingFocus::Power,
        Some(EffortType::RepetitionEffort) => TrainingFocus::Hypertrophy,
        None if intensity >= 0.85 => TrainingFocus::Strength,
        None if intensity >= 0.75 => TrainingFocus::Power,
        None if intensity >= 0.65 => TrainingFocus::Hypertrophy,
        None => TrainingFocus::Endurance,
    }
}

fn week_notes(
    week: u32,
    total_weeks: u32,
    is_deload: bool,
    phase: Option<BlockPhase>,
    effort_type: Option<EffortType>,
) -> Option<&'static str> {
    if is_deload {
        return Some("Deload week - reduce weights and focus on recovery");
    }
    if let Some(phase) = phase {
        return Some(match phase {
            BlockPhase::Accumulation => "Accumulation phase - focus on volume and technique",
            BlockPhase::Transmutation => {
                "Transmutation phase - increase intensity, maintain technique"
            }
            BlockPhase::Realization => "Realization phase - peak performance, test maxes",
        });
    }
    if let Some(effort) = effort_type {
        return Some(match effort {
            EffortType::MaxEffort => "Max effort - work up to heavy singles and triples",
            EffortType::DynamicEffort => "Dynamic effort - focus on speed and explosiveness",
            EffortType::RepetitionEffort => {
                "Repetition effort - hypertrophy work with a controlled tempo"
            }
        });
    }
    if week == 1 {
        Some("Program start - establish baseline weights")
    } else if week == total_weeks {
        Some("Final week - test progress and reassess goals")
    } else {
        None
    }
}
