// ABOUTME: Periodization configuration types with validation
// ABOUTME: Goal intensity ranges, deload cadence per experience level, and deload multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::periodization::{
    ADVANCED_DELOAD_FREQUENCY, BEGINNER_DELOAD_FREQUENCY, DELOAD_INTENSITY_FACTOR,
    DELOAD_VOLUME_FACTOR, FINAL_DELOAD_MIN_WEEKS, INTERMEDIATE_DELOAD_FREQUENCY,
};
use pierre_core::models::{ExperienceLevel, TrainingGoal};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Inclusive intensity band as a fraction of 1RM
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl IntensityRange {
    /// Build a range
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a normalized position (0.0-1.0) into the band
    #[must_use]
    pub fn scale(&self, normalized: f64) -> f64 {
        normalized.mul_add(self.max - self.min, self.min)
    }

    fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.min) && (0.0..=1.0).contains(&self.max) && self.min < self.max
    }
}

/// Intensity band for every training goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalIntensityRanges {
    /// Strength goal band
    pub strength: IntensityRange,
    /// Hypertrophy goal band
    pub hypertrophy: IntensityRange,
    /// Endurance goal band
    pub endurance: IntensityRange,
    /// Weight loss goal band
    pub weight_loss: IntensityRange,
    /// General fitness goal band
    pub general_fitness: IntensityRange,
    /// Sport-specific goal band
    pub sport_specific: IntensityRange,
}

impl Default for GoalIntensityRanges {
    fn default() -> Self {
        Self {
            strength: IntensityRange::new(0.75, 0.95),
            hypertrophy: IntensityRange::new(0.65, 0.85),
            endurance: IntensityRange::new(0.50, 0.70),
            weight_loss: IntensityRange::new(0.55, 0.75),
            general_fitness: IntensityRange::new(0.60, 0.80),
            sport_specific: IntensityRange::new(0.65, 0.90),
        }
    }
}

impl GoalIntensityRanges {
    /// Band for a goal
    #[must_use]
    pub const fn for_goal(&self, goal: TrainingGoal) -> IntensityRange {
        match goal {
            TrainingGoal::Strength => self.strength,
            TrainingGoal::Hypertrophy => self.hypertrophy,
            TrainingGoal::Endurance => self.endurance,
            TrainingGoal::WeightLoss => self.weight_loss,
            TrainingGoal::GeneralFitness => self.general_fitness,
            TrainingGoal::SportSpecific => self.sport_specific,
        }
    }

    fn all(&self) -> [IntensityRange; 6] {
        [
            self.strength,
            self.hypertrophy,
            self.endurance,
            self.weight_loss,
            self.general_fitness,
            self.sport_specific,
        ]
    }
}

/// Deload cadence and load reduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeloadConfig {
    /// Weeks between deloads for beginners
    pub beginner_frequency: u32,
    /// Weeks between deloads for intermediates
    pub intermediate_frequency: u32,
    /// Weeks between deloads for advanced lifters
    pub advanced_frequency: u32,
    /// Programs at least this long end on a deload (non-block models)
    pub final_deload_min_weeks: u32,
    /// Intensity multiplier on deload weeks
    pub intensity_factor: f64,
    /// Volume multiplier on deload weeks
    pub volume_factor: f64,
}

impl Default for DeloadConfig {
    fn default() -> Self {
        Self {
            beginner_frequency: BEGINNER_DELOAD_FREQUENCY,
            intermediate_frequency: INTERMEDIATE_DELOAD_FREQUENCY,
            advanced_frequency: ADVANCED_DELOAD_FREQUENCY,
            final_deload_min_weeks: FINAL_DELOAD_MIN_WEEKS,
            intensity_factor: DELOAD_INTENSITY_FACTOR,
            volume_factor: DELOAD_VOLUME_FACTOR,
        }
    }
}

impl DeloadConfig {
    /// Deload cadence for an experience level
    #[must_use]
    pub const fn frequency(&self, experience: ExperienceLevel) -> u32 {
        match experience {
            ExperienceLevel::Beginner => self.beginner_frequency,
            ExperienceLevel::Intermediate => self.intermediate_frequency,
            ExperienceLevel::Advanced => self.advanced_frequency,
        }
    }
}

/// Complete periodization configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodizationConfig {
    /// Intensity band per goal
    pub intensity_ranges: GoalIntensityRanges,
    /// Deload settings
    pub deload: DeloadConfig,
}

impl PeriodizationConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when an intensity band is inverted or leaves
    /// 0.0-1.0, a deload frequency is zero, or a deload multiplier is outside
    /// (0.0, 1.0].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.intensity_ranges.all().iter().all(IntensityRange::is_valid) {
            return Err(ConfigError::InvalidRange(
                "goal intensity ranges must satisfy 0.0 <= min < max <= 1.0",
            ));
        }

        let deload = &self.deload;
        if deload.beginner_frequency == 0
            || deload.intermediate_frequency == 0
            || deload.advanced_frequency == 0
        {
            return Err(ConfigError::ValueOutOfRange(
                "deload frequencies must be at least 1 week",
            ));
        }

        if !(deload.intensity_factor > 0.0 && deload.intensity_factor <= 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "deload intensity_factor must be in (0.0, 1.0]",
            ));
        }
        if !(deload.volume_factor > 0.0 && deload.volume_factor <= 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "deload volume_factor must be in (0.0, 1.0]",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_core::errors::{AppError, ErrorCode};

    #[test]
    fn test_default_config_is_valid() {
        assert!(PeriodizationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = PeriodizationConfig::default();
        config.intensity_ranges.endurance = IntensityRange::new(0.8, 0.6);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_zero_frequency_maps_to_config_invalid() {
        let mut config = PeriodizationConfig::default();
        config.deload.advanced_frequency = 0;
        let error: AppError = config.validate().unwrap_err().into();
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_scale_maps_into_band() {
        let range = IntensityRange::new(0.65, 0.85);
        assert!((range.scale(0.0) - 0.65).abs() < f64::EPSILON);
        assert!((range.scale(1.0) - 0.85).abs() < 1e-12);
    }
}
