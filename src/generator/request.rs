// ABOUTME: Program generation request with fail-fast range validation
// ABOUTME: Goal and experience are typed enums parsed by callers with FromStr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::periodization::{MAX_DURATION_WEEKS, MAX_SESSIONS_PER_WEEK};
use pierre_core::models::{ExperienceLevel, TrainingGoal};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// What the athlete asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateProgramRequest {
    /// Primary training goal
    pub goal: TrainingGoal,
    /// Athlete experience
    pub experience_level: ExperienceLevel,
    /// Program length in weeks (1-52)
    pub duration_weeks: u32,
    /// Training days per week (1-7)
    pub sessions_per_week: u32,
    /// Equipment names, presets, or aliases
    #[serde(default)]
    pub equipment_available: Vec<String>,
    /// Injuries or restrictions in the athlete's own words
    #[serde(default)]
    pub limitations: Vec<String>,
}

impl GenerateProgramRequest {
    /// Request with no equipment and no limitations
    #[must_use]
    pub const fn new(
        goal: TrainingGoal,
        experience_level: ExperienceLevel,
        duration_weeks: u32,
        sessions_per_week: u32,
    ) -> Self {
        Self {
            goal,
            experience_level,
            duration_weeks,
            sessions_per_week,
            equipment_available: Vec::new(),
            limitations: Vec::new(),
        }
    }

    /// Set available equipment
    #[must_use]
    pub fn with_equipment<S: AsRef<str>>(mut self, equipment: &[S]) -> Self {
        self.equipment_available = equipment.iter().map(|e| e.as_ref().to_owned()).collect();
        self
    }

    /// Set limitations
    #[must_use]
    pub fn with_limitations<S: AsRef<str>>(mut self, limitations: &[S]) -> Self {
        self.limitations = limitations.iter().map(|l| l.as_ref().to_owned()).collect();
        self
    }

    /// Check ranges before any work starts
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a duration outside 1-52 or sessions
    /// outside 1-7, and `InvalidInput` for a blank equipment entry.
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_DURATION_WEEKS).contains(&self.duration_weeks) {
            return Err(AppError::out_of_range(format!(
                "duration_weeks must be between 1 and {MAX_DURATION_WEEKS}, got {}",
                self.duration_weeks
            )));
        }
        if !(1..=MAX_SESSIONS_PER_WEEK).contains(&self.sessions_per_week) {
            return Err(AppError::out_of_range(format!(
                "sessions_per_week must be between 1 and {MAX_SESSIONS_PER_WEEK}, got {}",
                self.sessions_per_week
            )));
        }
        if self.equipment_available.iter().any(|e| e.trim().is_empty()) {
            return Err(AppError::invalid_input(
                "equipment_available must not contain blank entries",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_core::errors::ErrorCode;

    #[test]
    fn test_ranges() {
        let ok = GenerateProgramRequest::new(TrainingGoal::Strength, ExperienceLevel::Beginner, 52, 7);
        assert!(ok.validate().is_ok());

        for (weeks, sessions) in [(0, 3), (53, 3), (4, 0), (4, 8)] {
            let req = GenerateProgramRequest::new(
                TrainingGoal::Strength,
                ExperienceLevel::Beginner,
                weeks,
                sessions,
            );
            assert_eq!(req.validate().unwrap_err().code, ErrorCode::ValueOutOfRange);
        }
    }

    #[test]
    fn test_blank_equipment_rejected() {
        let req = GenerateProgramRequest::new(TrainingGoal::Strength, ExperienceLevel::Beginner, 4, 3)
            .with_equipment(&["barbell", "  "]);
        assert_eq!(req.validate().unwrap_err().code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_deserializes_from_wire_names() {
        let req: GenerateProgramRequest = serde_json::from_str(
            r#"{"goal":"weight_loss","experience_level":"advanced","duration_weeks":6,"sessions_per_week":4}"#,
        )
        .unwrap();
        assert_eq!(req.goal, TrainingGoal::WeightLoss);
        assert!(req.equipment_available.is_empty());
    }
}
