// ABOUTME: Training goal and experience level enums shared by every engine component
// ABOUTME: String round-trips via as_str/FromStr so callers can validate input before generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Primary goal of a training program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
    /// Maximal strength (low reps, heavy loads)
    Strength,
    /// Muscle growth
    Hypertrophy,
    /// Muscular endurance
    Endurance,
    /// Fat loss and conditioning
    WeightLoss,
    /// Balanced general fitness
    GeneralFitness,
    /// Sport performance
    SportSpecific,
}

impl TrainingGoal {
    /// Every goal in declaration order
    pub const ALL: [Self; 6] = [
        Self::Strength,
        Self::Hypertrophy,
        Self::Endurance,
        Self::WeightLoss,
        Self::GeneralFitness,
        Self::SportSpecific,
    ];

    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Hypertrophy => "hypertrophy",
            Self::Endurance => "endurance",
            Self::WeightLoss => "weight_loss",
            Self::GeneralFitness => "general_fitness",
            Self::SportSpecific => "sport_specific",
        }
    }

    /// Human-readable label ("Weight Loss")
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Hypertrophy => "Hypertrophy",
            Self::Endurance => "Endurance",
            Self::WeightLoss => "Weight Loss",
            Self::GeneralFitness => "General Fitness",
            Self::SportSpecific => "Sport Specific",
        }
    }

    /// Whether compound lifts dominate programming for this goal
    #[must_use]
    pub const fn prefers_compound(&self) -> bool {
        matches!(
            self,
            Self::Strength | Self::Hypertrophy | Self::GeneralFitness
        )
    }
}

impl Display for TrainingGoal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingGoal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" => Ok(Self::Strength),
            "hypertrophy" => Ok(Self::Hypertrophy),
            "endurance" => Ok(Self::Endurance),
            "weight_loss" => Ok(Self::WeightLoss),
            "general_fitness" => Ok(Self::GeneralFitness),
            "sport_specific" => Ok(Self::SportSpecific),
            other => Err(AppError::invalid_input(format!(
                "Unknown training goal: '{other}'. Valid options: strength, hypertrophy, endurance, weight_loss, general_fitness, sport_specific"
            ))),
        }
    }
}

/// Training experience of the athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Less than about a year of structured training
    Beginner,
    /// One to three years
    Intermediate,
    /// Three or more years
    Advanced,
}

impl ExperienceLevel {
    /// Every level from least to most experienced
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl Display for ExperienceLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(AppError::invalid_input(format!(
                "Unknown experience level: '{other}'. Valid options: beginner, intermediate, advanced"
            ))),
        }
    }
}
