// ABOUTME: Exercise catalog record with category and movement pattern enums
// ABOUTME: Read-only view of an exercise consumed by selectors and the validator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Broad exercise classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    /// Multi-joint movement
    Compound,
    /// Single-joint movement
    Isolation,
    /// Conditioning work
    Cardio,
}

impl ExerciseCategory {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compound => "compound",
            Self::Isolation => "isolation",
            Self::Cardio => "cardio",
        }
    }

    /// Sort rank used for tie-breaking (compound first)
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Compound => 0,
            Self::Isolation => 1,
            Self::Cardio => 2,
        }
    }
}

impl Display for ExerciseCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compound" => Ok(Self::Compound),
            "isolation" => Ok(Self::Isolation),
            "cardio" => Ok(Self::Cardio),
            other => Err(AppError::invalid_input(format!(
                "Unknown exercise category: '{other}'"
            ))),
        }
    }
}

/// Fundamental movement pattern of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    /// Horizontal or vertical press
    Push,
    /// Horizontal or vertical row/pull
    Pull,
    /// Knee-dominant lower body
    Squat,
    /// Hip-dominant lower body
    Hinge,
    /// Single-leg knee-dominant
    Lunge,
    /// Loaded carry
    Carry,
    /// Trunk stability and rotation
    Core,
    /// Conditioning
    Cardio,
}

impl MovementPattern {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Squat => "squat",
            Self::Hinge => "hinge",
            Self::Lunge => "lunge",
            Self::Carry => "carry",
            Self::Core => "core",
            Self::Cardio => "cardio",
        }
    }

    /// Capitalized label used in placeholder names
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Squat => "Squat",
            Self::Hinge => "Hinge",
            Self::Lunge => "Lunge",
            Self::Carry => "Carry",
            Self::Core => "Core",
            Self::Cardio => "Cardio",
        }
    }
}

impl Display for MovementPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementPattern {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "push" => Ok(Self::Push),
            "pull" => Ok(Self::Pull),
            "squat" => Ok(Self::Squat),
            "hinge" => Ok(Self::Hinge),
            "lunge" => Ok(Self::Lunge),
            "carry" => Ok(Self::Carry),
            "core" => Ok(Self::Core),
            "cardio" => Ok(Self::Cardio),
            other => Err(AppError::invalid_input(format!(
                "Unknown movement pattern: '{other}'"
            ))),
        }
    }
}

/// Exercise catalog entry
///
/// An empty `equipment` list marks a bodyweight exercise, which is eligible
/// under any equipment constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Stable slug identifier (e.g. `barbell-bench-press`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Muscles primarily trained
    pub primary_muscles: Vec<String>,
    /// Muscles assisting the movement
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    /// Equipment required to perform the exercise
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Movement pattern
    pub movement_pattern: MovementPattern,
    /// Compound, isolation, or cardio
    pub category: ExerciseCategory,
    /// Whether a one-rep max is meaningful for the exercise
    #[serde(default)]
    pub supports_1rm: bool,
    /// Alternative names used for lookup
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Synthesized when the catalog had nothing to offer for a slot
    #[serde(default)]
    pub is_placeholder: bool,
}

impl Exercise {
    /// Create an exercise with no muscles or equipment yet
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        movement_pattern: MovementPattern,
        category: ExerciseCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            primary_muscles: Vec::new(),
            secondary_muscles: Vec::new(),
            equipment: Vec::new(),
            movement_pattern,
            category,
            supports_1rm: false,
            aliases: Vec::new(),
            is_placeholder: false,
        }
    }

    /// Set primary muscles
    #[must_use]
    pub fn with_primary(mut self, muscles: &[&str]) -> Self {
        self.primary_muscles = muscles.iter().map(|m| (*m).to_owned()).collect();
        self
    }

    /// Set secondary muscles
    #[must_use]
    pub fn with_secondary(mut self, muscles: &[&str]) -> Self {
        self.secondary_muscles = muscles.iter().map(|m| (*m).to_owned()).collect();
        self
    }

    /// Set required equipment
    #[must_use]
    pub fn with_equipment(mut self, equipment: &[&str]) -> Self {
        self.equipment = equipment.iter().map(|e| (*e).to_owned()).collect();
        self
    }

    /// Set lookup aliases
    #[must_use]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| (*a).to_owned()).collect();
        self
    }

    /// Mark the exercise as 1RM-testable
    #[must_use]
    pub const fn with_one_rep_max(mut self) -> Self {
        self.supports_1rm = true;
        self
    }

    /// Bodyweight exercises need no equipment
    #[must_use]
    pub fn is_bodyweight(&self) -> bool {
        self.equipment.is_empty()
    }

    /// Whether any primary muscle is in `muscles`
    #[must_use]
    pub fn targets_any(&self, muscles: &[String]) -> bool {
        self.primary_muscles.iter().any(|m| muscles.contains(m))
    }
}
