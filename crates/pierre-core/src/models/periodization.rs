// ABOUTME: Periodization vocabulary and per-week training parameters
// ABOUTME: Models, block phases, conjugate effort types, training focus, WeekParameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// How intensity and volume vary across a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodizationModel {
    /// Intensity rises, volume falls week over week
    Linear,
    /// Daily heavy/light/moderate rotation
    Undulating,
    /// Accumulation, transmutation, realization blocks
    Block,
    /// Max, dynamic, and repetition effort rotation
    Conjugate,
    /// Intensity falls, volume rises
    ReverseLinear,
}

impl PeriodizationModel {
    /// Every model in declaration order
    pub const ALL: [Self; 5] = [
        Self::Linear,
        Self::Undulating,
        Self::Block,
        Self::Conjugate,
        Self::ReverseLinear,
    ];

    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Undulating => "undulating",
            Self::Block => "block",
            Self::Conjugate => "conjugate",
            Self::ReverseLinear => "reverse_linear",
        }
    }
}

impl Display for PeriodizationModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodizationModel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "undulating" => Ok(Self::Undulating),
            "block" => Ok(Self::Block),
            "conjugate" => Ok(Self::Conjugate),
            "reverse_linear" => Ok(Self::ReverseLinear),
            other => Err(AppError::invalid_input(format!(
                "Unknown periodization model: '{other}'. Valid options: linear, undulating, block, conjugate, reverse_linear"
            ))),
        }
    }
}

/// Phase of a block-periodized program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockPhase {
    /// High volume, moderate intensity
    Accumulation,
    /// Moderate volume, high intensity
    Transmutation,
    /// Low volume, peak intensity
    Realization,
}

impl BlockPhase {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accumulation => "accumulation",
            Self::Transmutation => "transmutation",
            Self::Realization => "realization",
        }
    }

    /// Focus label shown on program weeks
    #[must_use]
    pub const fn focus_label(&self) -> &'static str {
        match self {
            Self::Accumulation => "Volume Accumulation",
            Self::Transmutation => "Intensity Transmutation",
            Self::Realization => "Peak Realization",
        }
    }
}

impl Display for BlockPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conjugate method effort type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortType {
    /// Heavy singles and triples
    MaxEffort,
    /// Speed work at light loads
    DynamicEffort,
    /// Moderate loads for reps
    RepetitionEffort,
}

impl EffortType {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MaxEffort => "max_effort",
            Self::DynamicEffort => "dynamic_effort",
            Self::RepetitionEffort => "repetition_effort",
        }
    }
}

impl Display for EffortType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dominant training quality of a week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingFocus {
    /// 85%+ intensity
    Strength,
    /// 75-85%
    Power,
    /// 65-75%
    Hypertrophy,
    /// Below 65%
    Endurance,
    /// Recovery week
    Deload,
}

impl TrainingFocus {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Power => "power",
            Self::Hypertrophy => "hypertrophy",
            Self::Endurance => "endurance",
            Self::Deload => "deload",
        }
    }
}

impl Display for TrainingFocus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training parameters computed for one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekParameters {
    /// 1-based week index
    pub week_number: u32,
    /// Model that produced the values
    pub model: PeriodizationModel,
    /// Fraction of 1RM, 0.0-1.0, rounded to 3 decimals
    pub intensity_percent: f64,
    /// Volume multiplier, 0.0-2.0, rounded to 3 decimals
    pub volume_modifier: f64,
    /// Recovery week
    pub is_deload: bool,
    /// Dominant quality
    pub focus: TrainingFocus,
    /// Block phase (block model only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<BlockPhase>,
    /// Effort type (conjugate model only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effort_type: Option<EffortType>,
    /// Coaching note for the week
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WeekParameters {
    /// Recommended rep range for the week's intensity
    #[must_use]
    pub fn rep_range(&self) -> &'static str {
        match self.intensity_percent {
            i if i >= 0.90 => "1-3",
            i if i >= 0.80 => "4-6",
            i if i >= 0.70 => "6-8",
            _ => "8-12",
        }
    }

    /// Intensity as a whole percentage for display
    #[must_use]
    pub fn intensity_display_percent(&self) -> u32 {
        (self.intensity_percent * 100.0).round() as u32
    }
}
