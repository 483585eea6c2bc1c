// ABOUTME: Configuration module for pierre-intelligence crate
// ABOUTME: Re-exports periodization configuration and its error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Configuration validation errors
pub mod error;

/// Periodization tables (goal intensity ranges, deload cadence and multipliers)
pub mod periodization;

pub use error::ConfigError;
pub use periodization::{DeloadConfig, GoalIntensityRanges, IntensityRange, PeriodizationConfig};
