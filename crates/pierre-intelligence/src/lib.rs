// ABOUTME: Pure training algorithms for the Pierre program engine
// ABOUTME: Periodization planning, candidate scoring, and static program validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Intelligence
//!
//! Deterministic, synchronous algorithms with no I/O. The engine crate wraps
//! them with catalog access, model calls, and orchestration.
//!
//! - **periodization**: per-week intensity, volume, and deload planning
//! - **selection**: candidate eligibility, scoring, ranking, and similarity
//! - **validation**: equipment, volume, uniqueness, balance, and limitation checks
//! - **config**: validated tables behind the periodization service

/// Validated configuration and its error type
pub mod config;

/// Periodization planning across five models
pub mod periodization;

/// Deterministic exercise scoring and ranking
pub mod selection;

/// Static analysis of assembled programs
pub mod validation;

pub use config::{ConfigError, PeriodizationConfig};
pub use periodization::{PeriodizationService, VolumeLimits};
pub use selection::{rank_candidates, score_candidate, similarity_score};
pub use validation::{ProgramValidator, ValidationContext};
