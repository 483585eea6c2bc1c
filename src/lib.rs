// ABOUTME: Main library entry point for the Pierre program engine
// ABOUTME: Generates periodized training programs with catalog ranking and LLM-assisted selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Program Engine
//!
//! Builds complete, periodized training programs from a goal, an experience
//! level, a schedule, and the equipment an athlete has.
//!
//! ## Features
//!
//! - **Periodization**: linear, undulating, block, conjugate, and reverse
//!   linear week plans with experience-based deload cadence
//! - **Hybrid exercise selection**: deterministic catalog ranking, optionally
//!   replaced by a language model with caching, bounded retries, and a
//!   deterministic fallback
//! - **Templates**: stored weekly skeletons scored against each request, with
//!   synthesized default splits when none fits
//! - **Validation**: equipment, weekly volume, uniqueness, muscle balance, and
//!   limitation checks on every generated program
//!
//! ## Architecture
//!
//! - **catalog** / **templates**: storage ports with in-memory implementations
//! - **llm**: chat-completion provider abstraction and prompts
//! - **selection**: deterministic and model-backed exercise selectors
//! - **generator**: orchestration entry point
//! - **config** / **logging**: environment configuration and tracing setup
//!
//! Pure algorithms (periodization, scoring, validation) live in
//! `pierre-intelligence`; shared models and errors in `pierre-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pierre_program_engine::catalog::InMemoryExerciseRepository;
//! use pierre_program_engine::config::EngineConfig;
//! use pierre_program_engine::errors::AppResult;
//! use pierre_program_engine::generator::{GenerateProgramRequest, ProgramGenerator};
//! use pierre_program_engine::models::{ExperienceLevel, TrainingGoal};
//! use pierre_program_engine::templates::InMemoryTemplateRepository;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let generator = ProgramGenerator::from_config(
//!         &EngineConfig::from_env(),
//!         Arc::new(InMemoryExerciseRepository::seeded()),
//!         Arc::new(InMemoryTemplateRepository::seeded()),
//!     )?;
//!
//!     let request = GenerateProgramRequest::new(
//!         TrainingGoal::Hypertrophy,
//!         ExperienceLevel::Intermediate,
//!         4,
//!         3,
//!     )
//!     .with_equipment(&["barbell", "dumbbells", "bench", "squat_rack"]);
//!
//!     let generated = generator.generate(&request).await?;
//!     println!("{}: {}", generated.program.name, generated.validation.summary);
//!     Ok(())
//! }
//! ```

/// Exercise catalog port and in-memory catalog
pub mod catalog;

/// Engine configuration from environment variables
pub mod config;

/// Error types shared with the workspace crates
pub mod errors;

/// Program generation orchestration
pub mod generator;

/// LLM provider abstraction for exercise selection
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Deterministic and model-backed exercise selection
pub mod selection;

/// Program templates and template matching
pub mod templates;

/// Domain models, re-exported from `pierre-core`
pub mod models {
    pub use pierre_core::models::*;
}

/// Pure training algorithms, re-exported from `pierre-intelligence`
pub mod intelligence {
    pub use pierre_intelligence::{
        rank_candidates, score_candidate, similarity_score, PeriodizationService,
        ProgramValidator, ValidationContext, VolumeLimits,
    };
}

pub use generator::{GenerateProgramRequest, GeneratedProgram, GenerationMetadata, ProgramGenerator};
pub use selection::{LlmExerciseSelector, SelectionOutcome};
