// ABOUTME: Program template port, in-memory store, default splits, and template selection
// ABOUTME: Templates provide the weekly skeleton a generated program is filled into
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Program Templates
//!
//! A template is a reusable weekly skeleton (workout days, muscle groups and
//! slot counts). The [`TemplateSelector`] picks the best stored template for
//! a request or synthesizes a default split when none fits.

/// In-memory template store
pub mod memory;
/// Template scoring and default structures
pub mod selector;
/// Built-in workout splits by sessions per week
pub mod splits;

pub use memory::InMemoryTemplateRepository;
pub use selector::{increment_usage_count, TemplateMatch, TemplateSelector};

use async_trait::async_trait;
use pierre_core::models::{ExperienceLevel, ProgramTemplate, TrainingGoal};
use uuid::Uuid;

use crate::errors::AppResult;

/// Template storage contract
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Template by id
    async fn get_by_id(&self, template_id: Uuid) -> AppResult<Option<ProgramTemplate>>;

    /// Templates for a goal and experience level, most used first
    ///
    /// When given, `duration_weeks` keeps templates within two weeks of it and
    /// `sessions_per_week` keeps templates whose first week has exactly that
    /// many workouts.
    async fn get_by_criteria(
        &self,
        goal: TrainingGoal,
        experience_level: ExperienceLevel,
        sessions_per_week: Option<u32>,
        duration_weeks: Option<u32>,
    ) -> AppResult<Vec<ProgramTemplate>>;

    /// Templates shipped with the system, most used first
    async fn get_system_templates(&self) -> AppResult<Vec<ProgramTemplate>>;

    /// Templates created by a user
    async fn get_user_templates(&self, user_id: &str) -> AppResult<Vec<ProgramTemplate>>;

    /// Store a new template; a nil id is replaced with a fresh one
    async fn create(&self, template: ProgramTemplate) -> AppResult<ProgramTemplate>;

    /// Atomically add one to a template's usage count
    ///
    /// Returns `Ok(None)` when the store cannot increment atomically, and
    /// `Ok(Some(found))` otherwise.
    async fn try_increment_usage_atomic(&self, _template_id: Uuid) -> AppResult<Option<bool>> {
        Ok(None)
    }

    /// Overwrite a template's usage count; `false` when the id is unknown
    async fn set_usage_count(&self, template_id: Uuid, usage_count: u64) -> AppResult<bool>;
}
