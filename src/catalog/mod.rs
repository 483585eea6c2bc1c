// ABOUTME: Exercise catalog port with query types and shared similarity/name lookups
// ABOUTME: Backing stores implement the fallible primitives; safe lookups degrade to empty results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Catalog
//!
//! Read-only source of [`Exercise`] records used during program generation.
//! The catalog never mutates exercise ids.
//!
//! Most lookups surface backing-store failures as `AppError`. The two lookups
//! used on best-effort paths, [`ExerciseRepository::get_similar_exercises`]
//! and [`ExerciseRepository::validate_exercise_name`], log the failure and
//! return an empty result instead.

/// In-memory catalog implementation
pub mod memory;
/// Default exercise seed data
pub mod seed;

pub use memory::InMemoryExerciseRepository;

use std::cmp::Ordering;

use async_trait::async_trait;
use pierre_core::constants::selection::{CATALOG_LIST_LIMIT, SLOT_SEARCH_LIMIT};
use pierre_core::models::{Exercise, ExerciseCategory, MovementPattern, WorkoutType};
use pierre_intelligence::similarity_score;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppResult;

/// Multi-criteria catalog search
///
/// Empty or `None` criteria do not filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseQuery {
    /// Exercises whose primary muscles overlap these
    pub muscle_groups: Vec<String>,
    /// Equipment available; exercises must not need anything else
    pub equipment: Vec<String>,
    /// Movement pattern filter
    pub movement_pattern: Option<MovementPattern>,
    /// Category filter
    pub category: Option<ExerciseCategory>,
    /// 1RM-support filter
    pub supports_1rm: Option<bool>,
    /// Maximum results
    pub limit: usize,
}

impl Default for ExerciseQuery {
    fn default() -> Self {
        Self {
            muscle_groups: Vec::new(),
            equipment: Vec::new(),
            movement_pattern: None,
            category: None,
            supports_1rm: None,
            limit: SLOT_SEARCH_LIMIT,
        }
    }
}

impl ExerciseQuery {
    /// Filter by primary muscles
    #[must_use]
    pub fn with_muscles(mut self, muscles: &[String]) -> Self {
        self.muscle_groups = muscles.to_vec();
        self
    }

    /// Filter by available equipment
    #[must_use]
    pub fn with_equipment(mut self, equipment: &[String]) -> Self {
        self.equipment = equipment.to_vec();
        self
    }

    /// Filter by movement pattern
    #[must_use]
    pub const fn with_movement_pattern(mut self, pattern: Option<MovementPattern>) -> Self {
        self.movement_pattern = pattern;
        self
    }

    /// Filter by category
    #[must_use]
    pub const fn with_category(mut self, category: Option<ExerciseCategory>) -> Self {
        self.category = category;
        self
    }

    /// Cap the result count
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Exercise catalog contract
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Exercise by id
    async fn get_by_id(&self, exercise_id: &str) -> AppResult<Option<Exercise>>;

    /// Exercise by exact name
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Exercise>>;

    /// Exercises listing `alias` among their aliases
    async fn search_by_alias(&self, alias: &str) -> AppResult<Vec<Exercise>>;

    /// Exercises whose primary (and optionally secondary) muscles overlap `muscles`
    async fn get_by_muscle_groups(
        &self,
        muscles: &[String],
        include_secondary: bool,
    ) -> AppResult<Vec<Exercise>>;

    /// Exercises by equipment
    ///
    /// With `require_all` the exercise may only need equipment from the list;
    /// otherwise sharing any item is enough. Bodyweight exercises always match.
    async fn get_by_equipment(
        &self,
        equipment: &[String],
        require_all: bool,
    ) -> AppResult<Vec<Exercise>>;

    /// Exercises with a movement pattern
    async fn get_by_movement_pattern(&self, pattern: MovementPattern) -> AppResult<Vec<Exercise>>;

    /// Exercises in a category
    async fn get_by_category(&self, category: ExerciseCategory) -> AppResult<Vec<Exercise>>;

    /// Multi-criteria search
    async fn search(&self, query: &ExerciseQuery) -> AppResult<Vec<Exercise>>;

    /// Every exercise, up to `limit`
    async fn get_all(&self, limit: usize) -> AppResult<Vec<Exercise>>;

    /// Exercises suited to a workout type and performable with `equipment`
    async fn get_for_workout_type(
        &self,
        workout_type: WorkoutType,
        equipment: &[String],
        limit: usize,
    ) -> AppResult<Vec<Exercise>>;

    /// Alternatives sharing the exercise's movement pattern, most similar first
    ///
    /// Unknown ids and backing-store failures yield an empty list.
    async fn get_similar_exercises(&self, exercise_id: &str, limit: usize) -> Vec<Exercise> {
        let source = match self.get_by_id(exercise_id).await {
            Ok(Some(source)) => source,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(exercise_id, error = %e, "Similar exercise lookup failed");
                return Vec::new();
            }
        };
        if source.primary_muscles.is_empty() {
            return Vec::new();
        }

        let peers = match self.get_by_movement_pattern(source.movement_pattern).await {
            Ok(peers) => peers,
            Err(e) => {
                warn!(exercise_id, error = %e, "Similar exercise lookup failed");
                return Vec::new();
            }
        };

        let mut scored: Vec<(f64, Exercise)> = peers
            .into_iter()
            .filter(|peer| peer.id != source.id)
            .map(|peer| (similarity_score(&source, &peer), peer))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.into_iter().take(limit).map(|(_, e)| e).collect()
    }

    /// Resolve a free-text name: case-insensitive name match, then alias match
    ///
    /// Blank input and backing-store failures yield `None`.
    async fn validate_exercise_name(&self, name: &str) -> Option<Exercise> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }

        let all = match self.get_all(CATALOG_LIST_LIMIT).await {
            Ok(all) => all,
            Err(e) => {
                warn!(name, error = %e, "Exercise name validation failed");
                return None;
            }
        };

        if let Some(found) = all.iter().find(|e| e.name.to_lowercase() == wanted) {
            return Some(found.clone());
        }
        all.into_iter()
            .find(|e| e.aliases.iter().any(|a| a.to_lowercase() == wanted))
    }
}
