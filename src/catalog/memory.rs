// ABOUTME: In-memory exercise catalog backed by an insertion-ordered vector
// ABOUTME: Implements every ExerciseRepository lookup with catalog order preserved
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use pierre_core::models::equipment::{equipment_satisfied, normalize_equipment};
use pierre_core::models::{Exercise, ExerciseCategory, MovementPattern, WorkoutType};
use tokio::sync::RwLock;

use super::seed::default_exercises;
use super::{ExerciseQuery, ExerciseRepository};
use crate::errors::AppResult;

/// Exercise catalog held in memory
///
/// Lookups return exercises in insertion order. Inserting an id that already
/// exists replaces the stored exercise in place.
#[derive(Clone, Default)]
pub struct InMemoryExerciseRepository {
    exercises: Arc<RwLock<Vec<Exercise>>>,
}

impl InMemoryExerciseRepository {
    /// Create a catalog from the given exercises
    #[must_use]
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self {
            exercises: Arc::new(RwLock::new(exercises)),
        }
    }

    /// Create a catalog holding the default exercise set
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(default_exercises())
    }

    /// Add or replace an exercise
    pub async fn insert(&self, exercise: Exercise) {
        let mut exercises = self.exercises.write().await;
        if let Some(existing) = exercises.iter_mut().find(|e| e.id == exercise.id) {
            *existing = exercise;
        } else {
            exercises.push(exercise);
        }
    }

    /// Number of exercises in the catalog
    pub async fn len(&self) -> usize {
        self.exercises.read().await.len()
    }

    /// Whether the catalog is empty
    pub async fn is_empty(&self) -> bool {
        self.exercises.read().await.is_empty()
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Exercise>
    where
        F: Fn(&Exercise) -> bool + Send,
    {
        self.exercises
            .read()
            .await
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }
}

fn overlaps(items: &[String], wanted: &[String]) -> bool {
    items.iter().any(|item| wanted.contains(item))
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    async fn get_by_id(&self, exercise_id: &str) -> AppResult<Option<Exercise>> {
        Ok(self
            .exercises
            .read()
            .await
            .iter()
            .find(|e| e.id == exercise_id)
            .cloned())
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Exercise>> {
        Ok(self
            .exercises
            .read()
            .await
            .iter()
            .find(|e| e.name == name)
            .cloned())
    }

    async fn search_by_alias(&self, alias: &str) -> AppResult<Vec<Exercise>> {
        Ok(self
            .filtered(|e| e.aliases.iter().any(|a| a == alias))
            .await)
    }

    async fn get_by_muscle_groups(
        &self,
        muscles: &[String],
        include_secondary: bool,
    ) -> AppResult<Vec<Exercise>> {
        Ok(self
            .filtered(|e| {
                overlaps(&e.primary_muscles, muscles)
                    || (include_secondary && overlaps(&e.secondary_muscles, muscles))
            })
            .await)
    }

    async fn get_by_equipment(
        &self,
        equipment: &[String],
        require_all: bool,
    ) -> AppResult<Vec<Exercise>> {
        let available = normalize_equipment(equipment);
        Ok(self
            .filtered(|e| {
                if e.is_bodyweight() {
                    return true;
                }
                if require_all {
                    equipment_satisfied(&e.equipment, &available)
                } else {
                    !normalize_equipment(&e.equipment).is_disjoint(&available)
                }
            })
            .await)
    }

    async fn get_by_movement_pattern(&self, pattern: MovementPattern) -> AppResult<Vec<Exercise>> {
        Ok(self.filtered(|e| e.movement_pattern == pattern).await)
    }

    async fn get_by_category(&self, category: ExerciseCategory) -> AppResult<Vec<Exercise>> {
        Ok(self.filtered(|e| e.category == category).await)
    }

    async fn search(&self, query: &ExerciseQuery) -> AppResult<Vec<Exercise>> {
        let available = normalize_equipment(&query.equipment);
        let filter_equipment = !query.equipment.is_empty();

        let mut found = self
            .filtered(|e| {
                (query.muscle_groups.is_empty() || overlaps(&e.primary_muscles, &query.muscle_groups))
                    && (!filter_equipment || equipment_satisfied(&e.equipment, &available))
                    && query.movement_pattern.is_none_or(|p| e.movement_pattern == p)
                    && query.category.is_none_or(|c| e.category == c)
                    && query.supports_1rm.is_none_or(|r| e.supports_1rm == r)
            })
            .await;
        found.truncate(query.limit);
        Ok(found)
    }

    async fn get_all(&self, limit: usize) -> AppResult<Vec<Exercise>> {
        Ok(self
            .exercises
            .read()
            .await
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_for_workout_type(
        &self,
        workout_type: WorkoutType,
        equipment: &[String],
        limit: usize,
    ) -> AppResult<Vec<Exercise>> {
        let targets: Vec<String> = workout_type
            .target_muscles()
            .iter()
            .map(|m| (*m).to_owned())
            .collect();
        let available = normalize_equipment(equipment);

        let mut found = self
            .filtered(|e| {
                overlaps(&e.primary_muscles, &targets)
                    && equipment_satisfied(&e.equipment, &available)
            })
            .await;
        found.truncate(limit);
        Ok(found)
    }
}
