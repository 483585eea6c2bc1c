// ABOUTME: In-memory template repository backed by DashMap with atomic usage counting
// ABOUTME: Seeds two system templates for composition roots and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use pierre_core::constants::templates::DURATION_TOLERANCE_WEEKS;
use pierre_core::models::{
    ExperienceLevel, ProgramStructure, ProgramTemplate, TrainingGoal, WeekPattern, WorkoutType,
};
use uuid::Uuid;

use super::splits::workout_slot;
use super::TemplateRepository;
use crate::errors::AppResult;

/// Template store held in memory
///
/// `DashMap` shards the lock so usage increments on different templates do
/// not contend.
#[derive(Clone, Default)]
pub struct InMemoryTemplateRepository {
    templates: Arc<DashMap<Uuid, ProgramTemplate>>,
}

impl InMemoryTemplateRepository {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the built-in system templates
    #[must_use]
    pub fn seeded() -> Self {
        let repo = Self::new();
        for template in system_templates() {
            repo.templates.insert(template.id, template);
        }
        repo
    }

    /// Number of stored templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn sorted_by_usage(mut templates: Vec<ProgramTemplate>) -> Vec<ProgramTemplate> {
        templates.sort_by(|a, b| {
            b.usage_count
                .cmp(&a.usage_count)
                .then_with(|| a.name.cmp(&b.name))
        });
        templates
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn get_by_id(&self, template_id: Uuid) -> AppResult<Option<ProgramTemplate>> {
        Ok(self.templates.get(&template_id).map(|t| t.value().clone()))
    }

    async fn get_by_criteria(
        &self,
        goal: TrainingGoal,
        experience_level: ExperienceLevel,
        sessions_per_week: Option<u32>,
        duration_weeks: Option<u32>,
    ) -> AppResult<Vec<ProgramTemplate>> {
        let matches = self
            .templates
            .iter()
            .filter(|t| t.goal == goal && t.experience_level == experience_level)
            .filter(|t| {
                duration_weeks
                    .is_none_or(|d| t.duration_weeks.abs_diff(d) <= DURATION_TOLERANCE_WEEKS)
            })
            .filter(|t| {
                sessions_per_week.is_none_or(|s| {
                    t.structure.first_week_workouts().len() == s as usize
                        && !t.structure.weeks.is_empty()
                })
            })
            .map(|t| t.value().clone())
            .collect();
        Ok(Self::sorted_by_usage(matches))
    }

    async fn get_system_templates(&self) -> AppResult<Vec<ProgramTemplate>> {
        let system = self
            .templates
            .iter()
            .filter(|t| t.is_system)
            .map(|t| t.value().clone())
            .collect();
        Ok(Self::sorted_by_usage(system))
    }

    async fn get_user_templates(&self, user_id: &str) -> AppResult<Vec<ProgramTemplate>> {
        let mut owned: Vec<ProgramTemplate> = self
            .templates
            .iter()
            .filter(|t| !t.is_system && t.created_by.as_deref() == Some(user_id))
            .map(|t| t.value().clone())
            .collect();
        owned.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(owned)
    }

    async fn create(&self, mut template: ProgramTemplate) -> AppResult<ProgramTemplate> {
        if template.id.is_nil() {
            template.id = Uuid::new_v4();
        }
        self.templates.insert(template.id, template.clone());
        Ok(template)
    }

    async fn try_increment_usage_atomic(&self, template_id: Uuid) -> AppResult<Option<bool>> {
        let found = self.templates.get_mut(&template_id).is_some_and(|mut t| {
            t.usage_count = t.usage_count.saturating_add(1);
            true
        });
        Ok(Some(found))
    }

    async fn set_usage_count(&self, template_id: Uuid, usage_count: u64) -> AppResult<bool> {
        Ok(self
            .templates
            .get_mut(&template_id)
            .is_some_and(|mut t| {
                t.usage_count = usage_count;
                true
            }))
    }
}

const PPL_PUSH: &[&str] = &["chest", "anterior_deltoid", "triceps"];
const PPL_PULL: &[&str] = &["lats", "rhomboids", "biceps"];
const PPL_LEGS: &[&str] = &["quadriceps", "hamstrings", "glutes"];
const PPL_UPPER: &[&str] = &["chest", "lats", "anterior_deltoid"];
const STRENGTH_A: &[&str] = &["chest", "lats", "quadriceps"];
const STRENGTH_B: &[&str] = &["anterior_deltoid", "hamstrings", "biceps"];
const STRENGTH_C: &[&str] = &["chest", "lats", "glutes"];

/// Built-in templates shipped with the engine
#[must_use]
pub fn system_templates() -> Vec<ProgramTemplate> {
    vec![
        ProgramTemplate {
            id: Uuid::new_v4(),
            name: "PPL Hypertrophy 4x".to_owned(),
            goal: TrainingGoal::Hypertrophy,
            experience_level: ExperienceLevel::Intermediate,
            duration_weeks: 8,
            usage_count: 150,
            is_system: true,
            created_by: None,
            structure: ProgramStructure {
                mesocycle_length: 4,
                deload_frequency: 4,
                split_type: "push_pull_legs".to_owned(),
                weeks: vec![WeekPattern {
                    focus: "Muscle Building".to_owned(),
                    workouts: vec![
                        workout_slot(1, "Push Day", WorkoutType::Push, PPL_PUSH, 5, 60),
                        workout_slot(2, "Pull Day", WorkoutType::Pull, PPL_PULL, 5, 60),
                        workout_slot(4, "Legs Day", WorkoutType::Legs, PPL_LEGS, 5, 60),
                        workout_slot(5, "Upper Day", WorkoutType::Upper, PPL_UPPER, 6, 60),
                    ],
                }],
            },
        },
        ProgramTemplate {
            id: Uuid::new_v4(),
            name: "Strength Block 3x".to_owned(),
            goal: TrainingGoal::Strength,
            experience_level: ExperienceLevel::Intermediate,
            duration_weeks: 12,
            usage_count: 80,
            is_system: true,
            created_by: None,
            structure: ProgramStructure {
                mesocycle_length: 4,
                deload_frequency: 4,
                split_type: "full_body".to_owned(),
                weeks: vec![WeekPattern {
                    focus: "Strength Development".to_owned(),
                    workouts: vec![
                        workout_slot(1, "Full Body A", WorkoutType::FullBody, STRENGTH_A, 6, 75),
                        workout_slot(3, "Full Body B", WorkoutType::FullBody, STRENGTH_B, 6, 75),
                        workout_slot(5, "Full Body C", WorkoutType::FullBody, STRENGTH_C, 6, 75),
                    ],
                }],
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_criteria_filter_duration_window() {
        let repo = InMemoryTemplateRepository::seeded();
        let near = repo
            .get_by_criteria(TrainingGoal::Hypertrophy, ExperienceLevel::Intermediate, None, Some(10))
            .await
            .unwrap();
        assert_eq!(near.len(), 1);
        let far = repo
            .get_by_criteria(TrainingGoal::Hypertrophy, ExperienceLevel::Intermediate, None, Some(4))
            .await
            .unwrap();
        assert!(far.is_empty());
    }

    #[tokio::test]
    async fn test_criteria_filter_sessions() {
        let repo = InMemoryTemplateRepository::seeded();
        let four = repo
            .get_by_criteria(TrainingGoal::Hypertrophy, ExperienceLevel::Intermediate, Some(4), None)
            .await
            .unwrap();
        assert_eq!(four.len(), 1);
        let three = repo
            .get_by_criteria(TrainingGoal::Hypertrophy, ExperienceLevel::Intermediate, Some(3), None)
            .await
            .unwrap();
        assert!(three.is_empty());
    }

    #[tokio::test]
    async fn test_atomic_increment() {
        let repo = InMemoryTemplateRepository::seeded();
        let template = repo.get_system_templates().await.unwrap().remove(0);
        assert_eq!(
            repo.try_increment_usage_atomic(template.id).await.unwrap(),
            Some(true)
        );
        let updated = repo.get_by_id(template.id).await.unwrap().unwrap();
        assert_eq!(updated.usage_count, template.usage_count + 1);
        assert_eq!(
            repo.try_increment_usage_atomic(Uuid::new_v4()).await.unwrap(),
            Some(false)
        );
    }

    #[tokio::test]
    async fn test_user_templates_exclude_system() {
        let repo = InMemoryTemplateRepository::seeded();
        let mut template = system_templates().remove(1);
        template.id = Uuid::nil();
        template.is_system = false;
        template.created_by = Some("user-1".to_owned());
        let created = repo.create(template).await.unwrap();
        assert!(!created.id.is_nil());

        let mine = repo.get_user_templates("user-1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert!(repo.get_user_templates("user-2").await.unwrap().is_empty());
        assert_eq!(repo.get_system_templates().await.unwrap().len(), 2);
    }
}
