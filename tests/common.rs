// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides seeded repositories, a scripted LLM provider, and failing store doubles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pierre_program_engine`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::collections::VecDeque;
use std::env;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use pierre_program_engine::catalog::{ExerciseQuery, ExerciseRepository, InMemoryExerciseRepository};
use pierre_program_engine::errors::{AppError, AppResult};
use pierre_program_engine::generator::GenerateProgramRequest;
use pierre_program_engine::llm::{
    ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage,
};
use pierre_program_engine::models::{
    Exercise, ExerciseCategory, ExperienceLevel, MovementPattern, ProgramTemplate,
    SlotRequirements, TrainingGoal, WorkoutType,
};
use pierre_program_engine::templates::{InMemoryTemplateRepository, TemplateRepository};
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG raises verbosity when debugging a failure
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Equipment used by the end-to-end scenarios
pub const GYM_EQUIPMENT: [&str; 4] = ["barbell", "dumbbells", "bench", "squat_rack"];

/// Convert string literals to owned strings
pub fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// Seeded in-memory catalog
pub fn seeded_catalog() -> Arc<InMemoryExerciseRepository> {
    Arc::new(InMemoryExerciseRepository::seeded())
}

/// Seeded in-memory template store
pub fn seeded_templates() -> Arc<InMemoryTemplateRepository> {
    Arc::new(InMemoryTemplateRepository::seeded())
}

/// 4-week, 3-session intermediate hypertrophy request with a home gym
pub fn hypertrophy_request() -> GenerateProgramRequest {
    GenerateProgramRequest::new(TrainingGoal::Hypertrophy, ExperienceLevel::Intermediate, 4, 3)
        .with_equipment(&GYM_EQUIPMENT)
}

/// Push-day requirements with three chest candidates
pub fn push_requirements() -> SlotRequirements {
    let candidates = vec![
        Exercise::new("bench-press", "Bench Press", MovementPattern::Push, ExerciseCategory::Compound)
            .with_primary(&["chest"])
            .with_equipment(&["barbell", "bench"]),
        Exercise::new("push-up", "Push-Up", MovementPattern::Push, ExerciseCategory::Compound)
            .with_primary(&["chest"]),
        Exercise::new("dumbbell-fly", "Dumbbell Fly", MovementPattern::Push, ExerciseCategory::Isolation)
            .with_primary(&["chest"])
            .with_equipment(&["dumbbells"]),
        Exercise::new("tricep-dip", "Tricep Dip", MovementPattern::Push, ExerciseCategory::Compound)
            .with_primary(&["triceps"]),
    ];
    SlotRequirements::new(
        WorkoutType::Push,
        TrainingGoal::Hypertrophy,
        ExperienceLevel::Intermediate,
    )
    .with_target_muscles(owned(&["chest", "triceps"]))
    .with_equipment(owned(&["barbell", "bench", "dumbbells"]))
    .with_exercise_count(3)
    .with_candidates(candidates)
}

/// JSON body a model would return for the given ids
pub fn selection_json(ids: &[&str]) -> String {
    let exercises: Vec<serde_json::Value> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            serde_json::json!({
                "exercise_id": id,
                "sets": 4,
                "reps": "8-10",
                "rest_seconds": 90,
                "order": i + 1,
            })
        })
        .collect();
    serde_json::json!({
        "exercises": exercises,
        "workout_notes": "Controlled tempo",
        "estimated_duration_minutes": 50,
    })
    .to_string()
}

// ============================================================================
// Scripted LLM Provider
// ============================================================================

/// One scripted provider reply
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Successful completion with this content
    Content(String),
    /// 429 from the provider
    RateLimited,
    /// Provider unreachable or 5xx
    Unavailable,
    /// Credentials rejected
    AuthFailed,
}

impl ScriptedReply {
    fn into_result(self) -> AppResult<ChatResponse> {
        match self {
            Self::Content(content) => Ok(ChatResponse {
                content,
                model: "scripted-model".to_owned(),
                usage: Some(TokenUsage {
                    prompt_tokens: 100,
                    completion_tokens: 50,
                    total_tokens: 150,
                }),
                finish_reason: Some("stop".to_owned()),
            }),
            Self::RateLimited => Err(AppError::rate_limited("LLM rate limit reached")),
            Self::Unavailable => Err(AppError::external_unavailable("LLM", "connection refused")),
            Self::AuthFailed => Err(AppError::auth_failed("LLM", "invalid API key")),
        }
    }
}

/// LLM provider double replaying scripted replies and counting calls
///
/// Replies are consumed in order; once the script runs out every call gets
/// `default_reply`.
pub struct ScriptedLlmProvider {
    script: Mutex<VecDeque<ScriptedReply>>,
    default_reply: ScriptedReply,
    capabilities: LlmCapabilities,
    calls: AtomicU32,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedLlmProvider {
    /// Provider answering every call with `reply`
    pub fn always(reply: ScriptedReply) -> Self {
        Self::scripted(Vec::new(), reply)
    }

    /// Provider replaying `script`, then `default_reply`
    pub fn scripted(script: Vec<ScriptedReply>, default_reply: ScriptedReply) -> Self {
        Self {
            script: Mutex::new(script.into()),
            default_reply,
            capabilities: LlmCapabilities::structured_chat(),
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Override reported capabilities
    pub fn with_capabilities(mut self, capabilities: LlmCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Number of `complete` calls so far
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received, in order
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlmProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    fn available_models(&self) -> &'static [&'static str] {
        &["scripted-model"]
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());
        reply.into_result()
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

// ============================================================================
// Store Doubles
// ============================================================================

/// Catalog whose every fallible lookup fails
pub struct FailingCatalog;

fn offline<T>() -> AppResult<T> {
    Err(AppError::storage("catalog offline"))
}

#[async_trait]
impl ExerciseRepository for FailingCatalog {
    async fn get_by_id(&self, _exercise_id: &str) -> AppResult<Option<Exercise>> {
        offline()
    }

    async fn get_by_name(&self, _name: &str) -> AppResult<Option<Exercise>> {
        offline()
    }

    async fn search_by_alias(&self, _alias: &str) -> AppResult<Vec<Exercise>> {
        offline()
    }

    async fn get_by_muscle_groups(
        &self,
        _muscles: &[String],
        _include_secondary: bool,
    ) -> AppResult<Vec<Exercise>> {
        offline()
    }

    async fn get_by_equipment(
        &self,
        _equipment: &[String],
        _require_all: bool,
    ) -> AppResult<Vec<Exercise>> {
        offline()
    }

    async fn get_by_movement_pattern(&self, _pattern: MovementPattern) -> AppResult<Vec<Exercise>> {
        offline()
    }

    async fn get_by_category(&self, _category: ExerciseCategory) -> AppResult<Vec<Exercise>> {
        offline()
    }

    async fn search(&self, _query: &ExerciseQuery) -> AppResult<Vec<Exercise>> {
        offline()
    }

    async fn get_all(&self, _limit: usize) -> AppResult<Vec<Exercise>> {
        offline()
    }

    async fn get_for_workout_type(
        &self,
        _workout_type: WorkoutType,
        _equipment: &[String],
        _limit: usize,
    ) -> AppResult<Vec<Exercise>> {
        offline()
    }
}

/// Template store without an atomic usage increment
///
/// Delegates to an in-memory store but keeps the trait's default
/// `try_increment_usage_atomic`, forcing the read-then-write path.
#[derive(Clone, Default)]
pub struct NonAtomicTemplateRepository {
    inner: InMemoryTemplateRepository,
}

impl NonAtomicTemplateRepository {
    pub fn seeded() -> Self {
        Self {
            inner: InMemoryTemplateRepository::seeded(),
        }
    }
}

#[async_trait]
impl TemplateRepository for NonAtomicTemplateRepository {
    async fn get_by_id(&self, template_id: Uuid) -> AppResult<Option<ProgramTemplate>> {
        self.inner.get_by_id(template_id).await
    }

    async fn get_by_criteria(
        &self,
        goal: TrainingGoal,
        experience_level: ExperienceLevel,
        sessions_per_week: Option<u32>,
        duration_weeks: Option<u32>,
    ) -> AppResult<Vec<ProgramTemplate>> {
        self.inner
            .get_by_criteria(goal, experience_level, sessions_per_week, duration_weeks)
            .await
    }

    async fn get_system_templates(&self) -> AppResult<Vec<ProgramTemplate>> {
        self.inner.get_system_templates().await
    }

    async fn get_user_templates(&self, user_id: &str) -> AppResult<Vec<ProgramTemplate>> {
        self.inner.get_user_templates(user_id).await
    }

    async fn create(&self, template: ProgramTemplate) -> AppResult<ProgramTemplate> {
        self.inner.create(template).await
    }

    async fn set_usage_count(&self, template_id: Uuid, usage_count: u64) -> AppResult<bool> {
        self.inner.set_usage_count(template_id, usage_count).await
    }
}

/// Template store that is always unreachable
pub struct FailingTemplateRepository;

#[async_trait]
impl TemplateRepository for FailingTemplateRepository {
    async fn get_by_id(&self, _template_id: Uuid) -> AppResult<Option<ProgramTemplate>> {
        Err(AppError::storage("template store offline"))
    }

    async fn get_by_criteria(
        &self,
        _goal: TrainingGoal,
        _experience_level: ExperienceLevel,
        _sessions_per_week: Option<u32>,
        _duration_weeks: Option<u32>,
    ) -> AppResult<Vec<ProgramTemplate>> {
        Err(AppError::storage("template store offline"))
    }

    async fn get_system_templates(&self) -> AppResult<Vec<ProgramTemplate>> {
        Err(AppError::storage("template store offline"))
    }

    async fn get_user_templates(&self, _user_id: &str) -> AppResult<Vec<ProgramTemplate>> {
        Err(AppError::storage("template store offline"))
    }

    async fn create(&self, _template: ProgramTemplate) -> AppResult<ProgramTemplate> {
        Err(AppError::storage("template store offline"))
    }

    async fn set_usage_count(&self, _template_id: Uuid, _usage_count: u64) -> AppResult<bool> {
        Err(AppError::storage("template store offline"))
    }
}
