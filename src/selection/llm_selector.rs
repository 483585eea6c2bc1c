// ABOUTME: Model-backed exercise selector with response cache, bounded retries, and fallback
// ABOUTME: Always yields a workout; exhausted retries degrade to the deterministic selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use pierre_core::constants::llm::{SELECTION_MAX_TOKENS, SELECTION_TEMPERATURE};
use pierre_core::models::{ExerciseSelectionResponse, SlotRequirements};
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use super::cache::{cache_key, CacheStats, Clock, SelectionCache, SystemClock};
use super::deterministic::DeterministicSelector;
use super::response::parse_selection_response;
use super::retry::{FailureKind, RetryPolicy};
use super::{DegradationReason, SelectionOutcome};
use crate::config::{RetryConfig, SelectionCacheConfig};
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::{build_user_prompt, EXERCISE_SELECTION_SYSTEM_PROMPT};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::EngineLogger;

/// Exercise selector that delegates choice to a language model
#[derive(Clone)]
pub struct LlmExerciseSelector {
    provider: Arc<dyn LlmProvider>,
    model: String,
    policy: RetryPolicy,
    cache: SelectionCache,
}

impl LlmExerciseSelector {
    /// Create a selector on the wall clock
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the retry or cache configuration is invalid
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        retry: &RetryConfig,
        cache: &SelectionCacheConfig,
    ) -> AppResult<Self> {
        Self::with_clock(provider, model, retry, cache, Arc::new(SystemClock))
    }

    /// Create a selector whose cache reads time from `clock`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the retry or cache configuration is invalid
    pub fn with_clock(
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        retry: &RetryConfig,
        cache: &SelectionCacheConfig,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        Ok(Self {
            provider,
            model: model.into(),
            policy: RetryPolicy::new(retry)?,
            cache: SelectionCache::with_clock(cache, clock)?,
        })
    }

    /// Model identifier sent with each request
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, requirements: &SlotRequirements) -> ChatRequest {
        let user_prompt = build_user_prompt(requirements);
        let capabilities = self.provider.capabilities();
        let messages = if capabilities.supports_system_messages() {
            vec![
                ChatMessage::system(EXERCISE_SELECTION_SYSTEM_PROMPT),
                ChatMessage::user(user_prompt),
            ]
        } else {
            vec![ChatMessage::user(format!(
                "{EXERCISE_SELECTION_SYSTEM_PROMPT}\n\n{user_prompt}"
            ))]
        };

        let request = ChatRequest::new(messages)
            .with_model(self.model.clone())
            .with_temperature(SELECTION_TEMPERATURE)
            .with_max_tokens(SELECTION_MAX_TOKENS);
        if capabilities.supports_json_mode() {
            request.with_json_response()
        } else {
            request
        }
    }

    async fn attempt(
        &self,
        request: &ChatRequest,
        requirements: &SlotRequirements,
    ) -> AppResult<ExerciseSelectionResponse> {
        let reply = self.provider.complete(request).await?;
        parse_selection_response(&reply.content, requirements)
    }

    fn degrade(requirements: &SlotRequirements, attempts: u32, error: &AppError) -> SelectionOutcome {
        let response = DeterministicSelector::fallback_response(requirements);
        warn!(
            workout_type = %requirements.workout_type,
            attempts,
            error = %error,
            "LLM selection unavailable, using deterministic fallback"
        );
        EngineLogger::log_selection(
            requirements.workout_type.as_str(),
            response.exercises.len(),
            "fallback",
            attempts,
        );
        SelectionOutcome::Degraded {
            response,
            reason: DegradationReason {
                attempts,
                last_error: error.to_string(),
            },
        }
    }

    /// Select exercises for one workout
    ///
    /// Requirements outside the allowed count, intensity, or volume ranges
    /// degrade immediately. A cache hit returns without calling the model. Otherwise the model is
    /// called up to `max_retries + 1` times with backoff between attempts;
    /// every failure kind consumes the same budget. When the budget is spent
    /// the deterministic workout comes back as `Degraded`.
    #[instrument(skip(self, requirements), fields(workout_type = %requirements.workout_type))]
    pub async fn select_exercises(
        &self,
        requirements: &SlotRequirements,
        use_cache: bool,
    ) -> SelectionOutcome {
        if let Err(error) = requirements.validate() {
            return Self::degrade(requirements, 0, &error);
        }

        let key = cache_key(requirements);
        if use_cache {
            if let Some(response) = self.cache.get(&key).await {
                debug!(key = %key, "Selection cache hit");
                EngineLogger::log_selection(
                    requirements.workout_type.as_str(),
                    response.exercises.len(),
                    "cache",
                    0,
                );
                return SelectionOutcome::Success { response };
            }
        }

        if requirements.candidates.is_empty() {
            let error = AppError::invalid_input("No candidate exercises to choose from");
            return Self::degrade(requirements, 0, &error);
        }

        let request = self.build_request(requirements);
        let total = self.policy.total_attempts();
        let mut last_error = AppError::internal("LLM selection was not attempted");

        for attempt in 0..total {
            match self.attempt(&request, requirements).await {
                Ok(response) => {
                    if use_cache {
                        self.cache.insert(key, response.clone()).await;
                    }
                    EngineLogger::log_selection(
                        requirements.workout_type.as_str(),
                        response.exercises.len(),
                        "llm",
                        attempt + 1,
                    );
                    return SelectionOutcome::Success { response };
                }
                Err(e) => {
                    let kind = FailureKind::classify(&e);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = total,
                        failure = %kind,
                        error = %e,
                        "LLM selection attempt failed"
                    );
                    last_error = e;
                    if attempt + 1 < total {
                        let delay = self.policy.backoff_delay(attempt, kind);
                        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                        debug!(delay_ms, "Backing off before retry");
                        sleep(delay).await;
                    }
                }
            }
        }

        Self::degrade(requirements, total, &last_error)
    }

    /// Cache occupancy snapshot
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Drop every cached response
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}
