// ABOUTME: Integration tests for the model-backed exercise selector
// ABOUTME: Covers caching, TTL expiry, retry budget, fallback, and reply repair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use common::{
    init_test_logging, push_requirements, selection_json, ScriptedLlmProvider, ScriptedReply,
};
use pierre_program_engine::config::{RetryConfig, SelectionCacheConfig};
use pierre_program_engine::llm::{LlmCapabilities, MessageRole};
use pierre_program_engine::selection::{LlmExerciseSelector, ManualClock, SelectionOutcome};

fn selector(provider: &Arc<ScriptedLlmProvider>, max_retries: u32) -> Result<LlmExerciseSelector> {
    Ok(LlmExerciseSelector::new(
        provider.clone(),
        "scripted-model",
        &RetryConfig::immediate(max_retries),
        &SelectionCacheConfig::default(),
    )?)
}

// =============================================================================
// Cache
// =============================================================================

#[tokio::test]
async fn test_cache_hit_skips_second_model_call() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::always(ScriptedReply::Content(
        selection_json(&["bench-press", "dumbbell-fly"]),
    )));
    let selector = selector(&provider, 2)?;
    let requirements = push_requirements();

    let first = selector.select_exercises(&requirements, true).await;
    let second = selector.select_exercises(&requirements, true).await;

    assert_eq!(provider.calls(), 1);
    assert!(!first.is_degraded());
    assert_eq!(first.response(), second.response());
    assert_eq!(selector.cache_stats().await.valid_entries, 1);
    Ok(())
}

#[tokio::test]
async fn test_cache_bypass_calls_model_each_time() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::always(ScriptedReply::Content(
        selection_json(&["push-up"]),
    )));
    let selector = selector(&provider, 0)?;
    let requirements = push_requirements();

    selector.select_exercises(&requirements, false).await;
    selector.select_exercises(&requirements, false).await;

    assert_eq!(provider.calls(), 2);
    assert_eq!(selector.cache_stats().await.total_entries, 0);
    Ok(())
}

#[tokio::test]
async fn test_ttl_expiry_forces_new_call() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::always(ScriptedReply::Content(
        selection_json(&["bench-press"]),
    )));
    let clock = Arc::new(ManualClock::new());
    let cache = SelectionCacheConfig {
        max_entries: 10,
        ttl_secs: 60,
    };
    let selector = LlmExerciseSelector::with_clock(
        provider.clone(),
        "scripted-model",
        &RetryConfig::immediate(0),
        &cache,
        clock.clone(),
    )?;
    let requirements = push_requirements();

    selector.select_exercises(&requirements, true).await;
    clock.advance(Duration::from_secs(60));
    selector.select_exercises(&requirements, true).await;
    assert_eq!(provider.calls(), 1, "entry is still fresh at exactly the TTL");

    clock.advance(Duration::from_secs(1));
    selector.select_exercises(&requirements, true).await;
    assert_eq!(provider.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_clear_cache() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::always(ScriptedReply::Content(
        selection_json(&["bench-press"]),
    )));
    let selector = selector(&provider, 0)?;
    let requirements = push_requirements();

    selector.select_exercises(&requirements, true).await;
    selector.clear_cache().await;
    selector.select_exercises(&requirements, true).await;

    assert_eq!(provider.calls(), 2);
    Ok(())
}

// =============================================================================
// Retries and fallback
// =============================================================================

#[tokio::test]
async fn test_fallback_after_consecutive_failures() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::always(ScriptedReply::Unavailable));
    let selector = selector(&provider, 2)?;
    let requirements = push_requirements();

    let outcome = selector.select_exercises(&requirements, true).await;

    assert_eq!(provider.calls(), 3);
    let reason = outcome.degradation().expect("degraded outcome");
    assert_eq!(reason.attempts, 3);
    assert!(reason.last_error.contains("connection refused"));

    let response = outcome.response();
    assert!(!response.exercises.is_empty());
    assert!(response.exercises.len() <= 3);
    assert_eq!(
        response.workout_notes.as_deref(),
        Some("Fallback selection due to LLM unavailability")
    );
    assert_eq!(selector.cache_stats().await.total_entries, 0);
    Ok(())
}

#[tokio::test]
async fn test_every_failure_kind_consumes_the_budget() -> Result<()> {
    init_test_logging();
    for reply in [
        ScriptedReply::RateLimited,
        ScriptedReply::AuthFailed,
        ScriptedReply::Content("not json at all".to_owned()),
    ] {
        let provider = Arc::new(ScriptedLlmProvider::always(reply));
        let selector = selector(&provider, 1)?;
        let outcome = selector.select_exercises(&push_requirements(), true).await;
        assert!(outcome.is_degraded());
        assert_eq!(provider.calls(), 2);
    }
    Ok(())
}

#[tokio::test]
async fn test_recovers_after_transient_failure() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::scripted(
        vec![ScriptedReply::RateLimited, ScriptedReply::Unavailable],
        ScriptedReply::Content(selection_json(&["push-up", "bench-press"])),
    ));
    let selector = selector(&provider, 2)?;

    let outcome = selector.select_exercises(&push_requirements(), true).await;

    assert_eq!(provider.calls(), 3);
    match outcome {
        SelectionOutcome::Success { response } => {
            assert_eq!(response.exercise_ids(), vec!["push-up", "bench-press"]);
        }
        SelectionOutcome::Degraded { reason, .. } => panic!("unexpected fallback: {reason:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_no_candidates_degrades_without_calling_model() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::always(ScriptedReply::Content(
        selection_json(&["bench-press"]),
    )));
    let selector = selector(&provider, 2)?;
    let requirements = push_requirements().with_candidates(Vec::new());

    let outcome = selector.select_exercises(&requirements, true).await;

    assert_eq!(provider.calls(), 0);
    assert_eq!(outcome.degradation().map(|r| r.attempts), Some(0));
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_requirements_degrade_without_calling_model() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::always(ScriptedReply::Content(
        selection_json(&["bench-press"]),
    )));
    let selector = selector(&provider, 2)?;

    let too_many = push_requirements().with_exercise_count(13);
    let outcome = selector.select_exercises(&too_many, true).await;
    let reason = outcome.degradation().expect("thirteen exercises is out of range");
    assert_eq!(reason.attempts, 0);
    assert!(reason.last_error.contains("exercise_count"));
    assert!(!outcome.response().exercises.is_empty());

    let too_heavy = push_requirements().with_week(1.4, 1.0, false);
    let outcome = selector.select_exercises(&too_heavy, true).await;
    assert!(outcome
        .degradation()
        .is_some_and(|r| r.last_error.contains("intensity_percent")));

    assert_eq!(provider.calls(), 0);
    assert_eq!(selector.cache_stats().await.total_entries, 0);
    Ok(())
}

// =============================================================================
// Reply repair
// =============================================================================

#[tokio::test]
async fn test_unknown_ids_dropped_and_orders_renumbered() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::always(ScriptedReply::Content(
        selection_json(&["invented-press", "dumbbell-fly", "dumbbell-fly", "tricep-dip"]),
    )));
    let selector = selector(&provider, 0)?;

    let outcome = selector.select_exercises(&push_requirements(), true).await;
    let response = outcome.response();

    assert!(!outcome.is_degraded());
    assert_eq!(response.exercise_ids(), vec!["dumbbell-fly", "tricep-dip"]);
    let orders: Vec<u32> = response.exercises.iter().map(|e| e.order).collect();
    assert_eq!(orders, vec![1, 2]);
    assert_eq!(response.exercises[0].exercise_name, "Dumbbell Fly");
    Ok(())
}

#[tokio::test]
async fn test_only_unknown_ids_falls_back() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::always(ScriptedReply::Content(
        selection_json(&["invented-press"]),
    )));
    let selector = selector(&provider, 1)?;

    let outcome = selector.select_exercises(&push_requirements(), true).await;

    assert!(outcome.is_degraded());
    assert_eq!(provider.calls(), 2);
    Ok(())
}

// =============================================================================
// Request shape
// =============================================================================

#[tokio::test]
async fn test_request_uses_system_prompt_and_json_mode() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(ScriptedLlmProvider::always(ScriptedReply::Content(
        selection_json(&["bench-press"]),
    )));
    let selector = selector(&provider, 0)?;
    let requirements = push_requirements().with_limitations(vec!["sore\u{7}  wrist".to_owned()]);

    selector.select_exercises(&requirements, false).await;

    let request = provider.requests().remove(0);
    assert_eq!(request.model.as_deref(), Some("scripted-model"));
    assert!(request.response_format.is_some());
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, MessageRole::System);
    let user = &request.messages[1].content;
    assert!(user.contains("bench-press: Bench Press"));
    assert!(user.contains("- sore wrist"));
    Ok(())
}

#[tokio::test]
async fn test_plain_provider_gets_merged_prompt() -> Result<()> {
    init_test_logging();
    let provider = Arc::new(
        ScriptedLlmProvider::always(ScriptedReply::Content(selection_json(&["push-up"])))
            .with_capabilities(LlmCapabilities::empty()),
    );
    let selector = selector(&provider, 0)?;

    selector.select_exercises(&push_requirements(), false).await;

    let request = provider.requests().remove(0);
    assert!(request.response_format.is_none());
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, MessageRole::User);
    Ok(())
}
