// ABOUTME: Configuration module for the program engine
// ABOUTME: Environment-driven LLM, retry, cache, and periodization settings with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Pierre program engine
//!
//! - **Engine**: LLM client, selector retry, and selection cache settings read
//!   from environment variables
//! - **Periodization**: intensity bands and deload cadence, re-exported from
//!   `pierre-intelligence`

/// Engine configuration loaded from the environment
pub mod engine;

pub use engine::{EngineConfig, LlmConfig, RetryConfig, SelectionCacheConfig};
pub use pierre_intelligence::config::{ConfigError, PeriodizationConfig};
