// ABOUTME: Engine configuration types loaded from environment variables
// ABOUTME: LLM client, selector retry/backoff, and selection cache settings with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;
use std::str::FromStr;

use pierre_core::constants::cache::{
    DEFAULT_SELECTION_CACHE_MAX_ENTRIES, DEFAULT_SELECTION_CACHE_TTL_SECS,
};
use pierre_core::constants::{env_config, llm, retry};
use pierre_core::errors::{AppError, AppResult};
use pierre_intelligence::config::PeriodizationConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Parse an environment variable, falling back to `default` when unset or unparsable
fn env_parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

// ============================================================================
// LLM Client
// ============================================================================

/// Chat-completions client settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; LLM selection is disabled without one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Chat-completions base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: llm::DEFAULT_BASE_URL.to_owned(),
            model: llm::DEFAULT_MODEL.to_owned(),
            timeout_secs: llm::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    /// Load LLM client configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(env_config::OPENAI_API_KEY)
                .ok()
                .map(|k| k.trim().to_owned())
                .filter(|k| !k.is_empty()),
            base_url: env_var_or(env_config::LLM_BASE_URL, llm::DEFAULT_BASE_URL),
            model: env_var_or(env_config::LLM_MODEL, llm::DEFAULT_MODEL),
            timeout_secs: env_parse_or(
                env_config::LLM_TIMEOUT_SECS,
                llm::DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
        }
    }

    /// Whether an API key is configured
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for a zero timeout or a base URL that is not http(s)
    pub fn validate(&self) -> AppResult<()> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_invalid(
                "LLM request timeout must be at least 1 second",
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::config_invalid(format!(
                "LLM base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Selector Retry
// ============================================================================

/// Retry budget and backoff settings for model calls (milliseconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts after the first call
    pub max_retries: u32,
    /// Base delay for generic failures
    pub base_backoff_ms: u64,
    /// Base delay after a rate-limit response
    pub rate_limit_backoff_ms: u64,
    /// Ceiling for any single delay, jitter included
    pub max_backoff_ms: u64,
    /// Exclusive upper bound of the random jitter
    pub max_jitter_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: retry::DEFAULT_MAX_RETRIES,
            base_backoff_ms: retry::DEFAULT_BASE_BACKOFF_MS,
            rate_limit_backoff_ms: retry::DEFAULT_RATE_LIMIT_BACKOFF_MS,
            max_backoff_ms: retry::DEFAULT_MAX_BACKOFF_MS,
            max_jitter_ms: retry::DEFAULT_MAX_JITTER_MS,
        }
    }
}

impl RetryConfig {
    /// Load retry configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_parse_or(env_config::SELECTOR_MAX_RETRIES, defaults.max_retries),
            base_backoff_ms: env_parse_or(
                env_config::SELECTOR_BASE_BACKOFF_MS,
                defaults.base_backoff_ms,
            ),
            rate_limit_backoff_ms: env_parse_or(
                env_config::SELECTOR_RATE_LIMIT_BACKOFF_MS,
                defaults.rate_limit_backoff_ms,
            ),
            max_backoff_ms: env_parse_or(
                env_config::SELECTOR_MAX_BACKOFF_MS,
                defaults.max_backoff_ms,
            ),
            max_jitter_ms: env_parse_or(env_config::SELECTOR_MAX_JITTER_MS, defaults.max_jitter_ms),
        }
    }

    /// No delays at all; retries happen back to back
    #[must_use]
    pub const fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_backoff_ms: 0,
            rate_limit_backoff_ms: 0,
            max_backoff_ms: 0,
            max_jitter_ms: 0,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when `max_retries` exceeds its limit or a base
    /// delay or the jitter bound exceeds `max_backoff_ms`
    pub fn validate(&self) -> AppResult<()> {
        if self.max_retries > retry::MAX_ALLOWED_RETRIES {
            return Err(AppError::config_invalid(format!(
                "max_retries must be at most {}, got {}",
                retry::MAX_ALLOWED_RETRIES,
                self.max_retries
            )));
        }
        for (name, value) in [
            ("base_backoff_ms", self.base_backoff_ms),
            ("rate_limit_backoff_ms", self.rate_limit_backoff_ms),
            ("max_jitter_ms", self.max_jitter_ms),
        ] {
            if value > self.max_backoff_ms {
                return Err(AppError::config_invalid(format!(
                    "{name} ({value}) cannot exceed max_backoff_ms ({})",
                    self.max_backoff_ms
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Selection Cache
// ============================================================================

/// Bounds for the selection response cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCacheConfig {
    /// Maximum cached responses
    pub max_entries: usize,
    /// Entry lifetime in seconds
    pub ttl_secs: u64,
}

impl Default for SelectionCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_SELECTION_CACHE_MAX_ENTRIES,
            ttl_secs: DEFAULT_SELECTION_CACHE_TTL_SECS,
        }
    }
}

impl SelectionCacheConfig {
    /// Load cache configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_entries: env_parse_or(
                env_config::SELECTION_CACHE_MAX_ENTRIES,
                DEFAULT_SELECTION_CACHE_MAX_ENTRIES,
            ),
            ttl_secs: env_parse_or(
                env_config::SELECTION_CACHE_TTL_SECS,
                DEFAULT_SELECTION_CACHE_TTL_SECS,
            ),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for a zero capacity or zero TTL
    pub fn validate(&self) -> AppResult<()> {
        if self.max_entries == 0 {
            return Err(AppError::config_invalid(
                "selection cache max_entries must be at least 1",
            ));
        }
        if self.ttl_secs == 0 {
            return Err(AppError::config_invalid(
                "selection cache ttl_secs must be at least 1",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Complete engine configuration
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// LLM client
    pub llm: LlmConfig,
    /// Selector retry policy
    pub retry: RetryConfig,
    /// Selection response cache
    pub cache: SelectionCacheConfig,
    /// Periodization tables
    pub periodization: PeriodizationConfig,
}

impl EngineConfig {
    /// Load the engine configuration from environment variables
    ///
    /// Unparsable values fall back to their defaults; call [`Self::validate`]
    /// before building services from the result.
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self {
            llm: LlmConfig::from_env(),
            retry: RetryConfig::from_env(),
            cache: SelectionCacheConfig::from_env(),
            periodization: PeriodizationConfig::default(),
        };
        info!(
            llm_enabled = config.llm.is_enabled(),
            llm_model = %config.llm.model,
            max_retries = config.retry.max_retries,
            cache_max_entries = config.cache.max_entries,
            cache_ttl_secs = config.cache.ttl_secs,
            "Engine configuration loaded"
        );
        config
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigInvalid` error found
    pub fn validate(&self) -> AppResult<()> {
        self.llm.validate()?;
        self.retry.validate()?;
        self.cache.validate()?;
        self.periodization.validate().map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_core::errors::ErrorCode;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(!LlmConfig::default().is_enabled());
    }

    #[test]
    fn test_immediate_retry_is_valid() {
        assert!(RetryConfig::immediate(2).validate().is_ok());
    }

    #[test]
    fn test_base_above_ceiling_rejected() {
        let config = RetryConfig {
            base_backoff_ms: 30_000,
            ..RetryConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid);
        assert!(err.message.contains("base_backoff_ms"));
    }

    #[test]
    fn test_too_many_retries_rejected() {
        let config = RetryConfig {
            max_retries: 11,
            ..RetryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_cache_capacity_rejected() {
        let config = SelectionCacheConfig {
            max_entries: 0,
            ttl_secs: 60,
        };
        assert_eq!(
            config.validate().unwrap_err().code,
            ErrorCode::ConfigInvalid
        );
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let config = LlmConfig {
            api_key: Some("sk-secret".to_owned()),
            ..LlmConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
