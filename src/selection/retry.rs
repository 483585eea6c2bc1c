// ABOUTME: Retry budget and exponential backoff with jitter for model calls
// ABOUTME: Classifies provider errors so rate limits back off from a longer base delay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use pierre_core::errors::{AppError, ErrorCode};
use rand::Rng;

use crate::config::RetryConfig;
use crate::errors::AppResult;

/// Why a model attempt failed
///
/// Every kind consumes the same retry budget; only the backoff base differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Provider returned 429
    RateLimited,
    /// Credentials rejected
    AuthFailed,
    /// Connect failure, timeout, or 5xx
    Unavailable,
    /// Reply could not be turned into a usable selection
    Malformed,
    /// Anything else
    Other,
}

impl FailureKind {
    /// Classify a provider or parsing error
    #[must_use]
    pub const fn classify(error: &AppError) -> Self {
        match error.code {
            ErrorCode::ExternalRateLimited => Self::RateLimited,
            ErrorCode::ExternalAuthFailed => Self::AuthFailed,
            ErrorCode::ExternalServiceUnavailable => Self::Unavailable,
            ErrorCode::SerializationError => Self::Malformed,
            _ => Self::Other,
        }
    }

    /// Snake-case label for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::AuthFailed => "auth_failed",
            Self::Unavailable => "unavailable",
            Self::Malformed => "malformed",
            Self::Other => "other",
        }
    }
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated retry policy
///
/// Delay before retry `k` (0-based) is `min(base * 2^k + jitter, max_backoff)`
/// with jitter uniform in `[0, max_jitter)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_backoff_ms: u64,
    rate_limit_backoff_ms: u64,
    max_backoff_ms: u64,
    max_jitter_ms: u64,
}

impl RetryPolicy {
    /// Build a policy from configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the configuration is inconsistent
    pub fn new(config: &RetryConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            max_retries: config.max_retries,
            base_backoff_ms: config.base_backoff_ms,
            rate_limit_backoff_ms: config.rate_limit_backoff_ms,
            max_backoff_ms: config.max_backoff_ms,
            max_jitter_ms: config.max_jitter_ms,
        })
    }

    /// Additional attempts after the first
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// First attempt plus retries
    #[must_use]
    pub const fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry `retry_index` with a caller-chosen jitter
    #[must_use]
    pub fn delay_with_jitter(&self, retry_index: u32, kind: FailureKind, jitter_ms: u64) -> Duration {
        let base = match kind {
            FailureKind::RateLimited => self.rate_limit_backoff_ms,
            _ => self.base_backoff_ms,
        };
        let factor = 1_u64.checked_shl(retry_index).unwrap_or(u64::MAX);
        let delay = base.saturating_mul(factor).saturating_add(jitter_ms);
        Duration::from_millis(delay.min(self.max_backoff_ms))
    }

    /// Delay before retry `retry_index` with random jitter
    #[must_use]
    pub fn backoff_delay(&self, retry_index: u32, kind: FailureKind) -> Duration {
        let jitter = if self.max_jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..self.max_jitter_ms)
        };
        self.delay_with_jitter(retry_index, kind, jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        let config = RetryConfig::default();
        Self {
            max_retries: config.max_retries,
            base_backoff_ms: config.base_backoff_ms,
            rate_limit_backoff_ms: config.rate_limit_backoff_ms,
            max_backoff_ms: config.max_backoff_ms,
            max_jitter_ms: config.max_jitter_ms,
        }
    }
}
