// ABOUTME: Error types for the program engine, re-exported from pierre-core
// ABOUTME: Keeps `crate::errors::AppError` paths stable for engine modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! `AppError`, `ErrorCode`, and `AppResult` live in `pierre-core` so the
//! intelligence crate and the engine share one error vocabulary.

pub use pierre_core::errors::{AppError, AppResult, ErrorCode};
