// ABOUTME: Core types and constants for the Pierre training program engine
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the Pierre
//! program engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Engine constants organized by domain
//! - **models**: Training goals, exercises, week parameters, selections, programs

/// Unified error handling system with standard error codes
pub mod errors;

/// Engine constants and default configuration values organized by domain
pub mod constants;

/// Core data models (goals, exercises, periodization, programs, validation)
pub mod models;
