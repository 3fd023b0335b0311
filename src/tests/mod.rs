// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Test modules for Hewa.
//!
//! This module contains the cross-module tests:
//! - Factory argument resolution, fast and slow paths
//! - Pool reuse and bounds
//! - Registry contents and class lookups
//! - Configuration loading and validation
//! - Property-based tests using proptest

pub mod factory_tests;

pub use test_utils::{
    error_status_strategy, non_error_status_strategy, test_factory, CountingSink,
};
