// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Deprecation notices.
//!
//! The factory reports soft warnings, such as a non-error status code,
//! through a [`DeprecationSink`] instead of printing them, so hosts decide
//! where they go and tests can count them.

/// Receiver of deprecation notices.
pub trait DeprecationSink: Send + Sync + std::fmt::Debug {
    /// Report a deprecation notice.
    ///
    /// # Arguments
    ///
    /// * `message` - Description of the deprecated usage
    fn deprecate(&self, message: &str);
}

/// Sink that logs notices as warnings using the tracing framework.
#[derive(Default, Debug, Clone, Copy)]
pub struct TracingDeprecationSink;

impl DeprecationSink for TracingDeprecationSink {
    fn deprecate(&self, message: &str) {
        tracing::warn!(target: "hewa::deprecation", "{message}");
    }
}

/// Sink that drops every notice.
#[derive(Default, Debug, Clone, Copy)]
pub struct SilentDeprecationSink;

impl DeprecationSink for SilentDeprecationSink {
    fn deprecate(&self, _message: &str) {}
}
