// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Usage errors raised by the error factory.
//!
//! These fail the calling code immediately. They are never pooled and never
//! carry an HTTP status.

use thiserror::Error;

/// Result type for factory operations.
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Errors raised when the factory is used incorrectly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// An argument of a type the factory cannot classify.
    ///
    /// `index` is zero-based; the message reports the one-based position.
    #[error("argument #{} unsupported type {type_name}", .index + 1)]
    UnsupportedArgument {
        /// Zero-based position of the offending argument
        index: usize,
        /// Runtime type of the offending argument
        type_name: &'static str,
    },

    /// Direct construction of the abstract `HttpError` base.
    #[error("cannot construct abstract class")]
    AbstractConstruction,

    /// No variant is registered under the requested code or name.
    #[error("no error variant registered for {0}")]
    UnknownVariant(String),
}
