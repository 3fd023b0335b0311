// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error module for Hewa.
//!
//! Two very different things are called "errors" in this crate. The
//! [`HttpError`](crate::HttpError) values the factory produces are the
//! product, not failures. The types in this module are the failures: usage
//! errors raised by the factory itself and configuration errors raised while
//! loading settings.

use thiserror::Error;

pub mod config;
pub mod factory;

pub use factory::{FactoryError, FactoryResult};

/// Result type alias used throughout Hewa.
pub type HewaResult<T> = Result<T, HewaError>;

/// Crate-level error enum.
#[derive(Error, Debug)]
pub enum HewaError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Usage errors raised by the error factory.
    #[error("Factory error: {0}")]
    Factory(#[from] FactoryError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}
