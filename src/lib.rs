// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hewa: typed, status-code-bearing HTTP error values.
//!
//! This library builds the error values an HTTP service returns for failed
//! requests. Each 4xx/5xx status has its own variant with a class name and
//! default message taken from the status table; every value carries
//! `status`, `statusCode`, `expose` and `message`, plus any extra properties
//! the caller attaches.
//!
//! # Architecture
//!
//! - [`registry`]: one [`ErrorVariant`] per known 4xx/5xx code, built once
//! - [`factory`]: resolves loose arguments into an [`HttpError`]
//! - [`pool`]: bounded reuse of bare errors for the most common statuses
//! - [`stack`]: stack traces captured only when read
//!
//! Producing an error is the whole job. Writing it to a response is left to
//! the caller, who should use [`HttpError::expose`] to decide whether the
//! message may be shown.

pub mod config;
pub mod deprecation;
pub mod error;
pub mod factory;
pub mod generic;
pub mod http_error;
pub mod pool;
pub mod registry;
pub mod stack;
pub mod status;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use error::{FactoryError, HewaError, HewaResult};
pub use factory::{
    create_error, default_factory, is_http_error, release_error, Arg, ErrorFactory,
};
pub use generic::GenericError;
pub use http_error::HttpError;
pub use registry::{ErrorClass, ErrorKind, ErrorVariant, TypeRegistry};

/// Version information for Hewa.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
