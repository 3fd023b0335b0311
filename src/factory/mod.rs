// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The error factory.
//!
//! [`ErrorFactory::create`] turns a loose argument list into an
//! [`HttpError`]:
//!
//! - an existing error is adopted as the result, and its status (if any)
//!   becomes the tentative status;
//! - a number in first position is the tentative status;
//! - a string is the message;
//! - JSON objects are merged into a bag of extra properties;
//! - anything else is a usage error.
//!
//! Statuses outside 4xx/5xx produce a deprecation notice. Statuses that are
//! neither 4xx/5xx nor known to the status table fall back to 500.
//!
//! A bare status (no error, message or properties) is served from the pool
//! when possible. Everything else is built through the registry.
//!
//! # Example
//!
//! ```
//! use hewa::{create_error, release_error};
//! use serde_json::json;
//!
//! let err = create_error!(404, "no such user", json!({"id": 7})).unwrap();
//! assert_eq!(err.status(), 404);
//! assert_eq!(err.message(), "no such user");
//! assert_eq!(err.property("id"), Some(&json!(7)));
//! assert!(err.expose());
//!
//! release_error(err);
//! ```

mod args;

pub use args::{Arg, BaseError};

use crate::config::{global_config, HewaConfig, PoolConfig};
use crate::deprecation::{DeprecationSink, TracingDeprecationSink};
use crate::error::{FactoryError, FactoryResult};
use crate::generic::{GenericError, StatusHint};
use crate::http_error::{HttpError, PROTECTED_KEYS};
use crate::pool::ErrorPool;
use crate::registry::{global_registry, ErrorClass, ErrorVariant, TypeRegistry};
use crate::stack::StackCapture;
use crate::status::{CanonicalStatuses, IdentifierCase, PascalIdentifier, StatusRegistry};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::any::Any;
use std::error::Error;
use std::sync::Arc;

/// Status used when the requested one cannot be honored.
pub const FALLBACK_STATUS: u16 = 500;

/// Notice emitted for statuses outside 4xx/5xx.
pub const NON_ERROR_STATUS_NOTICE: &str =
    "non-error status code; use only 4xx or 5xx status codes";

/// Builds HTTP errors from loose arguments.
#[derive(Debug)]
pub struct ErrorFactory {
    registry: Arc<TypeRegistry>,
    pool: ErrorPool,
    sink: Arc<dyn DeprecationSink>,
}

/// Builder for [`ErrorFactory`].
#[derive(Debug, Default)]
pub struct ErrorFactoryBuilder {
    registry: Option<Arc<TypeRegistry>>,
    statuses: Option<Arc<dyn StatusRegistry>>,
    casing: Option<Arc<dyn IdentifierCase>>,
    capture: StackCapture,
    pool: PoolConfig,
    sink: Option<Arc<dyn DeprecationSink>>,
}

impl ErrorFactoryBuilder {
    /// Uses an already built registry. Takes precedence over
    /// [`statuses`](Self::statuses), [`casing`](Self::casing) and
    /// [`stack_capture`](Self::stack_capture).
    pub fn registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Status table to build the registry from.
    pub fn statuses(mut self, statuses: Arc<dyn StatusRegistry>) -> Self {
        self.statuses = Some(statuses);
        self
    }

    /// Identifier casing used for variant names.
    pub fn casing(mut self, casing: Arc<dyn IdentifierCase>) -> Self {
        self.casing = Some(casing);
        self
    }

    /// When stack traces of new errors are captured.
    pub fn stack_capture(mut self, capture: StackCapture) -> Self {
        self.capture = capture;
        self
    }

    /// Pool settings.
    pub fn pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    /// Receiver of deprecation notices.
    pub fn sink(mut self, sink: Arc<dyn DeprecationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the factory.
    pub fn build(self) -> ErrorFactory {
        let registry = self.registry.unwrap_or_else(|| {
            let statuses = self.statuses.unwrap_or_else(|| Arc::new(CanonicalStatuses));
            let casing = self.casing.unwrap_or_else(|| Arc::new(PascalIdentifier));
            Arc::new(TypeRegistry::build(statuses, casing.as_ref(), self.capture))
        });
        let pool = ErrorPool::new(&self.pool, Arc::clone(&registry));
        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingDeprecationSink));

        ErrorFactory {
            registry,
            pool,
            sink,
        }
    }
}

impl ErrorFactory {
    /// Starts building a factory.
    pub fn builder() -> ErrorFactoryBuilder {
        ErrorFactoryBuilder::default()
    }

    /// A factory over the canonical status table configured by `config`.
    pub fn from_config(config: &HewaConfig) -> Self {
        Self::builder()
            .stack_capture(config.stack.capture)
            .pool(config.pool.clone())
            .build()
    }

    /// The registry this factory resolves variants from.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// The pool this factory serves bare errors from.
    pub fn pool(&self) -> &ErrorPool {
        &self.pool
    }

    /// The abstract base class.
    pub fn base(&self) -> ErrorClass {
        ErrorClass::Base
    }

    /// The variant for exactly `code`.
    pub fn variant(&self, code: u16) -> Option<ErrorClass> {
        self.registry.get(code).cloned().map(ErrorClass::Variant)
    }

    /// The variant registered under `name` (identifier or class name).
    ///
    /// `HttpError` resolves to the abstract base.
    pub fn variant_by_name(&self, name: &str) -> FactoryResult<ErrorClass> {
        if name == crate::registry::BASE_NAME {
            return Ok(ErrorClass::Base);
        }
        self.registry
            .by_name(name)
            .cloned()
            .map(ErrorClass::Variant)
            .ok_or_else(|| FactoryError::UnknownVariant(name.to_string()))
    }

    /// Builds an error from `args`.
    ///
    /// # Errors
    ///
    /// [`FactoryError::UnsupportedArgument`] for an argument that is not an
    /// error, a leading number, a string or a JSON object.
    pub fn create<I>(&self, args: I) -> FactoryResult<HttpError>
    where
        I: IntoIterator<Item = Arg>,
    {
        let mut base: Option<BaseError> = None;
        let mut requested: Option<StatusHint> = None;
        let mut message: Option<String> = None;
        let mut properties: Option<Map<String, Value>> = None;

        for (index, arg) in args.into_iter().enumerate() {
            match arg {
                Arg::Error(err) => {
                    if let Some(status) = err.status_hint() {
                        requested = Some(status);
                    }
                    base = Some(err);
                }
                Arg::Number(status) if index == 0 => requested = Some(StatusHint::Code(status)),
                Arg::Message(text) => message = Some(text),
                Arg::Properties(bag) => properties.get_or_insert_with(Map::new).extend(bag),
                other => {
                    return Err(FactoryError::UnsupportedArgument {
                        index,
                        type_name: other.type_name(),
                    })
                }
            }
        }

        let status = self.resolve_status(requested);

        let has_properties = properties.as_ref().is_some_and(|bag| !bag.is_empty());
        if base.is_none() && message.is_none() && !has_properties {
            if let Some(err) = self.pool.acquire(status) {
                return Ok(err);
            }
        }

        let variant = self.registry.class_for(status);
        let mut err = match base {
            None => self.construct(variant, status, message.as_deref()),
            Some(BaseError::Http(err)) => err,
            Some(BaseError::Generic(err)) => HttpError::adopt(err, status),
        };

        let is_variant_instance = variant.is_some_and(|variant| err.is_instance_of(variant));
        if err.status() != status || !is_variant_instance {
            err.stamp(status);
        }

        for (key, value) in properties.into_iter().flatten() {
            if !PROTECTED_KEYS.contains(&key.as_str()) {
                err.set_property(key, value);
            }
        }

        Ok(err)
    }

    /// Hands an error back to the pool. Returns `true` if it was kept.
    pub fn release(&self, err: HttpError) -> bool {
        self.pool.release(err)
    }

    fn resolve_status(&self, requested: Option<StatusHint>) -> u16 {
        let Some(StatusHint::Code(requested)) = requested else {
            return FALLBACK_STATUS;
        };

        if !(400.0..600.0).contains(&requested) {
            self.sink.deprecate(NON_ERROR_STATUS_NOTICE);
        }

        let is_code = requested.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(&requested);
        if !is_code {
            return FALLBACK_STATUS;
        }

        let code = requested as u16;
        if (400..600).contains(&code) || self.registry.phrase(code).is_some() {
            code
        } else {
            FALLBACK_STATUS
        }
    }

    fn construct(
        &self,
        variant: Option<&Arc<ErrorVariant>>,
        status: u16,
        message: Option<&str>,
    ) -> HttpError {
        match variant {
            Some(variant) => variant.construct(message),
            None => {
                let message = message
                    .or_else(|| self.registry.phrase(status))
                    .unwrap_or_default()
                    .to_string();
                HttpError::unmapped(status, message, self.registry.capture())
            }
        }
    }
}

/// Whether `value` is an HTTP error.
///
/// Every [`HttpError`] is one. A [`GenericError`], also behind a boxed
/// `dyn Error`, is one when it carries a boolean `expose`, a numeric
/// `statusCode` and an equal `status`. Any other value is not.
pub fn is_http_error(value: &dyn Any) -> bool {
    if value.is::<HttpError>() {
        return true;
    }
    if let Some(err) = value.downcast_ref::<GenericError>() {
        return err.looks_like_http_error();
    }
    if let Some(err) = value.downcast_ref::<Box<dyn Error + Send + Sync>>() {
        return err.is::<HttpError>()
            || err
                .downcast_ref::<GenericError>()
                .is_some_and(GenericError::looks_like_http_error);
    }
    false
}

static DEFAULT_FACTORY: Lazy<ErrorFactory> = Lazy::new(|| {
    let config = global_config();
    ErrorFactory::builder()
        .registry(Arc::clone(global_registry()))
        .pool(config.get().pool.clone())
        .build()
});

/// The process-wide factory, configured from the global configuration.
pub fn default_factory() -> &'static ErrorFactory {
    &DEFAULT_FACTORY
}

/// Builds an error with the process-wide factory. See [`ErrorFactory::create`].
pub fn create_error<I>(args: I) -> FactoryResult<HttpError>
where
    I: IntoIterator<Item = Arg>,
{
    default_factory().create(args)
}

/// Hands an error back to the process-wide pool.
pub fn release_error(err: HttpError) {
    default_factory().release(err);
}

/// Builds an error with the process-wide factory from heterogeneous arguments.
///
/// Each argument is converted with `Arg::from`.
#[macro_export]
macro_rules! create_error {
    ($($arg:expr),* $(,)?) => {
        $crate::factory::create_error(::std::vec![$($crate::factory::Arg::from($arg)),*])
    };
}
