// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Per-status error variants.
//!
//! For every 4xx and 5xx code the status table knows, the registry holds one
//! [`ErrorVariant`]: the code, the class name derived from the reason phrase,
//! the default message and whether it is a client or server error. Variants
//! are indexed by code and by identifier name. The set is built once and is
//! read-only afterwards.
//!
//! # Example
//!
//! ```
//! use hewa::registry::{global_registry, ErrorKind};
//!
//! let not_found = global_registry().get(404).unwrap();
//! assert_eq!(not_found.class_name(), "NotFoundError");
//! assert_eq!(not_found.kind(), ErrorKind::Client);
//!
//! let err = not_found.construct(None);
//! assert_eq!(err.message(), "Not Found");
//! assert!(err.expose());
//! ```

use crate::config::global_config;
use crate::error::{FactoryError, FactoryResult};
use crate::http_error::HttpError;
use crate::stack::StackCapture;
use crate::status::{CanonicalStatuses, IdentifierCase, PascalIdentifier, StatusRegistry};
use fnv::FnvHashMap;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;

/// Name of the abstract base every variant derives from.
pub const BASE_NAME: &str = "HttpError";

const ERROR_SUFFIX: &str = "Error";

/// Client or server error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// 4xx: caused by the caller, message safe to expose
    Client,
    /// 5xx: caused by the system, message not safe to expose
    Server,
}

impl ErrorKind {
    /// The kind for `code`, or `None` outside 4xx/5xx.
    pub fn from_code(code: u16) -> Option<Self> {
        match code / 100 {
            4 => Some(Self::Client),
            5 => Some(Self::Server),
            _ => None,
        }
    }

    /// Default `expose` value for errors of this kind.
    pub fn default_expose(self) -> bool {
        matches!(self, Self::Client)
    }

    /// The class code (400 or 500) of this kind.
    pub fn class_code(self) -> u16 {
        match self {
            Self::Client => 400,
            Self::Server => 500,
        }
    }
}

/// Descriptor and constructor of one status-specific error type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorVariant {
    code: u16,
    identifier: String,
    class_name: String,
    default_message: String,
    kind: ErrorKind,
    #[serde(skip)]
    capture: StackCapture,
}

impl ErrorVariant {
    /// The status code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Identifier form of the reason phrase, e.g. `NotFound`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Reported type name, e.g. `NotFoundError`.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Reason phrase used when no message is given.
    pub fn default_message(&self) -> &str {
        &self.default_message
    }

    /// Client or server.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn capture(&self) -> StackCapture {
        self.capture
    }

    /// Builds a new error of this variant, bypassing the factory's argument
    /// resolution and pool.
    pub fn construct(self: &Arc<Self>, message: Option<&str>) -> HttpError {
        HttpError::from_variant(Arc::clone(self), message)
    }
}

/// A constructible error type: the abstract base or one concrete variant.
#[derive(Debug, Clone)]
pub enum ErrorClass {
    /// The abstract `HttpError` base; cannot be constructed.
    Base,
    /// A concrete variant.
    Variant(Arc<ErrorVariant>),
}

impl ErrorClass {
    /// Reported type name.
    pub fn name(&self) -> &str {
        match self {
            Self::Base => BASE_NAME,
            Self::Variant(variant) => variant.class_name(),
        }
    }

    /// Constructs an instance.
    ///
    /// # Errors
    ///
    /// [`FactoryError::AbstractConstruction`] for the base class.
    pub fn construct(&self, message: Option<&str>) -> FactoryResult<HttpError> {
        match self {
            Self::Base => Err(FactoryError::AbstractConstruction),
            Self::Variant(variant) => Ok(variant.construct(message)),
        }
    }

    /// Whether `err` is an instance of this class. Every `HttpError` is an
    /// instance of the base.
    pub fn is_instance(&self, err: &HttpError) -> bool {
        match self {
            Self::Base => true,
            Self::Variant(variant) => err.is_instance_of(variant),
        }
    }
}

/// All error variants, indexed by code and by name.
#[derive(Debug)]
pub struct TypeRegistry {
    by_code: FnvHashMap<u16, Arc<ErrorVariant>>,
    by_name: FnvHashMap<String, Arc<ErrorVariant>>,
    statuses: Arc<dyn StatusRegistry>,
    capture: StackCapture,
}

impl TypeRegistry {
    /// Builds the registry from a status table.
    ///
    /// Only 4xx and 5xx codes get a variant. Codes of other classes stay
    /// usable as plain statuses through [`TypeRegistry::phrase`].
    pub fn build(
        statuses: Arc<dyn StatusRegistry>,
        casing: &dyn IdentifierCase,
        capture: StackCapture,
    ) -> Self {
        let mut by_code = FnvHashMap::default();
        let mut by_name = FnvHashMap::default();

        for code in statuses.codes() {
            let Some(kind) = ErrorKind::from_code(code) else {
                continue;
            };
            let Some(phrase) = statuses.phrase(code) else {
                continue;
            };

            let identifier = casing.identifier(phrase);
            let class_name = if identifier.ends_with(ERROR_SUFFIX) {
                identifier.clone()
            } else {
                format!("{identifier}{ERROR_SUFFIX}")
            };

            let variant = Arc::new(ErrorVariant {
                code,
                identifier,
                class_name,
                default_message: phrase.to_string(),
                kind,
                capture,
            });

            by_name.insert(variant.class_name.clone(), Arc::clone(&variant));
            by_name.insert(variant.identifier.clone(), Arc::clone(&variant));
            by_code.insert(code, variant);
        }

        tracing::debug!(variants = by_code.len(), ?capture, "built error type registry");

        Self {
            by_code,
            by_name,
            statuses,
            capture,
        }
    }

    /// Builds the registry from the canonical status table.
    pub fn canonical(capture: StackCapture) -> Self {
        Self::build(Arc::new(CanonicalStatuses), &PascalIdentifier, capture)
    }

    /// The variant for exactly `code`.
    pub fn get(&self, code: u16) -> Option<&Arc<ErrorVariant>> {
        self.by_code.get(&code)
    }

    /// The variant registered under an identifier (`NotFound`) or class
    /// name (`NotFoundError`).
    pub fn by_name(&self, name: &str) -> Option<&Arc<ErrorVariant>> {
        self.by_name.get(name)
    }

    /// The variant for `code`, falling back to the variant of its class
    /// (400 or 500) when there is no exact match.
    pub fn class_for(&self, code: u16) -> Option<&Arc<ErrorVariant>> {
        self.get(code).or_else(|| {
            ErrorKind::from_code(code).and_then(|kind| self.get(kind.class_code()))
        })
    }

    /// The reason phrase of any known code, 4xx/5xx or not.
    pub fn phrase(&self, code: u16) -> Option<&str> {
        self.statuses.phrase(code)
    }

    /// Capture mode of instances built from this registry.
    pub fn capture(&self) -> StackCapture {
        self.capture
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether there are no variants.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// All variants in ascending code order.
    pub fn variants(&self) -> Vec<&Arc<ErrorVariant>> {
        let mut variants: Vec<_> = self.by_code.values().collect();
        variants.sort_by_key(|variant| variant.code);
        variants
    }
}

static GLOBAL_REGISTRY: Lazy<Arc<TypeRegistry>> =
    Lazy::new(|| Arc::new(TypeRegistry::canonical(global_config().get().stack.capture)));

/// The process-wide registry built from the canonical status table.
pub fn global_registry() -> &'static Arc<TypeRegistry> {
    &GLOBAL_REGISTRY
}
