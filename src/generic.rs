// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The plain error value every HTTP error is built on.
//!
//! A [`GenericError`] is what the factory treats as "some error": a name, a
//! message, a bag of dynamic fields, a lazily captured stack and optionally
//! the foreign error it was adopted from. Errors coming from other code that
//! already carry `status`/`statusCode`/`expose` fields are recognized
//! structurally through [`GenericError::looks_like_http_error`].

use crate::stack::{LazyStack, StackCapture};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Name reported by errors that do not belong to any variant.
pub const GENERIC_NAME: &str = "Error";

/// A generic error value with dynamic fields.
#[derive(Debug)]
pub struct GenericError {
    pub(crate) name: String,
    pub(crate) message: String,
    pub(crate) fields: Map<String, Value>,
    pub(crate) stack: LazyStack,
    pub(crate) source: Option<Box<dyn Error + Send + Sync>>,
}

impl GenericError {
    /// Creates an error named `Error` with the given message.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self::with_capture(GENERIC_NAME, message.into(), StackCapture::Lazy)
    }

    pub(crate) fn with_capture(name: &str, message: String, capture: StackCapture) -> Self {
        let stack = LazyStack::for_mode(capture, || format!("{name}: {message}"));
        Self {
            name: name.to_string(),
            message,
            fields: Map::new(),
            stack,
            source: None,
        }
    }

    /// Wraps a foreign error, keeping it as the source.
    pub fn from_error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(error))
    }

    pub(crate) fn from_boxed(error: Box<dyn Error + Send + Sync>) -> Self {
        let mut generic = Self::new(error.to_string());
        generic.source = Some(error);
        generic
    }

    /// Sets the reported name.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Sets a dynamic field.
    pub fn with_field<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The reported name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// A dynamic field by key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All dynamic fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The stack trace, captured on first read.
    pub fn stack(&self) -> &str {
        self.stack
            .get_or_capture(|| format!("{}: {}", self.name, self.message))
    }

    /// Overrides the stack trace.
    pub fn set_stack<S: Into<String>>(&mut self, stack: S) {
        self.stack.set(stack.into());
    }

    /// Whether this error carries a consistent set of HTTP error fields:
    /// a boolean `expose`, a numeric `statusCode` and an equal `status`.
    pub fn looks_like_http_error(&self) -> bool {
        let expose_is_bool = self.fields.get("expose").is_some_and(Value::is_boolean);
        let status_code = self.fields.get("statusCode").filter(|v| v.is_number());
        match status_code {
            Some(code) if expose_is_bool => self
                .fields
                .get("status")
                .and_then(Value::as_f64)
                .zip(code.as_f64())
                .is_some_and(|(status, code)| status == code),
            _ => false,
        }
    }

    /// The status this error carries: the first of `status`, `statusCode`
    /// holding a truthy value. Zero, `false`, `null` and `""` count as absent.
    pub(crate) fn status_hint(&self) -> Option<StatusHint> {
        ["status", "statusCode"].iter().find_map(|key| match self.fields.get(*key)? {
            Value::Number(number) => number
                .as_f64()
                .filter(|status| *status != 0.0)
                .map(StatusHint::Code),
            Value::Null | Value::Bool(false) => None,
            Value::String(text) if text.is_empty() => None,
            _ => Some(StatusHint::NotANumber),
        })
    }
}

/// A status carried by an adopted error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum StatusHint {
    /// A numeric status
    Code(f64),
    /// A status of some other type; resolves to the fallback status
    NotANumber,
}

impl Display for GenericError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for GenericError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}
