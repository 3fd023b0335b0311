// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! HTTP error instances.
//!
//! An [`HttpError`] is a [`GenericError`] tagged with a status code, an
//! `expose` flag and, when it was built by a variant constructor, the variant
//! it belongs to. There is a single `status` field, so `status` and
//! `statusCode` can never disagree.

use crate::generic::GenericError;
use crate::registry::ErrorVariant;
use crate::stack::StackCapture;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Keys that are never copied from a property bag onto an error.
pub const PROTECTED_KEYS: [&str; 2] = ["status", "statusCode"];

/// Whether messages of errors with `status` may be shown to clients.
pub fn default_expose(status: u16) -> bool {
    status < 500
}

/// An error value representing an HTTP failure.
#[derive(Debug)]
pub struct HttpError {
    base: GenericError,
    status: u16,
    expose: bool,
    variant: Option<Arc<ErrorVariant>>,
}

impl HttpError {
    pub(crate) fn from_variant(variant: Arc<ErrorVariant>, message: Option<&str>) -> Self {
        let message = message.unwrap_or(variant.default_message()).to_string();
        Self {
            base: GenericError::with_capture(variant.class_name(), message, variant.capture()),
            status: variant.code(),
            expose: variant.kind().default_expose(),
            variant: Some(variant),
        }
    }

    /// An error outside any variant, named `Error`.
    pub(crate) fn unmapped(status: u16, message: String, capture: StackCapture) -> Self {
        Self {
            base: GenericError::with_capture(crate::generic::GENERIC_NAME, message, capture),
            status,
            expose: default_expose(status),
            variant: None,
        }
    }

    /// Promotes a generic error, moving its HTTP fields into typed ones.
    pub(crate) fn adopt(mut base: GenericError, status: u16) -> Self {
        for key in PROTECTED_KEYS.iter().chain(&["expose"]) {
            base.fields.remove(*key);
        }
        Self {
            base,
            status,
            expose: default_expose(status),
            variant: None,
        }
    }

    /// The status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The status code; always equal to [`HttpError::status`].
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Whether the message is safe to show to an untrusted client.
    pub fn expose(&self) -> bool {
        self.expose
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.base.message
    }

    /// The variant class name, or `Error` for unmapped statuses.
    pub fn name(&self) -> &str {
        &self.base.name
    }

    /// The variant this error was constructed as, if any.
    pub fn variant(&self) -> Option<&Arc<ErrorVariant>> {
        self.variant.as_ref()
    }

    /// Whether this error was constructed by `variant`.
    pub fn is_instance_of(&self, variant: &ErrorVariant) -> bool {
        self.variant
            .as_ref()
            .is_some_and(|own| own.code() == variant.code())
    }

    /// 4xx status.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// 5xx status.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// An extra property by key.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.base.fields.get(key)
    }

    /// All extra properties.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.base.fields
    }

    /// Sets a property.
    ///
    /// `message`, `name`, `expose` and `stack` update the typed fields when
    /// the value has the matching JSON type and are ignored otherwise.
    /// `status` and `statusCode` are never settable this way.
    pub fn set_property<K: Into<String>>(&mut self, key: K, value: Value) {
        let key = key.into();
        match key.as_str() {
            "status" | "statusCode" => {
                tracing::debug!(%key, "ignoring protected property");
            }
            "message" | "name" | "expose" | "stack" => self.set_reserved(&key, value),
            _ => {
                self.base.fields.insert(key, value);
            }
        }
    }

    fn set_reserved(&mut self, key: &str, value: Value) {
        match (key, value) {
            ("message", Value::String(message)) => self.base.message = message,
            ("name", Value::String(name)) => self.base.name = name,
            ("expose", Value::Bool(expose)) => self.expose = expose,
            ("stack", Value::String(stack)) => self.base.stack.set(stack),
            (key, value) => {
                tracing::debug!(key, ?value, "ignoring reserved property with wrong type");
            }
        }
    }

    /// Builder form of [`HttpError::set_property`].
    pub fn with_property<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.set_property(key, value.into());
        self
    }

    /// The stack trace, captured on first read.
    pub fn stack(&self) -> &str {
        self.base.stack()
    }

    /// Overrides the stack trace; no capture happens afterwards.
    pub fn set_stack<S: Into<String>>(&mut self, stack: S) {
        self.base.set_stack(stack);
    }

    /// Whether the stack trace has been captured or set.
    pub fn is_stack_captured(&self) -> bool {
        self.base.stack.is_captured()
    }

    pub(crate) fn clear_stack(&mut self) {
        self.base.stack.clear();
    }

    /// Forces `status`, `statusCode` and the derived `expose`.
    pub(crate) fn stamp(&mut self, status: u16) {
        self.status = status;
        self.expose = default_expose(status);
    }

    /// Strips everything a caller may have added, returning the error to
    /// the shape a fresh construction for its status would have.
    pub(crate) fn reset(&mut self, variant: Option<Arc<ErrorVariant>>, message: &str) {
        self.base.fields.clear();
        self.base.source = None;
        self.base.stack.clear();
        self.base.message.clear();
        self.base.message.push_str(message);
        self.base.name.clear();
        match &variant {
            Some(variant) => self.base.name.push_str(variant.class_name()),
            None => self.base.name.push_str(crate::generic::GENERIC_NAME),
        }
        self.expose = default_expose(self.status);
        self.variant = variant;
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for HttpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.base.source()
    }
}

impl Serialize for HttpError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5 + self.base.fields.len()))?;
        map.serialize_entry("name", self.name())?;
        map.serialize_entry("message", self.message())?;
        map.serialize_entry("status", &self.status)?;
        map.serialize_entry("statusCode", &self.status)?;
        map.serialize_entry("expose", &self.expose)?;
        for (key, value) in &self.base.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
