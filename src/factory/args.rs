// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Factory arguments.
//!
//! The factory accepts a loose list of arguments whose meaning depends on
//! their type. [`Arg`] is that list's element type; `From` conversions let
//! callers pass numbers, strings, JSON values and errors directly.

use crate::generic::{GenericError, StatusHint};
use crate::http_error::HttpError;
use serde_json::{Map, Value};
use std::error::Error;

/// An error adopted as the base of the result.
#[derive(Debug)]
pub enum BaseError {
    /// An error this crate produced
    Http(HttpError),
    /// Any other error
    Generic(GenericError),
}

impl BaseError {
    /// The status the adopted error carries, if any.
    pub(crate) fn status_hint(&self) -> Option<StatusHint> {
        match self {
            Self::Http(err) => Some(StatusHint::Code(f64::from(err.status()))),
            Self::Generic(err) => err.status_hint(),
        }
    }
}

/// One factory argument.
#[derive(Debug)]
pub enum Arg {
    /// A number; only meaningful as the first argument.
    Number(f64),
    /// The message.
    Message(String),
    /// An existing error to adopt.
    Error(BaseError),
    /// Extra properties, merged into earlier bags.
    Properties(Map<String, Value>),
    /// A value of a type the factory does not accept.
    Unsupported(&'static str),
}

impl Arg {
    /// Wraps any error. `HttpError` and `GenericError` values are recognized
    /// as such; anything else becomes the source of a new `GenericError`.
    pub fn error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::from_boxed_error(Box::new(error))
    }

    /// Like [`Arg::error`], for an already boxed error.
    pub fn from_boxed_error(error: Box<dyn Error + Send + Sync>) -> Self {
        let error = match error.downcast::<HttpError>() {
            Ok(http) => return Self::Error(BaseError::Http(*http)),
            Err(error) => error,
        };
        match error.downcast::<GenericError>() {
            Ok(generic) => Self::Error(BaseError::Generic(*generic)),
            Err(error) => Self::Error(BaseError::Generic(GenericError::from_boxed(error))),
        }
    }

    /// Runtime type name used in usage errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Message(_) => "string",
            Self::Error(_) => "error",
            Self::Properties(_) => "object",
            Self::Unsupported(type_name) => type_name,
        }
    }
}

macro_rules! number_arg {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )*
    };
}

number_arg!(u8, u16, u32, i8, i16, i32, f32, f64);

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for Arg {
    fn from(_: bool) -> Self {
        Self::Unsupported("boolean")
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<Map<String, Value>> for Arg {
    fn from(value: Map<String, Value>) -> Self {
        Self::Properties(value)
    }
}

impl From<HttpError> for Arg {
    fn from(value: HttpError) -> Self {
        Self::Error(BaseError::Http(value))
    }
}

impl From<GenericError> for Arg {
    fn from(value: GenericError) -> Self {
        Self::Error(BaseError::Generic(value))
    }
}

/// Numbers, strings and objects map to their argument kinds. Arrays,
/// booleans and `null` become [`Arg::Unsupported`], so the factory rejects
/// them with a usage error instead of ignoring them.
impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(number) => number
                .as_f64()
                .map_or(Self::Unsupported("number"), Self::Number),
            Value::String(message) => Self::Message(message),
            Value::Object(properties) => Self::Properties(properties),
            Value::Array(_) => Self::Unsupported("array"),
            Value::Bool(_) => Self::Unsupported("boolean"),
            Value::Null => Self::Unsupported("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_classification() {
        assert!(matches!(Arg::from(json!(404)), Arg::Number(n) if n == 404.0));
        assert!(matches!(Arg::from(json!("x")), Arg::Message(ref m) if m == "x"));
        assert!(matches!(Arg::from(json!({"id": 7})), Arg::Properties(_)));
        assert_eq!(Arg::from(json!(true)).type_name(), "boolean");
        assert_eq!(Arg::from(json!([1])).type_name(), "array");
        assert_eq!(Arg::from(json!(null)).type_name(), "null");
    }

    #[test]
    fn test_error_downcasting() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        match Arg::error(io) {
            Arg::Error(BaseError::Generic(err)) => {
                assert_eq!(err.message(), "disk");
                assert_eq!(err.name(), "Error");
            }
            other => panic!("unexpected {other:?}"),
        }

        let generic = GenericError::new("g").with_field("status", 409);
        match Arg::error(generic) {
            Arg::Error(base @ BaseError::Generic(_)) => {
                assert_eq!(base.status_hint(), Some(StatusHint::Code(409.0)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
