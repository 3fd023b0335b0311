// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Tests for argument resolution in the error factory.

use super::test_utils::{error_status_strategy, non_error_status_strategy, test_factory};
use crate::config::PoolConfig;
use crate::error::FactoryError;
use crate::factory::{is_http_error, Arg, NON_ERROR_STATUS_NOTICE};
use crate::generic::GenericError;
use crate::registry::{global_registry, ErrorClass};
use crate::stack::captures_on_current_thread;
use proptest::prelude::*;
use serde_json::json;
use test_case::test_case;

fn args<const N: usize>(items: [Arg; N]) -> Vec<Arg> {
    items.into_iter().collect()
}

#[test_case(400, "BadRequestError", true)]
#[test_case(404, "NotFoundError", true)]
#[test_case(500, "InternalServerError", false)]
#[test_case(503, "ServiceUnavailableError", false)]
fn test_status_only(code: u16, name: &str, expose: bool) {
    let (factory, sink) = test_factory(PoolConfig::disabled());
    let err = factory.create(args([Arg::from(code)])).unwrap();

    assert_eq!(err.status(), code);
    assert_eq!(err.status_code(), code);
    assert_eq!(err.expose(), expose);
    assert_eq!(err.name(), name);
    assert_eq!(Some(err.message()), global_registry().phrase(code));
    assert_eq!(sink.count(), 0);
}

#[test]
fn test_message_and_properties() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let err = factory
        .create(args([Arg::from(404), Arg::from("X"), Arg::from(json!({"id": 7}))]))
        .unwrap();

    assert_eq!(err.message(), "X");
    assert_eq!(err.property("id"), Some(&json!(7)));
    assert_eq!(err.name(), "NotFoundError");
}

#[test]
fn test_properties_never_override_status() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let err = factory
        .create(args([
            Arg::from(404),
            Arg::from(json!({"status": 500, "statusCode": 501, "code": "E_GONE"})),
        ]))
        .unwrap();

    assert_eq!(err.status(), 404);
    assert_eq!(err.status_code(), 404);
    assert!(err.property("status").is_none());
    assert!(err.property("statusCode").is_none());
    assert_eq!(err.property("code"), Some(&json!("E_GONE")));
}

#[test]
fn test_later_properties_win() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let err = factory
        .create(args([
            Arg::from(409),
            Arg::from(json!({"a": 1, "b": 1})),
            Arg::from(json!({"b": 2})),
        ]))
        .unwrap();

    assert_eq!(err.property("a"), Some(&json!(1)));
    assert_eq!(err.property("b"), Some(&json!(2)));
}

#[test]
fn test_properties_can_set_expose() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let err = factory
        .create(args([Arg::from(500), Arg::from(json!({"expose": true}))]))
        .unwrap();

    assert_eq!(err.status(), 500);
    assert!(err.expose());
}

#[test]
fn test_unknown_status_falls_back_with_one_notice() {
    let (factory, sink) = test_factory(PoolConfig::disabled());
    let err = factory.create(args([Arg::from(999)])).unwrap();

    assert_eq!(err.status(), 500);
    assert!(!err.expose());
    assert_eq!(err.name(), "InternalServerError");
    assert_eq!(sink.count(), 1);
    assert_eq!(sink.messages(), vec![NON_ERROR_STATUS_NOTICE.to_string()]);
}

#[test]
fn test_known_non_error_status_is_kept() {
    let (factory, sink) = test_factory(PoolConfig::disabled());
    let err = factory.create(args([Arg::from(302)])).unwrap();

    assert_eq!(err.status(), 302);
    assert_eq!(err.status_code(), 302);
    assert!(err.expose());
    assert_eq!(err.name(), "Error");
    assert_eq!(err.message(), "Found");
    assert!(err.variant().is_none());
    assert_eq!(sink.count(), 1);
}

#[test]
fn test_unregistered_code_uses_class_variant() {
    let (factory, sink) = test_factory(PoolConfig::disabled());
    let err = factory.create(args([Arg::from(499)])).unwrap();

    assert_eq!(err.status(), 499);
    assert_eq!(err.status_code(), 499);
    assert!(err.expose());
    assert_eq!(err.name(), "BadRequestError");
    assert_eq!(err.message(), "Bad Request");
    assert_eq!(sink.count(), 0);
}

#[test]
fn test_fractional_status_falls_back() {
    let (factory, sink) = test_factory(PoolConfig::disabled());
    let err = factory.create(args([Arg::from(404.5)])).unwrap();

    assert_eq!(err.status(), 500);
    assert_eq!(sink.count(), 0);
}

#[test]
fn test_no_arguments() {
    let (factory, sink) = test_factory(PoolConfig::disabled());
    let err = factory.create(Vec::new()).unwrap();

    assert_eq!(err.status(), 500);
    assert_eq!(err.message(), "Internal Server Error");
    assert_eq!(sink.count(), 0);
}

#[test]
fn test_message_only() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let err = factory.create(args([Arg::from("boom")])).unwrap();

    assert_eq!(err.status(), 500);
    assert_eq!(err.message(), "boom");
}

#[test]
fn test_second_number_is_unsupported() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let err = factory
        .create(args([Arg::from(404), Arg::from(401)]))
        .unwrap_err();

    assert_eq!(
        err,
        FactoryError::UnsupportedArgument {
            index: 1,
            type_name: "number",
        }
    );
}

#[test_case(json!(true), "boolean")]
#[test_case(json!([1, 2]), "array")]
#[test_case(json!(null), "null")]
fn test_unsupported_types(value: serde_json::Value, type_name: &'static str) {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let err = factory
        .create(args([Arg::from(400), Arg::from(value)]))
        .unwrap_err();

    assert_eq!(err, FactoryError::UnsupportedArgument { index: 1, type_name });
}

#[test]
fn test_adopt_plain_error() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let err = factory
        .create(args([Arg::from(GenericError::new("oops"))]))
        .unwrap();

    assert_eq!(err.status(), 500);
    assert!(!err.expose());
    assert_eq!(err.message(), "oops");
    assert_eq!(err.name(), "Error");
    assert!(is_http_error(&err));
}

#[test]
fn test_adopt_foreign_error_keeps_source() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err = factory.create(args([Arg::from(404), Arg::error(io)])).unwrap();

    assert_eq!(err.status(), 404);
    assert!(err.expose());
    assert_eq!(err.message(), "file not found");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_adopted_status_wins_over_leading_number() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let base = GenericError::new("conflict").with_field("statusCode", 409);
    let err = factory.create(args([Arg::from(400), Arg::from(base)])).unwrap();

    assert_eq!(err.status(), 409);
    assert_eq!(err.name(), "Error");
}

#[test]
fn test_adopted_non_numeric_status_falls_back_silently() {
    let (factory, sink) = test_factory(PoolConfig::disabled());

    let base = GenericError::new("odd").with_field("status", "abc");
    let err = factory.create(args([Arg::from(404), Arg::from(base)])).unwrap();
    assert_eq!(err.status(), 500);
    assert_eq!(err.name(), "Error");

    let base = GenericError::new("odd").with_field("statusCode", json!([409]));
    let err = factory.create(args([Arg::from(base)])).unwrap();
    assert_eq!(err.status(), 500);

    assert_eq!(sink.count(), 0);
}

#[test]
fn test_adopted_falsy_status_keeps_leading_number() {
    let (factory, sink) = test_factory(PoolConfig::disabled());
    let base = GenericError::new("gone")
        .with_field("status", 0)
        .with_field("statusCode", "");
    let err = factory.create(args([Arg::from(410), Arg::from(base)])).unwrap();

    assert_eq!(err.status(), 410);
    assert_eq!(sink.count(), 0);
}

#[test]
fn test_adopt_http_error_ignores_message() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let original = factory.create(args([Arg::from(403), Arg::from("nope")])).unwrap();
    let err = factory
        .create(args([
            Arg::from(original),
            Arg::from("ignored"),
            Arg::from(json!({"user": "kai"})),
        ]))
        .unwrap();

    assert_eq!(err.status(), 403);
    assert_eq!(err.message(), "nope");
    assert_eq!(err.name(), "ForbiddenError");
    assert_eq!(err.property("user"), Some(&json!("kai")));
}

#[test]
fn test_variant_constructor_bypasses_factory() {
    let (factory, _) = test_factory(PoolConfig::default());
    let class = factory.variant(404).unwrap();
    let err = class.construct(Some("missing")).unwrap();

    assert_eq!(err.message(), "missing");
    assert_eq!(err.status(), 404);
    assert!(class.is_instance(&err));
    assert!(factory.base().is_instance(&err));
    assert!(!factory.variant(400).unwrap().is_instance(&err));
}

#[test]
fn test_variant_by_name() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let by_identifier = factory.variant_by_name("NotFound").unwrap();
    let by_class = factory.variant_by_name("NotFoundError").unwrap();

    assert_eq!(by_identifier.name(), "NotFoundError");
    assert_eq!(by_class.name(), "NotFoundError");
    assert!(matches!(factory.variant_by_name("HttpError"), Ok(ErrorClass::Base)));
    assert_eq!(
        factory.variant_by_name("NoSuchThing").unwrap_err(),
        FactoryError::UnknownVariant("NoSuchThing".to_string())
    );
}

#[test]
fn test_abstract_base_cannot_be_constructed() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    assert_eq!(
        factory.base().construct(Some("x")).unwrap_err(),
        FactoryError::AbstractConstruction
    );
}

#[test]
fn test_is_http_error() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let err = factory.create(args([Arg::from(418)])).unwrap();
    assert!(is_http_error(&err));

    let plain = GenericError::new("plain");
    assert!(!is_http_error(&plain));

    let compatible = GenericError::new("compatible")
        .with_field("status", 429)
        .with_field("statusCode", 429)
        .with_field("expose", true);
    assert!(is_http_error(&compatible));

    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    assert!(is_http_error(&boxed));

    assert!(!is_http_error(&"not an error"));
    assert!(!is_http_error(&404u16));
}

#[test]
fn test_stack_is_captured_once() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let before = captures_on_current_thread();
    let err = factory.create(args([Arg::from(404), Arg::from("lazy")])).unwrap();

    assert!(!err.is_stack_captured());
    assert_eq!(captures_on_current_thread(), before);

    let first = err.stack().to_string();
    let second = err.stack().to_string();
    assert_eq!(first, second);
    assert!(first.starts_with("NotFoundError: lazy"));
    assert_eq!(captures_on_current_thread(), before + 1);
}

#[test]
fn test_stack_property_suppresses_capture() {
    let (factory, _) = test_factory(PoolConfig::disabled());
    let before = captures_on_current_thread();
    let err = factory
        .create(args([Arg::from(400), Arg::from(json!({"stack": "custom"}))]))
        .unwrap();

    assert_eq!(err.stack(), "custom");
    assert_eq!(captures_on_current_thread(), before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_status_fields_for_every_variant(code in error_status_strategy()) {
        let (factory, sink) = test_factory(PoolConfig::default());
        let err = factory.create(vec![Arg::from(code)]).unwrap();

        prop_assert_eq!(err.status(), code);
        prop_assert_eq!(err.status_code(), code);
        prop_assert_eq!(err.expose(), code < 500);
        prop_assert_eq!(Some(err.message()), global_registry().phrase(code));
        prop_assert!(is_http_error(&err));
        prop_assert_eq!(sink.count(), 0);
    }

    #[test]
    fn prop_unknown_non_error_status_falls_back(code in non_error_status_strategy()) {
        let (factory, sink) = test_factory(PoolConfig::disabled());
        let err = factory.create(vec![Arg::from(code)]).unwrap();

        prop_assert_eq!(err.status(), 500);
        prop_assert_eq!(err.status_code(), 500);
        prop_assert!(!err.expose());
        prop_assert_eq!(sink.count(), 1);
    }
}
