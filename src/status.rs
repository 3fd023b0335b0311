// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Status table and identifier casing.
//!
//! The factory does not own the mapping from status codes to reason phrases,
//! nor the rule that turns a phrase into a type name. Both sit behind small
//! traits so hosts with extended status tables can plug their own in.

use convert_case::{Case, Casing};
use http::StatusCode;
use std::fmt::Debug;

/// Lookup of reason phrases by status code.
pub trait StatusRegistry: Send + Sync + Debug {
    /// The default reason phrase for `code`, if the code is known.
    fn phrase(&self, code: u16) -> Option<&str>;

    /// Every known status code, in ascending order.
    fn codes(&self) -> Vec<u16>;
}

/// Status table backed by the canonical reason phrases of the `http` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanonicalStatuses;

impl StatusRegistry for CanonicalStatuses {
    fn phrase(&self, code: u16) -> Option<&str> {
        StatusCode::from_u16(code)
            .ok()
            .and_then(|status| status.canonical_reason())
    }

    fn codes(&self) -> Vec<u16> {
        (100..1000).filter(|code| self.phrase(*code).is_some()).collect()
    }
}

/// Converts a reason phrase into an identifier.
pub trait IdentifierCase: Send + Sync + Debug {
    /// Identifier form of `phrase`, e.g. `NotFound` for "Not Found".
    fn identifier(&self, phrase: &str) -> String;
}

/// Upper camel case with every non-alphanumeric character removed.
///
/// "I'm a teapot" becomes `ImATeapot`, "URI Too Long" becomes `UriTooLong`.
///
/// Acronyms are cased like any other word: "HTTP Version Not Supported" is
/// `HttpVersionNotSupported`, not `HTTPVersionNotSupported`. Lookups by
/// name must use this form.
#[derive(Debug, Default, Clone, Copy)]
pub struct PascalIdentifier;

impl IdentifierCase for PascalIdentifier {
    fn identifier(&self, phrase: &str) -> String {
        phrase
            .to_case(Case::Pascal)
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect()
    }
}
