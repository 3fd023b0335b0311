// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Deferred stack-trace capture.
//!
//! Capturing a backtrace is by far the most expensive part of building an
//! error, and most HTTP errors are only ever inspected for their status.
//! [`LazyStack`] therefore holds nothing until the trace is first read,
//! captures it once, and serves the cached string afterwards.
//!
//! # Example
//!
//! ```
//! use hewa::stack::{LazyStack, StackCapture};
//!
//! let stack = LazyStack::new(StackCapture::Lazy);
//! assert!(!stack.is_captured());
//!
//! let first = stack.get_or_capture(|| "Error: boom".to_string()).to_string();
//! let second = stack.get_or_capture(|| unreachable!());
//! assert_eq!(first, second);
//! ```

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::cell::Cell;

/// When stack traces are captured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StackCapture {
    /// Capture on first read
    #[default]
    Lazy,
    /// Capture at construction
    Eager,
    /// Never capture; reads yield only the `Name: message` header
    Disabled,
}

thread_local! {
    static CAPTURES: Cell<u64> = const { Cell::new(0) };
}

/// Number of backtraces captured on the current thread so far.
pub fn captures_on_current_thread() -> u64 {
    CAPTURES.with(Cell::get)
}

fn capture(header: String) -> String {
    CAPTURES.with(|count| count.set(count.get() + 1));
    format!("{header}\n{}", Backtrace::force_capture())
}

/// A stack trace that is captured at most once, on demand.
#[derive(Debug)]
pub struct LazyStack {
    cell: OnceCell<String>,
    mode: StackCapture,
}

impl LazyStack {
    /// An empty stack that captures according to `mode`.
    ///
    /// `Eager` mode does not capture here since there is no header yet; use
    /// [`LazyStack::eager`] for that.
    pub fn new(mode: StackCapture) -> Self {
        Self {
            cell: OnceCell::new(),
            mode,
        }
    }

    /// A stack captured immediately.
    pub fn eager(header: String) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(capture(header));
        Self {
            cell,
            mode: StackCapture::Eager,
        }
    }

    /// Builds a stack for `mode`, capturing right away when the mode is eager.
    pub fn for_mode(mode: StackCapture, header: impl FnOnce() -> String) -> Self {
        match mode {
            StackCapture::Eager => Self::eager(header()),
            mode => Self::new(mode),
        }
    }

    /// The capture mode.
    pub fn mode(&self) -> StackCapture {
        self.mode
    }

    /// Returns the trace, capturing it on first call.
    ///
    /// `header` is only invoked when nothing is cached yet.
    pub fn get_or_capture(&self, header: impl FnOnce() -> String) -> &str {
        self.cell.get_or_init(|| match self.mode {
            StackCapture::Disabled => header(),
            StackCapture::Lazy | StackCapture::Eager => capture(header()),
        })
    }

    /// The cached trace, without triggering a capture.
    pub fn get(&self) -> Option<&str> {
        self.cell.get().map(String::as_str)
    }

    /// Whether a value is cached.
    pub fn is_captured(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Stores `value`, suppressing any future automatic capture.
    pub fn set(&mut self, value: String) {
        self.cell = OnceCell::with_value(value);
    }

    /// Drops the cached value so the next read captures again.
    pub fn clear(&mut self) {
        self.cell.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_captures_once() {
        let before = captures_on_current_thread();
        let stack = LazyStack::new(StackCapture::Lazy);
        assert_eq!(captures_on_current_thread(), before);

        let first = stack.get_or_capture(|| "Error: one".to_string()).to_string();
        let second = stack.get_or_capture(|| "Error: two".to_string()).to_string();

        assert_eq!(first, second);
        assert!(first.starts_with("Error: one\n"));
        assert_eq!(captures_on_current_thread(), before + 1);
    }

    #[test]
    fn test_set_suppresses_capture() {
        let before = captures_on_current_thread();
        let mut stack = LazyStack::new(StackCapture::Lazy);
        stack.set("custom".to_string());

        assert_eq!(stack.get_or_capture(|| "Error".to_string()), "custom");
        assert_eq!(captures_on_current_thread(), before);
    }

    #[test]
    fn test_clear_reverts_to_on_demand() {
        let mut stack = LazyStack::new(StackCapture::Lazy);
        stack.get_or_capture(|| "Error: a".to_string());
        assert!(stack.is_captured());

        stack.clear();
        assert!(!stack.is_captured());
        assert!(stack.get().is_none());

        let before = captures_on_current_thread();
        assert!(stack.get_or_capture(|| "Error: b".to_string()).starts_with("Error: b"));
        assert_eq!(captures_on_current_thread(), before + 1);
    }

    #[test]
    fn test_eager_captures_at_construction() {
        let before = captures_on_current_thread();
        let stack = LazyStack::for_mode(StackCapture::Eager, || "Error: now".to_string());
        assert!(stack.is_captured());
        assert_eq!(captures_on_current_thread(), before + 1);
    }

    #[test]
    fn test_disabled_never_captures() {
        let before = captures_on_current_thread();
        let stack = LazyStack::new(StackCapture::Disabled);
        assert_eq!(stack.get_or_capture(|| "Error: quiet".to_string()), "Error: quiet");
        assert_eq!(captures_on_current_thread(), before);
    }
}
