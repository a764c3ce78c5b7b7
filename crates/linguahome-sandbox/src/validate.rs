// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexical deny-list scan for generated code.
//!
//! This is a coarse substring filter. Equivalent capabilities reachable
//! through other spellings are not caught; the interpreter's restricted
//! surface is what actually bounds what code can do.

use std::fmt;

/// Substrings that reject code outright, checked in order.
pub const DENY_LIST: &[&str] = &[
    "import os",
    "import subprocess",
    "import shutil",
    "import socket",
    "import urllib",
    "import requests",
    "__import__",
    "exec(",
    "eval(",
    "open(",
    "file(",
    "compile(",
    "globals(",
    "locals(",
    "vars(",
    "delattr(",
    "setattr(",
    "getattr(",
    "Fn(",
    "call(",
    "curry(",
    "is_def_fn(",
    "is_def_var(",
];

/// Why code was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsafeReason {
    Forbidden(&'static str),
    Syntax(String),
}

impl fmt::Display for UnsafeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden(pattern) => write!(f, "Forbidden pattern detected: {pattern}"),
            Self::Syntax(detail) => write!(f, "Syntax error: {detail}"),
        }
    }
}

/// Verdict of [`crate::CodeSandbox::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSafety {
    Safe,
    Unsafe(UnsafeReason),
}

impl CodeSafety {
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }

    /// Human-readable rejection reason, `None` when safe.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Safe => None,
            Self::Unsafe(reason) => Some(reason.to_string()),
        }
    }
}

/// Returns the first deny-listed substring present in `code`.
pub fn find_forbidden(code: &str) -> Option<&'static str> {
    DENY_LIST.iter().copied().find(|pattern| code.contains(pattern))
}
