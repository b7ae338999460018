/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Parse failures with reasons, source snippets, and caret pointers.

use crate::ast::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a formula is valid for the calculation engine but not editable in
/// the visual builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityReason {
    /// `if (...)` / `else` branches.
    Conditional,
    /// `midpoint(a, b)`.
    Midpoint,
    /// More than one top-level `+`/`-`.
    ChainedOperations,
    /// A call to a function the builder has no panel for.
    UnknownFunction,
    /// Anything else, including unsupported variants of known functions.
    UnknownSyntax,
}

impl ComplexityReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplexityReason::Conditional => "conditional",
            ComplexityReason::Midpoint => "midpoint",
            ComplexityReason::ChainedOperations => "chained_operations",
            ComplexityReason::UnknownFunction => "unknown_function",
            ComplexityReason::UnknownSyntax => "unknown_syntax",
        }
    }

    /// Headline shown on the "advanced formula" notice.
    pub fn label(self) -> &'static str {
        match self {
            ComplexityReason::Conditional => "Conditional logic",
            ComplexityReason::Midpoint => "Midpoint calculation",
            ComplexityReason::ChainedOperations => "Chained operations",
            ComplexityReason::UnknownFunction => "Unsupported function",
            ComplexityReason::UnknownSyntax => "Unsupported syntax",
        }
    }
}

impl fmt::Display for ComplexityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to read formula text into builder state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    /// Human-readable error message.
    #[serde(rename = "error")]
    pub message: String,
    /// Set when the formula is well-formed for the engine but too advanced
    /// for the builder. `None` only for the empty formula.
    #[serde(rename = "complexityReason")]
    pub reason: Option<ComplexityReason>,
    /// Free-text explanation accompanying `reason`.
    #[serde(rename = "complexityDetails")]
    pub details: Option<String>,
    /// 1-based line number (`0` when unavailable).
    pub line: usize,
    /// 1-based column number (`0` when unavailable).
    pub column: usize,
    /// Source line snippet where the problem was found.
    pub snippet: String,
    /// Caret pointer aligned to `snippet`.
    pub pointer: String,
}

impl ParseError {
    /// The empty or all-whitespace formula.
    pub fn empty() -> Self {
        Self {
            message: "Formula is empty".to_string(),
            reason: None,
            details: None,
            line: 0,
            column: 0,
            snippet: String::new(),
            pointer: String::new(),
        }
    }

    /// A formula outside the builder subset, with no source location.
    pub fn complex(reason: ComplexityReason, details: impl Into<String>) -> Self {
        Self {
            message: format!("Advanced formula detected: {}", reason.label()),
            reason: Some(reason),
            details: Some(details.into()),
            line: 0,
            column: 0,
            snippet: String::new(),
            pointer: String::new(),
        }
    }

    /// A formula outside the builder subset, anchored at `span` in `source`.
    pub fn complex_at(
        reason: ComplexityReason,
        details: impl Into<String>,
        source: &str,
        span: &SourceSpan,
    ) -> Self {
        let mut err = Self::complex(reason, details);
        // Pull the exact source line the span starts on.
        let snippet = source
            .lines()
            .nth(span.line.saturating_sub(1))
            .unwrap_or("")
            .to_string();
        // Keep the caret inside the line even when the span runs past it.
        let line_len = snippet.chars().count();
        let pointer_column = span.column.saturating_sub(1).min(line_len);
        let requested_len = span.len().max(1);
        let max_len = line_len.saturating_sub(pointer_column).max(1);
        let pointer_len = requested_len.min(max_len);
        err.pointer = format!("{}{}", " ".repeat(pointer_column), "^".repeat(pointer_len));
        err.snippet = snippet;
        err.line = span.line;
        err.column = span.column;
        err
    }

    /// Whether this is a classified "advanced formula" rather than an empty one.
    pub fn is_complex(&self) -> bool {
        self.reason.is_some()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {details}", self.message)?,
            None => f.write_str(&self.message)?,
        }
        if self.line == 0 || self.column == 0 {
            return Ok(());
        }
        write!(
            f,
            "\n --> line {}, column {}\n  |\n{:>3} | {}\n  | {}",
            self.line, self.column, self.line, self.snippet, self.pointer
        )
    }
}

impl std::error::Error for ParseError {}
