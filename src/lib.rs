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

//! Formula compiler for the zman formula builder.
//!
//! This crate translates in both directions between:
//! - formula text in the zman DSL (`solar(16.1, before_visible_sunrise)`,
//!   `visible_sunrise - 72min`, ...), as stored and evaluated elsewhere, and
//! - [`FormulaBuilderState`], the structured state behind the visual builder.
//!
//! # Pipeline
//!
//! 1. [`generate`] renders the active method of a state as canonical text.
//! 2. [`parse`] matches text against the four canonical shapes and rebuilds
//!    a state with the matching method selected.
//! 3. Text that fits no shape is passed to [`classify`], and the resulting
//!    [`ComplexityReason`] travels on the [`ParseError`] so the UI can show
//!    the formula read-only instead of rewriting it.
//!
//! Every entry point is a pure function of its input. Generating from a
//! state built from in-range grammar values and parsing the result yields a
//! state that generates the identical text.
//!
//! ```
//! use zman_formula::{Method, generate, parse};
//!
//! let state = parse("visible_sunrise - 72min").expect("builder formula");
//! assert_eq!(state.method, Some(Method::FixedOffset));
//! assert_eq!(generate(&state), "visible_sunrise - 72min");
//! ```

mod ast;
mod classifier;
mod diagnostics;
mod generator;
mod grammar;
mod lexer;
mod parser;
mod state;

pub use ast::{Formula, ProportionalBase, SourceSpan};
pub use classifier::{Classification, classify};
pub use diagnostics::{ComplexityReason, ParseError};
pub use generator::generate;
pub use grammar::{
    BUILDER_FUNCTIONS, ENGINE_BASES, ENGINE_DIRECTIONS, ENGINE_FUNCTIONS, KEYWORDS,
    OffsetDirection, ReferencePoint, SHAOS_HOURS_RANGE, SOLAR_DEGREES_RANGE, ShaosBase,
    SolarDirection, UnknownToken, is_identifier,
};
pub use parser::{ParseResult, parse, parse_formula};
pub use state::{FieldChange, FormulaBuilderState, Method, reduce};

#[cfg(test)]
mod tests;
