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

//! `nom` shape matcher for formula text.
//!
//! A formula is read by trying each canonical shape in a fixed order:
//! 1. `solar(<degrees>, <direction>)`
//! 2. `proportional_hours(<hours>, <base>)`
//! 3. `<name> +|- <minutes>min`
//! 4. `<name>`
//!
//! Each shape must consume the whole (trimmed) formula. When none does, the
//! formula is handed to the [`crate::classifier`] to explain why.

mod shapes;
mod utils;

use crate::ast::{Formula, SourceSpan, Span};
use crate::classifier::classify;
use crate::diagnostics::{ComplexityReason, ParseError};
use crate::state::FormulaBuilderState;
use nom::{
    IResult,
    combinator::all_consuming,
    error::{VerboseError, VerboseErrorKind},
};
use tracing::{debug, trace};

type PResult<'a, O> = IResult<Span<'a>, O, VerboseError<Span<'a>>>;

type ShapeParser = for<'a> fn(Span<'a>) -> PResult<'a, Formula>;

/// Result of reading formula text into builder state.
pub type ParseResult = Result<FormulaBuilderState, ParseError>;

/// Canonical formula shapes, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Solar,
    Proportional,
    FixedOffset,
    FixedZman,
}

const SHAPES: [(Shape, ShapeParser); 4] = [
    (Shape::Solar, shapes::solar),
    (Shape::Proportional, shapes::proportional),
    (Shape::FixedOffset, shapes::fixed_offset),
    (Shape::FixedZman, shapes::fixed_zman),
];

/// Where a shape gave up, used to point at unsupported syntax.
struct Failure {
    span: SourceSpan,
    expected: Option<String>,
}

/// Reads formula text into an editor state with the matching method selected.
///
/// # Errors
///
/// Returns [`ParseError::empty`] for blank input, and a classified
/// [`ParseError`] when the formula is outside the builder subset.
pub fn parse(text: &str) -> ParseResult {
    parse_formula(text).map(FormulaBuilderState::from_formula)
}

/// Reads formula text into the typed payload of its method.
pub fn parse_formula(text: &str) -> Result<Formula, ParseError> {
    let source = text.trim();
    if source.is_empty() {
        return Err(ParseError::empty());
    }

    let mut furthest: Option<Failure> = None;
    for (shape, parser) in SHAPES {
        match all_consuming(parser)(Span::new(source)) {
            Ok((_, formula)) => {
                trace!(?shape, formula = source, "matched builder shape");
                return Ok(formula);
            }
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
                if let Some(failure) = failure_point(&e) {
                    let further = furthest
                        .as_ref()
                        .is_none_or(|best| failure.span.start > best.span.start);
                    if further {
                        furthest = Some(failure);
                    }
                }
            }
            Err(nom::Err::Incomplete(_)) => {}
        }
    }

    Err(classified_error(source, furthest))
}

/// Builds the "advanced formula" error for text no shape accepted.
fn classified_error(source: &str, furthest: Option<Failure>) -> ParseError {
    let classification = classify(source);
    debug!(
        formula = source,
        reason = %classification.reason,
        "formula is outside the builder subset"
    );

    if let Some(span) = &classification.span {
        return ParseError::complex_at(
            classification.reason,
            classification.details,
            source,
            span,
        );
    }

    // Only generic syntax failures fall back to the matcher's own position.
    match furthest {
        Some(failure) if classification.reason == ComplexityReason::UnknownSyntax => {
            let details = match &failure.expected {
                Some(expected) => format!(
                    "{}; expected {expected} at column {}",
                    classification.details, failure.span.column
                ),
                None => classification.details,
            };
            ParseError::complex_at(classification.reason, details, source, &failure.span)
        }
        _ => ParseError::complex(classification.reason, classification.details),
    }
}

/// Picks the deepest input position in a verbose error and what was expected there.
fn failure_point(err: &VerboseError<Span<'_>>) -> Option<Failure> {
    let (span, kind) = err
        .errors
        .iter()
        .max_by_key(|(span, _)| span.location_offset())?;
    // The innermost `context` names the construct being read.
    let expected = err
        .errors
        .iter()
        .find_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(ctx) => Some((*ctx).to_string()),
            _ => None,
        })
        .or_else(|| match kind {
            VerboseErrorKind::Char(c) => Some(format!("'{c}'")),
            _ => None,
        });
    Some(Failure {
        span: SourceSpan::from_bounds(*span, *span),
        expected,
    })
}

/// Every shape that accepts `text` on its own, ignoring matching order.
#[cfg(test)]
pub(crate) fn matching_shapes(text: &str) -> Vec<Shape> {
    let source = text.trim();
    SHAPES
        .iter()
        .filter(|(_, parser)| all_consuming(*parser)(Span::new(source)).is_ok())
        .map(|(shape, _)| *shape)
        .collect()
}
