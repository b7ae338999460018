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

//! Explains why a formula is outside the builder subset.
//!
//! Checks run in a fixed order and the first hit wins, so a conditional that
//! also chains operators is reported as a conditional:
//! 1. `if(...)` or `else`
//! 2. `midpoint(...)`
//! 3. more than one top-level `+`/`-`
//! 4. a call to anything but `solar`, `proportional_hours` or `custom`
//! 5. everything else
//!
//! Classification is plain token inspection and never fails.

use crate::ast::SourceSpan;
use crate::diagnostics::ComplexityReason;
use crate::grammar::{
    BUILDER_FUNCTIONS, ENGINE_BASES, ENGINE_DIRECTIONS, ENGINE_FUNCTIONS, ShaosBase,
    SolarDirection,
};
use crate::lexer::{Token, TokenKind, tokenize};
use serde::{Deserialize, Serialize};

/// Outcome of classifying an unsupported formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub reason: ComplexityReason,
    pub details: String,
    /// The token that triggered the classification, when there is one.
    pub span: Option<SourceSpan>,
}

impl Classification {
    fn new(reason: ComplexityReason, details: String, token: Option<&Token>) -> Self {
        Self {
            reason,
            details,
            span: token.map(|t| t.span.clone()),
        }
    }
}

/// Classifies formula text the shape matcher rejected.
pub fn classify(text: &str) -> Classification {
    let tokens = tokenize(text);

    if let Some(tok) = find_conditional(&tokens) {
        return Classification::new(
            ComplexityReason::Conditional,
            "Conditional (if/else) formulas cannot be edited in the formula builder".to_string(),
            Some(tok),
        );
    }

    if let Some(tok) = find_call(&tokens, |name| name == "midpoint") {
        return Classification::new(
            ComplexityReason::Midpoint,
            "midpoint() between two times cannot be edited in the formula builder".to_string(),
            Some(tok),
        );
    }

    let operators = top_level_operators(&tokens);
    if operators.len() > 1 {
        return Classification::new(
            ComplexityReason::ChainedOperations,
            format!(
                "Formula chains {} arithmetic operations; the formula builder supports a single offset",
                operators.len()
            ),
            operators.get(1).copied(),
        );
    }

    if let Some(tok) = find_call(&tokens, |name| !BUILDER_FUNCTIONS.contains(&name)) {
        let name = tok.ident().unwrap_or_default();
        let details = if ENGINE_FUNCTIONS.contains(&name) {
            format!("{name}() is supported by the calculation engine but not by the formula builder")
        } else {
            format!("Unknown function '{name}()'")
        };
        return Classification::new(ComplexityReason::UnknownFunction, details, Some(tok));
    }

    unknown_syntax(&tokens)
}

/// Looks for the near-miss that makes a known shape unreadable.
fn unknown_syntax(tokens: &[Token]) -> Classification {
    let reason = ComplexityReason::UnknownSyntax;

    for tok in tokens {
        let Some(name) = tok.ident() else {
            continue;
        };
        if ENGINE_DIRECTIONS.contains(&name) && name.parse::<SolarDirection>().is_err() {
            return Classification::new(
                reason,
                format!("Direction '{name}' is not available in the formula builder"),
                Some(tok),
            );
        }
        if ENGINE_BASES.contains(&name) && name.parse::<ShaosBase>().is_err() {
            let supported: Vec<&str> = ShaosBase::ALL.iter().map(|b| b.as_str()).collect();
            return Classification::new(
                reason,
                format!(
                    "Base '{name}' is not one of the formula builder's bases ({})",
                    supported.join(", ")
                ),
                Some(tok),
            );
        }
    }

    if let Some(tok) = signed_angle(tokens) {
        return Classification::new(
            reason,
            "Signed solar angles cannot be edited in the formula builder".to_string(),
            Some(tok),
        );
    }

    if let Some(tok) = duration_unit(tokens) {
        let unit = tok.ident().unwrap_or_default();
        return Classification::new(
            reason,
            format!("Duration unit '{unit}' is not supported; offsets are written in whole minutes"),
            Some(tok),
        );
    }

    Classification::new(
        reason,
        "Formula does not match any formula builder pattern".to_string(),
        None,
    )
}

/// `if` followed by `(`, or any `else`.
fn find_conditional(tokens: &[Token]) -> Option<&Token> {
    tokens.iter().enumerate().find_map(|(i, tok)| match tok.ident() {
        Some("else") => Some(tok),
        Some("if") if opens_call(tokens, i) => Some(tok),
        _ => None,
    })
}

/// First identifier directly followed by `(` that satisfies `pred`.
fn find_call<'t>(tokens: &'t [Token], pred: impl Fn(&str) -> bool) -> Option<&'t Token> {
    tokens.iter().enumerate().find_map(|(i, tok)| {
        let name = tok.ident()?;
        (opens_call(tokens, i) && pred(name)).then_some(tok)
    })
}

fn opens_call(tokens: &[Token], i: usize) -> bool {
    matches!(tokens.get(i + 1).map(|t| &t.kind), Some(TokenKind::LParen))
}

/// `+`/`-` tokens outside any parentheses or braces.
fn top_level_operators(tokens: &[Token]) -> Vec<&Token> {
    let mut depth = 0usize;
    let mut operators = Vec::new();
    for tok in tokens {
        match tok.kind {
            TokenKind::LParen | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBrace => depth = depth.saturating_sub(1),
            TokenKind::Plus | TokenKind::Minus if depth == 0 => operators.push(tok),
            _ => {}
        }
    }
    operators
}

/// A `-`/`+` directly before the angle in `solar(`.
fn signed_angle(tokens: &[Token]) -> Option<&Token> {
    tokens.windows(3).find_map(|w| {
        let is_solar_call = w[0].ident() == Some("solar") && w[1].kind == TokenKind::LParen;
        let signed = matches!(w[2].kind, TokenKind::Minus | TokenKind::Plus);
        (is_solar_call && signed).then_some(&w[2])
    })
}

/// A unit other than `min` glued to an offset amount (`1hr`, `90s`).
fn duration_unit(tokens: &[Token]) -> Option<&Token> {
    tokens.windows(2).find_map(|w| {
        let TokenKind::Number(_) = w[0].kind else {
            return None;
        };
        let unit = w[1].ident()?;
        let glued = w[1].span.start == w[0].span.end;
        (glued && unit != "min").then_some(&w[1])
    })
}
