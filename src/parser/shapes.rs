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

//! The four canonical formula shapes.
//!
//! Each shape starts with a distinct token pattern, so at most one of them
//! can consume a whole formula:
//! - `solar(` and `proportional_hours(` are fixed call names
//! - an offset is a name followed by a single `+`/`-`
//! - a fixed zman is a lone name

use crate::ast::{Formula, ProportionalBase, Span};
use crate::grammar::{OffsetDirection, ShaosBase, SolarDirection};
use nom::Parser;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::one_of,
    combinator::{map, map_opt},
    error::context,
};

use super::PResult;
use super::utils::{
    identifier, keyword, reference, unsigned_integer, unsigned_number, ws, ws_char, zman_name,
};

/// `solar(<degrees>, <direction>)`.
pub(super) fn solar(input: Span<'_>) -> PResult<'_, Formula> {
    let (input, _) = ws(keyword("solar")).parse(input)?;
    let (input, _) = context("'('", ws_char('(')).parse(input)?;
    let (input, degrees) = context("solar angle", ws(unsigned_number)).parse(input)?;
    let (input, _) = context("','", ws_char(',')).parse(input)?;
    let (input, direction) = context("solar direction", ws(solar_direction)).parse(input)?;
    let (input, _) = context("')'", ws_char(')')).parse(input)?;
    Ok((input, Formula::Solar { degrees, direction }))
}

/// `proportional_hours(<hours>, <base>)`.
pub(super) fn proportional(input: Span<'_>) -> PResult<'_, Formula> {
    let (input, _) = ws(keyword("proportional_hours")).parse(input)?;
    let (input, _) = context("'('", ws_char('(')).parse(input)?;
    let (input, hours) = context("hour count", ws(unsigned_number)).parse(input)?;
    let (input, _) = context("','", ws_char(',')).parse(input)?;
    let (input, base) = context("proportional base", alt((custom_base, plain_base))).parse(input)?;
    let (input, _) = context("')'", ws_char(')')).parse(input)?;
    Ok((input, Formula::Proportional { hours, base }))
}

/// `<name> + <minutes>min` or `<name> - <minutes>min`.
pub(super) fn fixed_offset(input: Span<'_>) -> PResult<'_, Formula> {
    let (input, base) = ws(zman_name).parse(input)?;
    let (input, direction) = ws(map_opt(one_of("+-"), OffsetDirection::from_operator))
        .parse(input)?;
    let (input, minutes) = context("offset minutes", unsigned_integer).parse(input)?;
    let (input, _) = context("'min'", tag("min")).parse(input)?;
    Ok((
        input,
        Formula::FixedOffset {
            base,
            direction,
            minutes,
        },
    ))
}

/// A lone `<name>` or `@<name>`.
pub(super) fn fixed_zman(input: Span<'_>) -> PResult<'_, Formula> {
    map(ws(zman_name), |name| Formula::FixedZman { name }).parse(input)
}

fn solar_direction(input: Span<'_>) -> PResult<'_, SolarDirection> {
    map_opt(identifier, |name: String| name.parse().ok()).parse(input)
}

/// One of the plain builder bases; bare `custom` is rejected.
fn plain_base(input: Span<'_>) -> PResult<'_, ProportionalBase> {
    map_opt(ws(identifier), |name: String| match name.parse::<ShaosBase>() {
        Ok(ShaosBase::Custom) | Err(_) => None,
        Ok(kind) => Some(ProportionalBase::from_kind(kind)),
    })
    .parse(input)
}

/// `custom(@<start>, @<end>)`.
fn custom_base(input: Span<'_>) -> PResult<'_, ProportionalBase> {
    let (input, _) = ws(keyword("custom")).parse(input)?;
    let (input, _) = context("'('", ws_char('(')).parse(input)?;
    let (input, start) = context("custom start reference", ws(reference)).parse(input)?;
    let (input, _) = context("','", ws_char(',')).parse(input)?;
    let (input, end) = context("custom end reference", ws(reference)).parse(input)?;
    let (input, _) = context("')'", ws_char(')')).parse(input)?;
    Ok((
        input,
        ProportionalBase::Custom {
            start: Some(start),
            end: Some(end),
        },
    ))
}
