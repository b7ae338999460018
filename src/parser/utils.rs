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

//! Lexical helpers shared by the formula shapes.

use crate::ast::Span;
use crate::grammar::{KEYWORDS, is_ident_continue, is_ident_start};
use nom::Parser;
use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{map, map_res, opt, recognize, verify},
    sequence::{pair, preceded},
};

use super::PResult;

/// Parses identifiers (`[A-Za-z_][A-Za-z0-9_]*`), rejecting `if`/`else`.
pub(super) fn identifier(input: Span<'_>) -> PResult<'_, String> {
    map(
        verify(
            recognize(pair(
                take_while1(is_ident_start),
                take_while(is_ident_continue),
            )),
            |s: &Span<'_>| !KEYWORDS.contains(s.fragment()),
        ),
        |s: Span<'_>| s.fragment().to_string(),
    )
    .parse(input)
}

/// Parses an identifier with an optional `@` prefix, returning it unprefixed.
pub(super) fn zman_name(input: Span<'_>) -> PResult<'_, String> {
    preceded(opt(char('@')), identifier).parse(input)
}

/// Parses a `@`-prefixed identifier, returning it unprefixed.
pub(super) fn reference(input: Span<'_>) -> PResult<'_, String> {
    preceded(char('@'), identifier).parse(input)
}

/// Matches one exact word; `solar` does not match the start of `solar_noon`.
pub(super) fn keyword<'a>(word: &'static str) -> impl FnMut(Span<'a>) -> PResult<'a, String> {
    verify(identifier, move |name: &String| name == word)
}

/// Parses an unsigned decimal (`18`, `16.1`). No sign, no exponent.
pub(super) fn unsigned_number(input: Span<'_>) -> PResult<'_, f64> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: Span<'_>| s.fragment().parse::<f64>(),
    )
    .parse(input)
}

/// Parses an unsigned integer that fits in `u32`.
pub(super) fn unsigned_integer(input: Span<'_>) -> PResult<'_, u32> {
    map_res(digit1, |s: Span<'_>| s.fragment().parse::<u32>()).parse(input)
}

/// Wraps a parser with leading/trailing whitespace skipping.
pub(super) fn ws<'a, O, P>(mut parser: P) -> impl FnMut(Span<'a>) -> PResult<'a, O>
where
    P: FnMut(Span<'a>) -> PResult<'a, O>,
{
    move |input| nom::sequence::delimited(multispace0, &mut parser, multispace0)(input)
}

/// Parses a specific character token with surrounding whitespace.
pub(super) fn ws_char<'a>(c: char) -> impl FnMut(Span<'a>) -> PResult<'a, char> {
    ws(char(c))
}
