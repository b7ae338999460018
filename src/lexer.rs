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

//! Total tokenizer for formula text.
//!
//! Unlike the shape matcher, the lexer never fails: characters outside the
//! formula alphabet become [`TokenKind::Other`]. The classifier relies on this
//! to inspect formulas the builder cannot read.

use crate::ast::{SourceSpan, Span};
use crate::grammar::{is_ident_continue, is_ident_start};
use nom::Parser;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{anychar, char, digit1, multispace0},
    combinator::{map, opt, recognize},
    sequence::{pair, preceded},
};

type LResult<'a, O> = IResult<Span<'a>, O>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    /// `@name`, stored without the `@`.
    Reference(String),
    Number(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Other(char),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: SourceSpan,
}

impl Token {
    /// Identifier text, if this token is a bare identifier.
    pub(crate) fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Splits `source` into tokens, skipping whitespace.
pub(crate) fn tokenize(source: &str) -> Vec<Token> {
    let mut input = Span::new(source);
    let mut tokens = Vec::new();
    loop {
        let Ok((rest, _)) = multispace0::<_, nom::error::Error<Span<'_>>>(input) else {
            break;
        };
        if rest.fragment().is_empty() {
            break;
        }
        match token(rest) {
            Ok((next, tok)) => {
                tokens.push(tok);
                input = next;
            }
            Err(_) => break,
        }
    }
    tokens
}

fn token(input: Span<'_>) -> LResult<'_, Token> {
    let start = input;
    let (input, kind) = alt((reference, ident, number, punct, map(anychar, TokenKind::Other)))
        .parse(input)?;
    Ok((
        input,
        Token {
            kind,
            span: SourceSpan::from_bounds(start, input),
        },
    ))
}

fn ident_text(input: Span<'_>) -> LResult<'_, Span<'_>> {
    recognize(pair(
        take_while1(is_ident_start),
        take_while(is_ident_continue),
    ))
    .parse(input)
}

fn ident(input: Span<'_>) -> LResult<'_, TokenKind> {
    map(ident_text, |s: Span<'_>| {
        TokenKind::Ident(s.fragment().to_string())
    })
    .parse(input)
}

fn reference(input: Span<'_>) -> LResult<'_, TokenKind> {
    map(preceded(char('@'), ident_text), |s: Span<'_>| {
        TokenKind::Reference(s.fragment().to_string())
    })
    .parse(input)
}

fn number(input: Span<'_>) -> LResult<'_, TokenKind> {
    map(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: Span<'_>| TokenKind::Number(s.fragment().to_string()),
    )
    .parse(input)
}

fn punct(input: Span<'_>) -> LResult<'_, TokenKind> {
    map(
        nom::character::complete::one_of("+-*/(){},"),
        |c: char| match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            _ => TokenKind::Comma,
        },
    )
    .parse(input)
}
