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

//! Canonical formula text.
//!
//! Generation is total: every [`Formula`], including one built from a
//! half-filled editor, renders to some string. Strings produced from valid
//! states parse back to the same formula.

use crate::ast::{Formula, ProportionalBase};
use crate::state::FormulaBuilderState;
use std::fmt;

/// Renders the editor's active method as canonical formula text.
pub fn generate(state: &FormulaBuilderState) -> String {
    state.formula().to_string()
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::BaseTime { name } | Formula::FixedZman { name } => f.write_str(name),
            Formula::Solar { degrees, direction } => {
                write!(f, "solar({}, {direction})", Number(*degrees))
            }
            Formula::FixedOffset {
                base,
                direction,
                minutes,
            } => write!(f, "{base} {} {minutes}min", direction.operator()),
            Formula::Proportional { hours, base } => {
                write!(f, "proportional_hours({}, {base})", Number(*hours))
            }
        }
    }
}

impl fmt::Display for ProportionalBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProportionalBase::Custom {
                start: Some(start),
                end: Some(end),
            } if !start.is_empty() && !end.is_empty() => write!(f, "custom(@{start}, @{end})"),
            // Incomplete custom endpoints degrade to the bare tag.
            other => f.write_str(other.kind().as_str()),
        }
    }
}

/// Formats a number with the fewest digits that read back to the same value.
///
/// Integral values have no decimal point (`18`, not `18.0`).
struct Number(f64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `-0` would not survive the unsigned number grammar.
        if self.0 == 0.0 {
            return f.write_str("0");
        }
        // Rust's float `Display` is shortest round-trip and never uses exponents.
        write!(f, "{}", self.0)
    }
}
