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

//! Typed formula payloads and source spans.
//!
//! A [`Formula`] is what a canonical formula string means: exactly one
//! calculation method with only the parameters that method uses. The editor
//! state in [`crate::state`] wraps it with the latent values of the other
//! methods.

use crate::grammar::{OffsetDirection, ShaosBase, SolarDirection};
use nom_locate::LocatedSpan;
use serde::{Deserialize, Serialize};

/// Parser input span type carrying byte offsets and line/column info.
pub type Span<'a> = LocatedSpan<&'a str>;

/// Source range and anchor position for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based UTF-8 column.
    pub column: usize,
}

impl SourceSpan {
    /// Creates a source span from parser start/end positions.
    pub fn from_bounds(start: Span<'_>, end: Span<'_>) -> Self {
        Self {
            start: start.location_offset(),
            end: end.location_offset(),
            line: start.location_line() as usize,
            column: start.get_utf8_column(),
        }
    }

    /// Returns span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns whether the span covers no input.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Day definition used by a proportional-hours formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "base", rename_all = "snake_case")]
pub enum ProportionalBase {
    Gra,
    Mga,
    #[serde(rename = "mga_90")]
    Mga90,
    BaalHatanya,
    /// `custom(@start, @end)`. Missing endpoints are kept so a half-filled
    /// editor still produces text.
    Custom {
        start: Option<String>,
        end: Option<String>,
    },
}

impl ProportionalBase {
    /// The builder base tag, dropping custom endpoints.
    pub fn kind(&self) -> ShaosBase {
        match self {
            ProportionalBase::Gra => ShaosBase::Gra,
            ProportionalBase::Mga => ShaosBase::Mga,
            ProportionalBase::Mga90 => ShaosBase::Mga90,
            ProportionalBase::BaalHatanya => ShaosBase::BaalHatanya,
            ProportionalBase::Custom { .. } => ShaosBase::Custom,
        }
    }

    /// Builds a plain base from its tag. `Custom` gets no endpoints.
    pub fn from_kind(kind: ShaosBase) -> Self {
        match kind {
            ShaosBase::Gra => ProportionalBase::Gra,
            ShaosBase::Mga => ProportionalBase::Mga,
            ShaosBase::Mga90 => ProportionalBase::Mga90,
            ShaosBase::BaalHatanya => ProportionalBase::BaalHatanya,
            ShaosBase::Custom => ProportionalBase::Custom {
                start: None,
                end: None,
            },
        }
    }
}

/// One formula in the builder-supported subset of the DSL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Formula {
    /// No method selected: the editor's fallback identifier, emitted verbatim.
    BaseTime { name: String },
    /// A reference point or another zman, used as-is.
    FixedZman { name: String },
    /// `solar(<degrees>, <direction>)`.
    Solar {
        degrees: f64,
        direction: SolarDirection,
    },
    /// `<base> - <minutes>min` or `<base> + <minutes>min`.
    FixedOffset {
        base: String,
        direction: OffsetDirection,
        minutes: u32,
    },
    /// `proportional_hours(<hours>, <base>)`.
    Proportional { hours: f64, base: ProportionalBase },
}
