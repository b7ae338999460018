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

//! Closed vocabulary of the formula language.
//!
//! The formula builder only supports a subset of what the calculation engine
//! evaluates. The builder subset is modelled as closed enums so the shape
//! matcher can match on them exhaustively; the wider engine vocabulary is kept
//! as plain tables and only used to explain why a formula was rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Advisory range for solar depression angles, in degrees.
pub const SOLAR_DEGREES_RANGE: RangeInclusive<f64> = 0.0..=90.0;

/// Advisory range for proportional hours (shaos zmaniyos).
pub const SHAOS_HOURS_RANGE: RangeInclusive<f64> = 0.5..=12.0;

/// Functions the shape matcher knows how to read.
pub const BUILDER_FUNCTIONS: &[&str] = &["solar", "proportional_hours", "custom"];

/// Functions understood by the calculation engine.
pub const ENGINE_FUNCTIONS: &[&str] = &[
    "solar",
    "seasonal_solar",
    "proportional_hours",
    "proportional_minutes",
    "midpoint",
    "first_valid",
    "earlier_of",
    "later_of",
];

/// Directions understood by the calculation engine.
pub const ENGINE_DIRECTIONS: &[&str] = &[
    "before_visible_sunrise",
    "after_visible_sunrise",
    "before_visible_sunset",
    "after_visible_sunset",
    "before_geometric_sunrise",
    "after_geometric_sunrise",
    "before_geometric_sunset",
    "after_geometric_sunset",
    "before_noon",
    "after_noon",
];

/// Day definitions understood by the calculation engine.
pub const ENGINE_BASES: &[&str] = &[
    "gra",
    "mga",
    "mga_60",
    "mga_72",
    "mga_90",
    "mga_96",
    "mga_120",
    "mga_72_zmanis",
    "mga_90_zmanis",
    "mga_96_zmanis",
    "mga_16_1",
    "mga_18",
    "mga_19_8",
    "mga_26",
    "baal_hatanya",
    "ateret_torah",
    "custom",
];

/// Reserved words that can never name a zman.
pub const KEYWORDS: &[&str] = &["if", "else"];

/// Returned by `FromStr` impls when a token is outside the builder vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken {
    /// Vocabulary the token was looked up in (`"direction"`, `"base"`, ...).
    pub table: &'static str,
    /// The rejected token.
    pub token: String,
}

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.table, self.token)
    }
}

impl std::error::Error for UnknownToken {}

/// Solar directions supported by the formula builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarDirection {
    BeforeVisibleSunrise,
    AfterVisibleSunset,
    BeforeNoon,
    AfterNoon,
}

impl SolarDirection {
    pub const ALL: [SolarDirection; 4] = [
        SolarDirection::BeforeVisibleSunrise,
        SolarDirection::AfterVisibleSunset,
        SolarDirection::BeforeNoon,
        SolarDirection::AfterNoon,
    ];

    /// Formula token for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SolarDirection::BeforeVisibleSunrise => "before_visible_sunrise",
            SolarDirection::AfterVisibleSunset => "after_visible_sunset",
            SolarDirection::BeforeNoon => "before_noon",
            SolarDirection::AfterNoon => "after_noon",
        }
    }
}

impl fmt::Display for SolarDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolarDirection {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolarDirection::ALL
            .into_iter()
            .find(|dir| dir.as_str() == s)
            .ok_or_else(|| UnknownToken {
                table: "direction",
                token: s.to_string(),
            })
    }
}

/// Side of the base time a fixed offset lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetDirection {
    /// `base - N min`.
    Before,
    /// `base + N min`.
    After,
}

impl OffsetDirection {
    /// Operator emitted between the base and the minutes.
    pub fn operator(self) -> char {
        match self {
            OffsetDirection::Before => '-',
            OffsetDirection::After => '+',
        }
    }

    /// Maps a formula operator back to its direction.
    pub fn from_operator(op: char) -> Option<Self> {
        match op {
            '-' => Some(OffsetDirection::Before),
            '+' => Some(OffsetDirection::After),
            _ => None,
        }
    }
}

/// Day definitions selectable for proportional hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaosBase {
    #[serde(rename = "gra")]
    Gra,
    #[serde(rename = "mga")]
    Mga,
    #[serde(rename = "mga_90")]
    Mga90,
    #[serde(rename = "baal_hatanya")]
    BaalHatanya,
    #[serde(rename = "custom")]
    Custom,
}

impl ShaosBase {
    pub const ALL: [ShaosBase; 5] = [
        ShaosBase::Gra,
        ShaosBase::Mga,
        ShaosBase::Mga90,
        ShaosBase::BaalHatanya,
        ShaosBase::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShaosBase::Gra => "gra",
            ShaosBase::Mga => "mga",
            ShaosBase::Mga90 => "mga_90",
            ShaosBase::BaalHatanya => "baal_hatanya",
            ShaosBase::Custom => "custom",
        }
    }

    /// When the proportional day starts and ends, for UI tooltips.
    ///
    /// `Custom` has no fixed boundaries and returns `None`.
    pub fn day_bounds(self) -> Option<(&'static str, &'static str)> {
        match self {
            ShaosBase::Gra => Some(("Visible sunrise", "Visible sunset")),
            ShaosBase::Mga => Some((
                "72 minutes before visible sunrise",
                "72 minutes after visible sunset",
            )),
            ShaosBase::Mga90 => Some((
                "90 minutes before visible sunrise",
                "90 minutes after visible sunset",
            )),
            ShaosBase::BaalHatanya => Some((
                "Sun at 1.583° below the horizon (netz amiti)",
                "Sun at 1.583° below the horizon (shkiah amiti)",
            )),
            ShaosBase::Custom => None,
        }
    }
}

impl fmt::Display for ShaosBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShaosBase {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShaosBase::ALL
            .into_iter()
            .find(|base| base.as_str() == s)
            .ok_or_else(|| UnknownToken {
                table: "base",
                token: s.to_string(),
            })
    }
}

/// Astronomical events usable as a fixed zman or as an offset base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePoint {
    VisibleSunrise,
    VisibleSunset,
    GeometricSunrise,
    GeometricSunset,
    SolarNoon,
    SolarMidnight,
    CivilDawn,
    CivilDusk,
    NauticalDawn,
    NauticalDusk,
    AstronomicalDawn,
    AstronomicalDusk,
}

impl ReferencePoint {
    pub const ALL: [ReferencePoint; 12] = [
        ReferencePoint::VisibleSunrise,
        ReferencePoint::VisibleSunset,
        ReferencePoint::GeometricSunrise,
        ReferencePoint::GeometricSunset,
        ReferencePoint::SolarNoon,
        ReferencePoint::SolarMidnight,
        ReferencePoint::CivilDawn,
        ReferencePoint::CivilDusk,
        ReferencePoint::NauticalDawn,
        ReferencePoint::NauticalDusk,
        ReferencePoint::AstronomicalDawn,
        ReferencePoint::AstronomicalDusk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReferencePoint::VisibleSunrise => "visible_sunrise",
            ReferencePoint::VisibleSunset => "visible_sunset",
            ReferencePoint::GeometricSunrise => "geometric_sunrise",
            ReferencePoint::GeometricSunset => "geometric_sunset",
            ReferencePoint::SolarNoon => "solar_noon",
            ReferencePoint::SolarMidnight => "solar_midnight",
            ReferencePoint::CivilDawn => "civil_dawn",
            ReferencePoint::CivilDusk => "civil_dusk",
            ReferencePoint::NauticalDawn => "nautical_dawn",
            ReferencePoint::NauticalDusk => "nautical_dusk",
            ReferencePoint::AstronomicalDawn => "astronomical_dawn",
            ReferencePoint::AstronomicalDusk => "astronomical_dusk",
        }
    }

    /// Short definition shown next to the reference point in the builder.
    pub fn definition(self) -> &'static str {
        match self {
            ReferencePoint::VisibleSunrise => {
                "Upper limb of the sun appears above the horizon, including refraction."
            }
            ReferencePoint::VisibleSunset => {
                "Upper limb of the sun disappears below the horizon, including refraction."
            }
            ReferencePoint::GeometricSunrise => {
                "Center of the sun crosses the geometric horizon in the morning."
            }
            ReferencePoint::GeometricSunset => {
                "Center of the sun crosses the geometric horizon in the evening."
            }
            ReferencePoint::SolarNoon => "Sun crosses the local meridian.",
            ReferencePoint::SolarMidnight => "Sun is at its lowest point, opposite solar noon.",
            ReferencePoint::CivilDawn => "Sun is 6° below the horizon in the morning.",
            ReferencePoint::CivilDusk => "Sun is 6° below the horizon in the evening.",
            ReferencePoint::NauticalDawn => "Sun is 12° below the horizon in the morning.",
            ReferencePoint::NauticalDusk => "Sun is 12° below the horizon in the evening.",
            ReferencePoint::AstronomicalDawn => "Sun is 18° below the horizon in the morning.",
            ReferencePoint::AstronomicalDusk => "Sun is 18° below the horizon in the evening.",
        }
    }
}

impl fmt::Display for ReferencePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferencePoint {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferencePoint::ALL
            .into_iter()
            .find(|point| point.as_str() == s)
            .ok_or_else(|| UnknownToken {
                table: "reference point",
                token: s.to_string(),
            })
    }
}

/// Returns whether a char can start an identifier.
pub(crate) fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Returns whether a char can continue an identifier.
pub(crate) fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Returns whether `name` can be stored as a zman or base identifier.
///
/// The `@` reference prefix is not part of the identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_ident_start(first) && chars.all(is_ident_continue) && !KEYWORDS.contains(&name)
}
