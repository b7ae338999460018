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

//! Editor state for the visual formula builder.
//!
//! The state keeps every method's inputs, so switching methods in the UI
//! never loses what the user typed. Only the active method reaches the
//! generator; see [`FormulaBuilderState::formula`].
//!
//! Validation is advisory. It is recomputed from the current snapshot after
//! every change and never blocks generation.

use crate::ast::{Formula, ProportionalBase};
use crate::grammar::{
    OffsetDirection, ReferencePoint, SHAOS_HOURS_RANGE, SOLAR_DEGREES_RANGE, ShaosBase,
    SolarDirection, is_identifier,
};
use serde::{Deserialize, Serialize};

/// Calculation method selected in the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    FixedZman,
    Solar,
    FixedOffset,
    Proportional,
}

/// Snapshot of the formula builder.
///
/// `is_valid` and `validation_errors` are derived from the other fields and
/// are refreshed by every constructor, by [`reduce`], and on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "EditorFields")]
pub struct FormulaBuilderState {
    pub method: Option<Method>,
    pub base_time: String,
    pub selected_fixed_zman: String,
    pub solar_degrees: f64,
    pub solar_direction: SolarDirection,
    pub offset_base: String,
    pub offset_direction: OffsetDirection,
    pub offset_minutes: u32,
    pub shaos_hours: f64,
    pub shaos_base: ShaosBase,
    pub custom_start: Option<String>,
    pub custom_end: Option<String>,
    is_valid: bool,
    validation_errors: Vec<String>,
}

// Wire form accepted from the UI; derived fields are ignored and recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditorFields {
    method: Option<Method>,
    base_time: String,
    selected_fixed_zman: String,
    solar_degrees: f64,
    solar_direction: SolarDirection,
    offset_base: String,
    offset_direction: OffsetDirection,
    offset_minutes: u32,
    shaos_hours: f64,
    shaos_base: ShaosBase,
    #[serde(default)]
    custom_start: Option<String>,
    #[serde(default)]
    custom_end: Option<String>,
}

impl From<EditorFields> for FormulaBuilderState {
    fn from(fields: EditorFields) -> Self {
        FormulaBuilderState {
            method: fields.method,
            base_time: fields.base_time,
            selected_fixed_zman: fields.selected_fixed_zman,
            solar_degrees: fields.solar_degrees,
            solar_direction: fields.solar_direction,
            offset_base: fields.offset_base,
            offset_direction: fields.offset_direction,
            offset_minutes: fields.offset_minutes,
            shaos_hours: fields.shaos_hours,
            shaos_base: fields.shaos_base,
            custom_start: fields.custom_start,
            custom_end: fields.custom_end,
            is_valid: false,
            validation_errors: Vec::new(),
        }
        .revalidated()
    }
}

impl Default for FormulaBuilderState {
    fn default() -> Self {
        let sunrise = ReferencePoint::VisibleSunrise.as_str().to_string();
        FormulaBuilderState {
            method: None,
            base_time: sunrise.clone(),
            selected_fixed_zman: sunrise.clone(),
            solar_degrees: 16.1,
            solar_direction: SolarDirection::BeforeVisibleSunrise,
            offset_base: sunrise,
            offset_direction: OffsetDirection::Before,
            offset_minutes: 72,
            shaos_hours: 3.0,
            shaos_base: ShaosBase::Gra,
            custom_start: None,
            custom_end: None,
            is_valid: false,
            validation_errors: Vec::new(),
        }
        .revalidated()
    }
}

impl FormulaBuilderState {
    /// Builds an editor state whose active method carries `formula`.
    ///
    /// Fields of inactive methods keep their defaults.
    pub fn from_formula(formula: Formula) -> Self {
        let mut state = FormulaBuilderState::default();
        match formula {
            Formula::BaseTime { name } => {
                state.method = None;
                state.base_time = name;
            }
            Formula::FixedZman { name } => {
                state.method = Some(Method::FixedZman);
                state.selected_fixed_zman = name;
            }
            Formula::Solar { degrees, direction } => {
                state.method = Some(Method::Solar);
                state.solar_degrees = degrees;
                state.solar_direction = direction;
            }
            Formula::FixedOffset {
                base,
                direction,
                minutes,
            } => {
                state.method = Some(Method::FixedOffset);
                state.offset_base = base;
                state.offset_direction = direction;
                state.offset_minutes = minutes;
            }
            Formula::Proportional { hours, base } => {
                state.method = Some(Method::Proportional);
                state.shaos_hours = hours;
                state.shaos_base = base.kind();
                if let ProportionalBase::Custom { start, end } = base {
                    state.custom_start = start;
                    state.custom_end = end;
                }
            }
        }
        state.revalidated()
    }

    /// Projects the active method and its parameters.
    pub fn formula(&self) -> Formula {
        match self.method {
            None => Formula::BaseTime {
                name: self.base_time.clone(),
            },
            Some(Method::FixedZman) => Formula::FixedZman {
                name: self.selected_fixed_zman.clone(),
            },
            Some(Method::Solar) => Formula::Solar {
                degrees: self.solar_degrees,
                direction: self.solar_direction,
            },
            Some(Method::FixedOffset) => Formula::FixedOffset {
                base: self.offset_base.clone(),
                direction: self.offset_direction,
                minutes: self.offset_minutes,
            },
            Some(Method::Proportional) => {
                let base = match self.shaos_base {
                    ShaosBase::Custom => ProportionalBase::Custom {
                        start: self.custom_start.clone(),
                        end: self.custom_end.clone(),
                    },
                    plain => ProportionalBase::from_kind(plain),
                };
                Formula::Proportional {
                    hours: self.shaos_hours,
                    base,
                }
            }
        }
    }

    /// Whether the last validation pass found no problems.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Problems found by the last validation pass, in field order.
    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    /// Applies one field change and revalidates.
    pub fn apply(mut self, change: FieldChange) -> Self {
        match change {
            FieldChange::Method(method) => self.method = method,
            FieldChange::BaseTime(value) => self.base_time = value,
            FieldChange::SelectedFixedZman(value) => self.selected_fixed_zman = value,
            FieldChange::SolarDegrees(value) => self.solar_degrees = value,
            FieldChange::SolarDirection(value) => self.solar_direction = value,
            FieldChange::OffsetBase(value) => self.offset_base = value,
            FieldChange::OffsetDirection(value) => self.offset_direction = value,
            FieldChange::OffsetMinutes(value) => self.offset_minutes = value,
            FieldChange::ShaosHours(value) => self.shaos_hours = value,
            FieldChange::ShaosBase(value) => self.shaos_base = value,
            FieldChange::CustomStart(value) => self.custom_start = value,
            FieldChange::CustomEnd(value) => self.custom_end = value,
        }
        self.revalidated()
    }

    fn revalidated(mut self) -> Self {
        self.validation_errors = validate(&self);
        self.is_valid = self.validation_errors.is_empty();
        self
    }
}

/// One edit coming from the builder UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldChange {
    Method(Option<Method>),
    BaseTime(String),
    SelectedFixedZman(String),
    SolarDegrees(f64),
    SolarDirection(SolarDirection),
    OffsetBase(String),
    OffsetDirection(OffsetDirection),
    OffsetMinutes(u32),
    ShaosHours(f64),
    ShaosBase(ShaosBase),
    CustomStart(Option<String>),
    CustomEnd(Option<String>),
}

/// Pure state transition: `state` with `change` applied and revalidated.
pub fn reduce(state: FormulaBuilderState, change: FieldChange) -> FormulaBuilderState {
    state.apply(change)
}

/// Checks the active method's fields against the grammar tables.
fn validate(state: &FormulaBuilderState) -> Vec<String> {
    let mut errors = Vec::new();
    match state.method {
        None => {
            if state.base_time.is_empty() {
                errors.push("Select a calculation method".to_string());
            } else {
                check_identifier(&mut errors, "Base time", &state.base_time);
            }
        }
        Some(Method::FixedZman) => {
            if state.selected_fixed_zman.is_empty() {
                errors.push("Select a zman".to_string());
            } else {
                check_identifier(&mut errors, "Zman", &state.selected_fixed_zman);
            }
        }
        Some(Method::Solar) => {
            if !in_range(state.solar_degrees, &SOLAR_DEGREES_RANGE) {
                errors.push(format!(
                    "Solar angle must be between {} and {} degrees",
                    SOLAR_DEGREES_RANGE.start(),
                    SOLAR_DEGREES_RANGE.end()
                ));
            }
        }
        Some(Method::FixedOffset) => {
            if state.offset_base.is_empty() {
                errors.push("Select a base time for the offset".to_string());
            } else {
                check_identifier(&mut errors, "Offset base", &state.offset_base);
            }
        }
        Some(Method::Proportional) => {
            if !in_range(state.shaos_hours, &SHAOS_HOURS_RANGE) {
                errors.push(format!(
                    "Proportional hours must be between {} and {}",
                    SHAOS_HOURS_RANGE.start(),
                    SHAOS_HOURS_RANGE.end()
                ));
            }
            if state.shaos_base == ShaosBase::Custom {
                match state.custom_start.as_deref() {
                    None | Some("") => errors.push("Custom base requires a start time".to_string()),
                    Some(start) => check_identifier(&mut errors, "Custom start", start),
                }
                match state.custom_end.as_deref() {
                    None | Some("") => errors.push("Custom base requires an end time".to_string()),
                    Some(end) => check_identifier(&mut errors, "Custom end", end),
                }
            }
        }
    }
    errors
}

// NaN and infinities fail `contains`, so they are reported as out of range.
fn in_range(value: f64, range: &std::ops::RangeInclusive<f64>) -> bool {
    range.contains(&value)
}

fn check_identifier(errors: &mut Vec<String>, label: &str, name: &str) {
    if !is_identifier(name) {
        errors.push(format!("{label} '{name}' is not a valid identifier"));
    }
}
