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

//! Crate unit tests.

use super::*;
use crate::lexer::{TokenKind, tokenize};
use crate::parser::{Shape, matching_shapes};
use pretty_assertions::assert_eq;

fn first_caret_column(pointer: &str) -> Option<usize> {
    pointer.chars().position(|ch| ch == '^').map(|idx| idx + 1)
}

fn assert_classified(formula: &str, expected: ComplexityReason) -> ParseError {
    let err = parse(formula).expect_err("formula should be rejected");
    assert_eq!(
        err.reason,
        Some(expected),
        "{formula}: unexpected reason ({:?})",
        err.details
    );
    assert!(err.details.is_some(), "{formula}: missing details");
    err
}

fn assert_round_trip(formula: &str) {
    let state = parse(formula).expect("formula should parse");
    assert_eq!(generate(&state), formula, "round trip changed text");
}

#[test]
fn parses_solar_with_fractional_degrees() {
    let state = parse("solar(16.1, before_visible_sunrise)").expect("parse");
    assert_eq!(state.method, Some(Method::Solar));
    assert_eq!(state.solar_degrees, 16.1);
    assert_eq!(state.solar_direction, SolarDirection::BeforeVisibleSunrise);
    assert_eq!(generate(&state), "solar(16.1, before_visible_sunrise)");
}

#[test]
fn parses_fixed_offset_before() {
    let state = parse("visible_sunrise - 72min").expect("parse");
    assert_eq!(state.method, Some(Method::FixedOffset));
    assert_eq!(state.offset_base, "visible_sunrise");
    assert_eq!(state.offset_direction, OffsetDirection::Before);
    assert_eq!(state.offset_minutes, 72);
}

#[test]
fn parses_fixed_offset_after_and_strips_reference_prefix() {
    let state = parse("@visible_sunset + 18min").expect("parse");
    assert_eq!(state.method, Some(Method::FixedOffset));
    assert_eq!(state.offset_base, "visible_sunset");
    assert_eq!(state.offset_direction, OffsetDirection::After);
    assert_eq!(state.offset_minutes, 18);
    assert_eq!(generate(&state), "visible_sunset + 18min");
}

#[test]
fn parses_custom_proportional_base() {
    let state =
        parse("proportional_hours(9.5, custom(@alos_hashachar, @tzeis_hakochavim))").expect("parse");
    assert_eq!(state.method, Some(Method::Proportional));
    assert_eq!(state.shaos_hours, 9.5);
    assert_eq!(state.shaos_base, ShaosBase::Custom);
    assert_eq!(state.custom_start.as_deref(), Some("alos_hashachar"));
    assert_eq!(state.custom_end.as_deref(), Some("tzeis_hakochavim"));
    assert!(state.is_valid());
}

#[test]
fn parses_every_plain_proportional_base() {
    for base in [
        ShaosBase::Gra,
        ShaosBase::Mga,
        ShaosBase::Mga90,
        ShaosBase::BaalHatanya,
    ] {
        let formula = format!("proportional_hours(3, {base})");
        let state = parse(&formula).expect("parse");
        assert_eq!(state.shaos_base, base, "{formula}");
        assert_eq!(state.shaos_hours, 3.0, "{formula}");
        assert_eq!(generate(&state), formula);
    }
}

#[test]
fn parses_fixed_zman() {
    let state = parse("visible_sunrise").expect("parse");
    assert_eq!(state.method, Some(Method::FixedZman));
    assert_eq!(state.selected_fixed_zman, "visible_sunrise");

    let state = parse("  @alos_hashachar ").expect("parse");
    assert_eq!(state.selected_fixed_zman, "alos_hashachar");
    assert_eq!(generate(&state), "alos_hashachar");
}

#[test]
fn tolerates_whitespace_inside_calls() {
    let state = parse("  solar( 18 ,after_noon )  ").expect("parse");
    assert_eq!(state.solar_degrees, 18.0);
    assert_eq!(state.solar_direction, SolarDirection::AfterNoon);
    assert_eq!(generate(&state), "solar(18, after_noon)");

    let state = parse("proportional_hours(10.75,custom( @a ,@b ))").expect("parse");
    assert_eq!(
        generate(&state),
        "proportional_hours(10.75, custom(@a, @b))"
    );

    let state = parse("sunset+40min").expect("parse");
    assert_eq!(generate(&state), "sunset + 40min");
}

#[test]
fn canonical_formulas_round_trip() {
    for formula in [
        "solar(16.1, before_visible_sunrise)",
        "solar(8.5, after_visible_sunset)",
        "solar(0, before_noon)",
        "visible_sunrise - 72min",
        "visible_sunset + 0min",
        "proportional_hours(3, gra)",
        "proportional_hours(4, mga_90)",
        "proportional_hours(9.5, custom(@alos_hashachar, @tzeis_hakochavim))",
        "solar_noon",
    ] {
        assert_round_trip(formula);
    }
}

#[test]
fn rejects_empty_formula_without_classification() {
    for formula in ["", "   ", "\n\t "] {
        let err = parse(formula).expect_err("empty formula");
        assert_eq!(err, ParseError::empty());
        assert_eq!(err.reason, None);
        assert_eq!(err.details, None);
        assert!(!err.is_complex());
    }
}

#[test]
fn classifies_conditional() {
    let err = assert_classified(
        "if(is_friday, sunset - 40min, sunset)",
        ComplexityReason::Conditional,
    );
    assert_eq!(err.column, 1);
    assert_eq!(first_caret_column(&err.pointer), Some(1));
}

#[test]
fn classifies_block_conditional_and_else() {
    assert_classified(
        "if (latitude > 60) { visible_sunrise - 90min } else { visible_sunrise - 72min }",
        ComplexityReason::Conditional,
    );
    assert_classified("sunset else sunrise", ComplexityReason::Conditional);
}

#[test]
fn conditional_wins_over_chained_operations() {
    assert_classified(
        "if(is_friday, sunset - 40min - 5min, sunset + 10min - 2min) + 1min - 1min",
        ComplexityReason::Conditional,
    );
}

#[test]
fn classifies_midpoint() {
    let err = assert_classified("midpoint(sunrise, sunset)", ComplexityReason::Midpoint);
    assert_eq!(err.snippet, "midpoint(sunrise, sunset)");
    assert_eq!(err.pointer, "^^^^^^^^");
}

#[test]
fn classifies_chained_operations_at_second_operator() {
    let err = assert_classified("sunrise + 30min - 10min", ComplexityReason::ChainedOperations);
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 17);
    assert_eq!(first_caret_column(&err.pointer), Some(17));
    assert!(err.details.as_deref().unwrap_or_default().contains('2'));
}

#[test]
fn operators_inside_calls_are_not_chained() {
    // One top-level operator, the rest are nested.
    assert_classified(
        "solar(16.1, before_visible_sunrise) + 10min",
        ComplexityReason::UnknownSyntax,
    );
}

#[test]
fn classifies_unknown_engine_function() {
    let err = assert_classified("proportional_minutes(45, gra)", ComplexityReason::UnknownFunction);
    let details = err.details.expect("details");
    assert!(details.contains("proportional_minutes"), "{details}");
    assert!(details.contains("calculation engine"), "{details}");
}

#[test]
fn classifies_unrecognized_function() {
    let err = assert_classified("foo(1, 2)", ComplexityReason::UnknownFunction);
    assert_eq!(err.details.as_deref(), Some("Unknown function 'foo()'"));
}

#[test]
fn nested_unknown_function_is_reported() {
    let err = assert_classified(
        "first_valid(solar(16.1, before_visible_sunrise), visible_sunrise - 72min)",
        ComplexityReason::UnknownFunction,
    );
    assert!(err.details.unwrap_or_default().contains("first_valid"));
}

#[test]
fn classifies_unsupported_base_variant() {
    let err = assert_classified("proportional_hours(3, mga_72)", ComplexityReason::UnknownSyntax);
    let details = err.details.clone().expect("details");
    assert!(details.contains("mga_72"), "{details}");
    assert!(details.contains("mga_90"), "{details}");
    assert_eq!(err.column, 23);
    assert_eq!(err.pointer, format!("{}{}", " ".repeat(22), "^".repeat(6)));
}

#[test]
fn classifies_unsupported_direction() {
    let err = assert_classified(
        "solar(16.1, after_visible_sunrise)",
        ComplexityReason::UnknownSyntax,
    );
    assert!(err.details.unwrap_or_default().contains("after_visible_sunrise"));
}

#[test]
fn classifies_signed_angle_and_duration_units() {
    let err = assert_classified(
        "solar(-16.1, before_visible_sunrise)",
        ComplexityReason::UnknownSyntax,
    );
    assert!(err.details.unwrap_or_default().contains("Signed"));

    let err = assert_classified("visible_sunset + 1hr", ComplexityReason::UnknownSyntax);
    assert!(err.details.unwrap_or_default().contains("'hr'"));
}

#[test]
fn bare_custom_base_is_not_accepted() {
    assert_classified(
        "proportional_hours(9.5, custom)",
        ComplexityReason::UnknownSyntax,
    );
}

#[test]
fn generic_syntax_failure_points_at_furthest_match() {
    let err = assert_classified("sunrise - 72", ComplexityReason::UnknownSyntax);
    assert_eq!(
        err.details.as_deref(),
        Some("Formula does not match any formula builder pattern; expected 'min' at column 13")
    );
    assert_eq!(err.column, 13);
    assert_eq!(err.pointer, format!("{}^", " ".repeat(12)));

    let err = assert_classified("sunrise * 2", ComplexityReason::UnknownSyntax);
    assert_eq!(
        err.details.as_deref(),
        Some("Formula does not match any formula builder pattern")
    );
    assert_eq!(err.column, 9);
}

#[test]
fn fractional_minutes_are_not_an_offset() {
    assert_classified("sunrise - 72.5min", ComplexityReason::UnknownSyntax);
    assert_classified("sunrise - 72 min", ComplexityReason::UnknownSyntax);
    assert_classified("sunrise - 72mins", ComplexityReason::UnknownSyntax);
}

#[test]
fn keywords_are_never_zman_names() {
    assert_classified("else", ComplexityReason::Conditional);
    assert_classified("if", ComplexityReason::UnknownSyntax);
    assert!(!is_identifier("if"));
    assert!(!is_identifier("else"));
}

#[test]
fn parse_error_display_includes_location() {
    let err = parse("sunrise + 30min - 10min").expect_err("chained");
    let text = err.to_string();
    assert!(text.starts_with("Advanced formula detected: Chained operations: "));
    assert!(text.contains(" --> line 1, column 17"), "{text}");
    assert!(text.contains("sunrise + 30min - 10min"), "{text}");

    assert_eq!(ParseError::empty().to_string(), "Formula is empty");
}

#[test]
fn parse_error_serializes_for_the_editor() {
    let err = parse("midpoint(sunrise, sunset)").expect_err("midpoint");
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["complexityReason"], "midpoint");
    assert!(json["error"].as_str().unwrap_or_default().contains("Midpoint"));
    assert!(json["complexityDetails"].is_string());

    let json = serde_json::to_value(ParseError::empty()).expect("serialize");
    assert!(json["complexityReason"].is_null());
}

#[test]
fn generator_formats_numbers_minimally() {
    let solar = Formula::Solar {
        degrees: 18.0,
        direction: SolarDirection::BeforeVisibleSunrise,
    };
    assert_eq!(solar.to_string(), "solar(18, before_visible_sunrise)");

    let hours = Formula::Proportional {
        hours: 10.75,
        base: ProportionalBase::Gra,
    };
    assert_eq!(hours.to_string(), "proportional_hours(10.75, gra)");

    let zero = Formula::Solar {
        degrees: -0.0,
        direction: SolarDirection::AfterNoon,
    };
    assert_eq!(zero.to_string(), "solar(0, after_noon)");
}

#[test]
fn generator_emits_names_verbatim() {
    let state = FormulaBuilderState::from_formula(Formula::BaseTime {
        name: "visible_sunset".to_string(),
    });
    assert_eq!(state.method, None);
    assert_eq!(generate(&state), "visible_sunset");

    let state = FormulaBuilderState::from_formula(Formula::FixedZman {
        name: "tzeis_hakochavim".to_string(),
    });
    assert_eq!(generate(&state), "tzeis_hakochavim");
}

#[test]
fn generator_degrades_incomplete_custom_base() {
    let state = FormulaBuilderState::default()
        .apply(FieldChange::Method(Some(Method::Proportional)))
        .apply(FieldChange::ShaosHours(9.5))
        .apply(FieldChange::ShaosBase(ShaosBase::Custom))
        .apply(FieldChange::CustomStart(Some("alos_hashachar".to_string())));
    assert_eq!(generate(&state), "proportional_hours(9.5, custom)");
    assert!(!state.is_valid());
    assert_eq!(
        state.validation_errors(),
        ["Custom base requires an end time".to_string()]
    );
}

#[test]
fn default_state_is_valid() {
    let state = FormulaBuilderState::default();
    assert!(state.is_valid());
    assert!(state.validation_errors().is_empty());
    assert_eq!(generate(&state), "visible_sunrise");
}

#[test]
fn validation_is_advisory() {
    let state = reduce(
        reduce(
            FormulaBuilderState::default(),
            FieldChange::Method(Some(Method::Solar)),
        ),
        FieldChange::SolarDegrees(95.0),
    );
    assert!(!state.is_valid());
    assert_eq!(
        state.validation_errors(),
        ["Solar angle must be between 0 and 90 degrees".to_string()]
    );
    assert_eq!(generate(&state), "solar(95, before_visible_sunrise)");

    let state = reduce(state, FieldChange::SolarDegrees(f64::NAN));
    assert!(!state.is_valid());

    let state = reduce(state, FieldChange::SolarDegrees(19.8));
    assert!(state.is_valid());
}

#[test]
fn validation_checks_only_the_active_method() {
    let state = FormulaBuilderState::default()
        .apply(FieldChange::SolarDegrees(400.0))
        .apply(FieldChange::Method(Some(Method::FixedOffset)));
    assert!(state.is_valid());

    let state = state.apply(FieldChange::OffsetBase(String::new()));
    assert_eq!(
        state.validation_errors(),
        ["Select a base time for the offset".to_string()]
    );

    let state = state.apply(FieldChange::OffsetBase("visible sunrise".to_string()));
    assert_eq!(
        state.validation_errors(),
        ["Offset base 'visible sunrise' is not a valid identifier".to_string()]
    );
}

#[test]
fn validation_reports_proportional_problems_in_field_order() {
    let state = FormulaBuilderState::default()
        .apply(FieldChange::Method(Some(Method::Proportional)))
        .apply(FieldChange::ShaosHours(0.25))
        .apply(FieldChange::ShaosBase(ShaosBase::Custom));
    assert_eq!(
        state.validation_errors(),
        [
            "Proportional hours must be between 0.5 and 12".to_string(),
            "Custom base requires a start time".to_string(),
            "Custom base requires an end time".to_string(),
        ]
    );
}

#[test]
fn validation_without_method() {
    let state = FormulaBuilderState::default().apply(FieldChange::BaseTime(String::new()));
    assert_eq!(
        state.validation_errors(),
        ["Select a calculation method".to_string()]
    );

    let state = FormulaBuilderState::default()
        .apply(FieldChange::Method(Some(Method::FixedZman)))
        .apply(FieldChange::SelectedFixedZman(String::new()));
    assert_eq!(state.validation_errors(), ["Select a zman".to_string()]);
}

#[test]
fn switching_methods_keeps_latent_values() {
    let state = FormulaBuilderState::default()
        .apply(FieldChange::Method(Some(Method::Solar)))
        .apply(FieldChange::SolarDegrees(18.0))
        .apply(FieldChange::Method(Some(Method::FixedOffset)))
        .apply(FieldChange::OffsetMinutes(90));
    assert_eq!(generate(&state), "visible_sunrise - 90min");

    let state = state.apply(FieldChange::Method(Some(Method::Solar)));
    assert_eq!(generate(&state), "solar(18, before_visible_sunrise)");
    assert_eq!(state.offset_minutes, 90);
}

#[test]
fn field_changes_deserialize_from_editor_json() {
    let change: FieldChange =
        serde_json::from_str(r#"{"field":"solarDegrees","value":18.5}"#).expect("deserialize");
    assert_eq!(change, FieldChange::SolarDegrees(18.5));

    let change: FieldChange =
        serde_json::from_str(r#"{"field":"shaosBase","value":"mga_90"}"#).expect("deserialize");
    assert_eq!(change, FieldChange::ShaosBase(ShaosBase::Mga90));

    let change: FieldChange =
        serde_json::from_str(r#"{"field":"method","value":null}"#).expect("deserialize");
    assert_eq!(change, FieldChange::Method(None));
}

#[test]
fn state_serialization_recomputes_validity() {
    let state = parse("solar(16.1, before_visible_sunrise)").expect("parse");
    let mut json = serde_json::to_value(&state).expect("serialize");
    assert_eq!(json["method"], "solar");
    assert_eq!(json["solarDirection"], "before_visible_sunrise");
    assert_eq!(json["isValid"], true);

    json["solarDegrees"] = serde_json::json!(200.0);
    let restored: FormulaBuilderState = serde_json::from_value(json).expect("deserialize");
    assert!(!restored.is_valid());
    assert_eq!(restored.validation_errors().len(), 1);
}

#[test]
fn formula_projection_round_trips_through_state() {
    let formula = Formula::Proportional {
        hours: 3.0,
        base: ProportionalBase::Custom {
            start: Some("alos_hashachar".to_string()),
            end: Some("tzeis_hakochavim".to_string()),
        },
    };
    let state = FormulaBuilderState::from_formula(formula.clone());
    assert_eq!(state.formula(), formula);
    assert_eq!(parse_formula(&formula.to_string()), Ok(formula));
}

#[test]
fn grammar_tables_parse_their_own_tokens() {
    for dir in SolarDirection::ALL {
        assert_eq!(dir.as_str().parse::<SolarDirection>(), Ok(dir));
        assert!(ENGINE_DIRECTIONS.contains(&dir.as_str()));
    }
    for base in ShaosBase::ALL {
        assert_eq!(base.as_str().parse::<ShaosBase>(), Ok(base));
        assert!(ENGINE_BASES.contains(&base.as_str()));
        assert_eq!(base.day_bounds().is_none(), base == ShaosBase::Custom);
    }
    for point in ReferencePoint::ALL {
        assert_eq!(point.as_str().parse::<ReferencePoint>(), Ok(point));
        assert!(is_identifier(point.as_str()));
        assert!(!point.definition().is_empty());
    }
    let err = "mga_72".parse::<ShaosBase>().expect_err("not a builder base");
    assert_eq!(err.to_string(), "unknown base 'mga_72'");
}

#[test]
fn identifier_predicate() {
    assert!(is_identifier("visible_sunrise"));
    assert!(is_identifier("_x1"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("1x"));
    assert!(!is_identifier("@alos"));
    assert!(!is_identifier("visible sunrise"));
}

#[test]
fn lexer_keeps_spans_and_never_fails() {
    let tokens = tokenize("@alos + 1.5hr # ?");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Reference("alos".to_string()),
            TokenKind::Plus,
            TokenKind::Number("1.5".to_string()),
            TokenKind::Ident("hr".to_string()),
            TokenKind::Other('#'),
            TokenKind::Other('?'),
        ]
    );
    assert_eq!(tokens[2].span.column, 9);
    assert_eq!(tokens[3].span.start, tokens[2].span.end);
}

#[test]
fn classify_is_usable_directly() {
    let classification = classify("later_of(sunrise, sunset)");
    assert_eq!(classification.reason, ComplexityReason::UnknownFunction);
    assert!(classification.details.contains("later_of"));
    assert_eq!(classification.span.map(|s| s.column), Some(1));
}

#[test]
fn shapes_are_mutually_exclusive() {
    let samples = [
        ("solar(16.1, before_visible_sunrise)", Some(Shape::Solar)),
        ("proportional_hours(3, gra)", Some(Shape::Proportional)),
        ("sunset - 18min", Some(Shape::FixedOffset)),
        ("solar - 18min", Some(Shape::FixedOffset)),
        ("solar", Some(Shape::FixedZman)),
        ("@custom", Some(Shape::FixedZman)),
        ("sunset - 18min + 2min", None),
        ("midpoint(a, b)", None),
    ];
    for (formula, expected) in samples {
        let shapes = matching_shapes(formula);
        assert!(shapes.len() <= 1, "{formula}: {shapes:?}");
        assert_eq!(shapes.first().copied(), expected, "{formula}");
    }
}

#[test]
fn parse_is_safe_to_call_concurrently() {
    let formulas = [
        "solar(16.1, before_visible_sunrise)",
        "sunrise + 30min - 10min",
        "proportional_hours(9.5, custom(@a, @b))",
    ];
    let expected: Vec<_> = formulas.iter().map(|f| parse(f)).collect();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| formulas.iter().map(|f| parse(f)).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("worker panicked"), expected);
        }
    });
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_identifier() -> impl Strategy<Value = String> {
        "[a-z_][a-z0-9_]{0,20}".prop_filter("keywords are reserved", |s| is_identifier(s))
    }

    fn arb_direction() -> impl Strategy<Value = SolarDirection> {
        prop::sample::select(SolarDirection::ALL.to_vec())
    }

    fn arb_offset_direction() -> impl Strategy<Value = OffsetDirection> {
        prop_oneof![Just(OffsetDirection::Before), Just(OffsetDirection::After)]
    }

    fn arb_base() -> impl Strategy<Value = ProportionalBase> {
        prop_oneof![
            Just(ProportionalBase::Gra),
            Just(ProportionalBase::Mga),
            Just(ProportionalBase::Mga90),
            Just(ProportionalBase::BaalHatanya),
            (arb_identifier(), arb_identifier()).prop_map(|(start, end)| {
                ProportionalBase::Custom {
                    start: Some(start),
                    end: Some(end),
                }
            }),
        ]
    }

    /// Formulas built only from in-range grammar values.
    fn arb_formula() -> impl Strategy<Value = Formula> {
        prop_oneof![
            arb_identifier().prop_map(|name| Formula::BaseTime { name }),
            arb_identifier().prop_map(|name| Formula::FixedZman { name }),
            (0.0f64..=90.0, arb_direction())
                .prop_map(|(degrees, direction)| Formula::Solar { degrees, direction }),
            (arb_identifier(), arb_offset_direction(), any::<u32>()).prop_map(
                |(base, direction, minutes)| Formula::FixedOffset {
                    base,
                    direction,
                    minutes,
                }
            ),
            (0.5f64..=12.0, arb_base())
                .prop_map(|(hours, base)| Formula::Proportional { hours, base }),
        ]
    }

    proptest! {
        #[test]
        fn generated_formulas_round_trip(formula in arb_formula()) {
            let state = FormulaBuilderState::from_formula(formula);
            prop_assert!(state.is_valid(), "{:?}", state.validation_errors());
            let text = generate(&state);
            let parsed = parse(&text);
            prop_assert!(parsed.is_ok(), "{text}: {parsed:?}");
            let reparsed = parsed.expect("checked above");
            prop_assert_eq!(generate(&reparsed), text);
        }

        #[test]
        fn generated_formulas_match_exactly_one_shape(formula in arb_formula()) {
            let text = formula.to_string();
            prop_assert_eq!(matching_shapes(&text).len(), 1, "{}", text);
        }

        #[test]
        fn parsing_is_deterministic(text in "[a-z_@(), +\\-0-9.]{0,40}") {
            prop_assert_eq!(parse(&text), parse(&text));
        }

        #[test]
        fn conditionals_outrank_chained_operations(
            cond in arb_identifier(),
            a in arb_identifier(),
            b in arb_identifier(),
            m in 0u32..500,
            n in 0u32..500,
        ) {
            let text = format!("if({cond}, {a} + {m}min - {n}min, {b}) - 5min + 1min");
            let err = parse(&text).expect_err("conditional formula");
            prop_assert_eq!(err.reason, Some(ComplexityReason::Conditional));
        }
    }
}
