//! Unit tests for document loading and elaboration.

use float_cmp::assert_approx_eq;
use geotable_core::{
    alignment::{AlignmentElement, TurnDirection},
    profile::ProfileElement,
};

use crate::{ParseError, error::ErrorCode, parse, parse_with_warnings};

/// Helper to parse a source string and assert success
fn parse_ok(source: &str) -> geotable_core::alignment::Project {
    match parse(source) {
        Ok(project) => project,
        Err(err) => panic!("Expected parsing to succeed, but got error: {err}"),
    }
}

/// Helper to parse a source string and assert failure
fn parse_err(source: &str) -> ParseError {
    match parse(source) {
        Ok(_) => panic!("Expected parsing to fail, but it succeeded"),
        Err(err) => err,
    }
}

fn codes(err: &ParseError) -> Vec<ErrorCode> {
    err.diagnostics().iter().filter_map(|d| d.code()).collect()
}

const HEADER: &str = r#"
project = "Demo"
description = "Test corridor"

[alignment]
name = "Mainline"
style = "Rail"
start_station = 1000.0
northing = 5000.0
easting = 2000.0
azimuth = 90.0
"#;

fn with_header(body: &str) -> String {
    format!("{HEADER}\n{body}")
}

#[test]
fn test_minimal_document() {
    let project = parse_ok(
        r#"
        project = "Demo"
        [alignment]
        name = "CL"
        "#,
    );

    assert_eq!(project.name(), "Demo");
    assert_eq!(project.alignment().name(), "CL");
    assert!(project.alignment().elements().is_empty());
}

#[test]
fn test_line_derives_stations_and_direction() {
    let project = parse_ok(&with_header(
        r#"
        [[alignment.elements]]
        type = "line"
        length = 250.0
        "#,
    ));

    let AlignmentElement::Line(line) = &project.alignment().elements()[0] else {
        panic!("expected a line");
    };
    assert_approx_eq!(f64, line.start_station, 1000.0);
    assert_approx_eq!(f64, line.end_station, 1250.0);
    assert_approx_eq!(f64, line.direction, 90f64.to_radians());
}

#[test]
fn test_chain_continues_from_previous_element() {
    let project = parse_ok(&with_header(
        r#"
        [[alignment.elements]]
        type = "line"
        length = 100.0

        [[alignment.elements]]
        type = "arc"
        radius = 500.0
        length = 200.0
        turn = "left"

        [[alignment.elements]]
        type = "line"
        length = 50.0
        "#,
    ));

    let elements = project.alignment().elements();
    assert_eq!(elements.len(), 3);

    let AlignmentElement::Arc(arc) = &elements[1] else {
        panic!("expected an arc");
    };
    assert_approx_eq!(f64, arc.start_station, 1100.0);
    assert_approx_eq!(f64, arc.delta, 0.4);
    assert!(!arc.clockwise);

    // The following line inherits the heading the arc ended on
    let AlignmentElement::Line(line) = &elements[2] else {
        panic!("expected a line");
    };
    assert_approx_eq!(f64, line.start_station, 1300.0);
    assert_approx_eq!(f64, line.direction, 90f64.to_radians() - 0.4, epsilon = 1e-12);
}

#[test]
fn test_arc_length_from_delta() {
    let project = parse_ok(&with_header(
        r#"
        [[alignment.elements]]
        type = "arc"
        radius = 1000.0
        delta = 10.0
        clockwise = true
        "#,
    ));

    let AlignmentElement::Arc(arc) = &project.alignment().elements()[0] else {
        panic!("expected an arc");
    };
    assert_approx_eq!(f64, arc.length, 1000.0 * 10f64.to_radians(), epsilon = 1e-9);
    assert_eq!(arc.turn_direction(), TurnDirection::Right);
}

#[test]
fn test_scs_group() {
    let project = parse_ok(&with_header(
        r#"
        [[alignment.elements]]
        type = "scs"

        [alignment.elements.spiral_in]
        length = 60.0
        radius_out = 400.0
        turn = "right"

        [alignment.elements.arc]
        radius = 400.0
        length = 120.0
        turn = "right"

        [alignment.elements.spiral_out]
        length = 60.0
        radius_in = 400.0
        turn = "right"
        "#,
    ));

    let AlignmentElement::SpiralCurveSpiral(group) = &project.alignment().elements()[0] else {
        panic!("expected a spiral-curve-spiral group");
    };
    assert_eq!(group.parts().len(), 3);
    assert_approx_eq!(f64, project.alignment().elements()[0].end_station(), 1240.0);
}

#[test]
fn test_unknown_type_is_kept_as_unsupported() {
    let (project, warnings) = parse_with_warnings(&with_header(
        r#"
        [[alignment.elements]]
        type = "Multi"
        length = 40.0
        "#,
    ))
    .unwrap();

    let AlignmentElement::Unsupported(other) = &project.alignment().elements()[0] else {
        panic!("expected an unsupported element");
    };
    assert_eq!(other.type_name, "Multi");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code(), Some(ErrorCode::E102));
}

#[test]
fn test_profile_elements() {
    let project = parse_ok(&with_header(
        r#"
        [[profiles]]
        name = "Existing Ground"

        [[profiles]]
        name = "Layout"
        description = "Design grade"

        [[profiles.elements]]
        type = "tangent"
        start_station = 1000.0
        start_elevation = 100.0
        length = 200.0
        grade = 2.0

        [[profiles.elements]]
        type = "parabola"
        pvi_station = 1300.0
        pvi_elevation = 106.0
        length = 200.0
        grade_in = 2.0
        grade_out = -1.0
        "#,
    ));

    let profile = project.alignment().first_layout_profile().unwrap();
    assert_eq!(profile.name(), "Layout");

    let ProfileElement::Tangent(tangent) = &profile.elements()[0] else {
        panic!("expected a tangent");
    };
    assert_approx_eq!(f64, tangent.end_elevation, 104.0);
    assert_approx_eq!(f64, tangent.grade, 0.02);

    let ProfileElement::Parabola(parabola) = &profile.elements()[1] else {
        panic!("expected a parabola");
    };
    assert_approx_eq!(f64, parabola.start_station, 1200.0);
    assert_approx_eq!(f64, parabola.grade_out, -0.01);
}

#[test]
fn test_syntax_error_has_span() {
    let err = parse_err("project = \n[alignment");

    assert_eq!(codes(&err), [ErrorCode::E001]);
    assert!(!err.diagnostics()[0].labels().is_empty());
}

#[test]
fn test_missing_required_field() {
    let err = parse_err(&with_header(
        r#"
        [[alignment.elements]]
        type = "arc"
        length = 100.0
        turn = "left"
        "#,
    ));

    assert_eq!(codes(&err), [ErrorCode::E100]);
    assert!(err.to_string().contains("radius"));
}

#[test]
fn test_geometry_errors_are_all_reported() {
    let err = parse_err(&with_header(
        r#"
        [[alignment.elements]]
        type = "arc"
        radius = -600.0
        length = 100.0
        turn = "right"

        [[alignment.elements]]
        type = "line"
        length = 0.0

        [[alignment.elements]]
        type = "line"
        start_station = 1000.0
        end_station = 900.0
        "#,
    ));

    let codes = codes(&err);
    assert!(codes.contains(&ErrorCode::E201));
    assert!(codes.contains(&ErrorCode::E202));
    assert!(codes.contains(&ErrorCode::E200));
}

#[test]
fn test_inconsistent_grade_warns() {
    let (_, warnings) = parse_with_warnings(&with_header(
        r#"
        [[profiles]]
        name = "Layout"

        [[profiles.elements]]
        type = "tangent"
        start_station = 1000.0
        end_station = 1100.0
        start_elevation = 100.0
        end_elevation = 101.0
        grade = 5.0
        "#,
    ))
    .unwrap();

    let inconsistent: Vec<_> = warnings
        .iter()
        .filter(|w| w.code() == Some(ErrorCode::E203))
        .collect();
    assert_eq!(inconsistent.len(), 1);
    assert!(inconsistent[0].message().contains("grade"));
}

#[test]
fn test_spiral_without_tangent_end_warns() {
    let (_, warnings) = parse_with_warnings(&with_header(
        r#"
        [[alignment.elements]]
        type = "spiral"
        length = 50.0
        radius_in = 800.0
        radius_out = 400.0
        turn = "left"
        "#,
    ))
    .unwrap();

    assert_eq!(warnings[0].code(), Some(ErrorCode::E204));
}

#[test]
fn test_scs_part_of_wrong_kind() {
    let err = parse_err(&with_header(
        r#"
        [[alignment.elements]]
        type = "scs"

        [alignment.elements.arc]
        type = "line"
        length = 10.0
        "#,
    ));

    assert_eq!(codes(&err), [ErrorCode::E103]);
}

#[test]
fn test_unknown_top_level_field_rejected() {
    let err = parse_err(&with_header("surprise = true"));
    assert_eq!(codes(&err), [ErrorCode::E001]);
}

mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn prop_line_chain_is_contiguous(lengths in prop::collection::vec(0.5f64..500.0, 1..8)) {
            let body: String = lengths
                .iter()
                .map(|length| format!("[[alignment.elements]]\ntype = \"line\"\nlength = {length:?}\n"))
                .collect();
            let project = parse_ok(&with_header(&body));
            let elements = project.alignment().elements();

            prop_assert_eq!(elements.len(), lengths.len());
            for pair in elements.windows(2) {
                prop_assert!((pair[0].end_station() - pair[1].start_station()).abs() < 1e-9);
            }
        }
    }
}
