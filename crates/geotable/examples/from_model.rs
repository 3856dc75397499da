//! Example: Building a report from the alignment model
//!
//! This example demonstrates how to assemble an alignment programmatically,
//! without an interchange document, and print both of its reports.

use std::f64::consts::FRAC_PI_2;

use geotable::{
    Format, ReportBuilder,
    alignment::{Alignment, AlignmentElement, Arc, Line, Project},
    geometry::Point3D,
    profile::{Parabola, Profile, ProfileElement, Tangent},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building alignment from the model...\n");

    // 300 ft due east, a 45 degree right turn on a 500 ft radius, then 200 ft
    let delta = 45f64.to_radians();
    let arc_length = 500.0 * delta;
    let elements = vec![
        AlignmentElement::Line(Line {
            start_station: 0.0,
            end_station: 300.0,
            length: 300.0,
            direction: FRAC_PI_2,
        }),
        AlignmentElement::Arc(Arc {
            start_station: 300.0,
            end_station: 300.0 + arc_length,
            length: arc_length,
            radius: 500.0,
            delta,
            clockwise: true,
            center_point: None,
        }),
        AlignmentElement::Line(Line {
            start_station: 300.0 + arc_length,
            end_station: 500.0 + arc_length,
            length: 200.0,
            direction: FRAC_PI_2 + delta,
        }),
    ];

    let profile = Profile::new("Design").with_elements(vec![
        ProfileElement::Tangent(Tangent::between(0.0, 120.0, 150.0, 123.0)),
        ProfileElement::Parabola(Parabola::symmetric(250.0, 125.0, 200.0, 0.02, -0.015)),
    ]);

    let alignment = Alignment::new("Ramp A")
        .with_description("Example ramp")
        .with_start(0.0, Point3D::new(10_000.0, 20_000.0, 120.0), FRAC_PI_2)
        .with_elements(elements)
        .with_profiles(vec![profile]);
    let project = Project::new("Model Example", alignment);

    let builder = ReportBuilder::default();

    let horizontal = builder.horizontal_report(&project)?;
    println!("{}", String::from_utf8(builder.render(&horizontal, Format::Text)?)?);

    let vertical = builder.vertical_report(&project)?;
    println!("{}", String::from_utf8(builder.render(&vertical, Format::Text)?)?);

    Ok(())
}
