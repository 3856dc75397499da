//! Cross-format consistency tests.
//!
//! The three encodings read the same rows; the numbers recoverable from the
//! XML must match the rounded numbers printed in the text and document
//! encodings.

use geotable::{
    Format, ReportBuilder,
    config::{AppConfig, DocumentBackendKind, DocumentConfig, ReportConfig},
    format::format_rounded,
    report::Report,
};

const MAINLINE: &str = include_str!("../../../demos/mainline.toml");
const COUNTY_ROAD: &str = include_str!("../../../demos/county_road.toml");

fn builder() -> ReportBuilder {
    let document = DocumentConfig::default().with_backend(DocumentBackendKind::PagedText);
    ReportBuilder::new(AppConfig::new(ReportConfig::default(), document))
}

fn render(builder: &ReportBuilder, report: &Report, format: Format) -> String {
    let bytes = builder.render(report, format).expect("Failed to render");
    String::from_utf8(bytes).expect("Output should be UTF-8")
}

/// Text content of every `<tag>` element, in document order.
fn xml_values(xml: &str, tag: &str) -> Vec<f64> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    xml.split(&open)
        .skip(1)
        .map(|rest| {
            let end = rest.find(&close).expect("Element should be closed");
            rest[..end].parse().expect("Element should hold a number")
        })
        .collect()
}

/// Value columns of every point line in the text encoding.
fn text_point_columns(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| line.contains("( )"))
        .map(|line| {
            let (_, values) = line.split_once("( )").expect("Point line has a marker");
            values.split_whitespace().map(str::to_string).collect()
        })
        .collect()
}

fn text_metric(text: &str, label: &str) -> Vec<String> {
    let prefix = format!(" {label}:");
    text.lines()
        .filter_map(|line| line.strip_prefix(&prefix))
        .map(|value| value.trim().to_string())
        .collect()
}

#[test]
fn test_horizontal_coordinates_agree() {
    for source in [MAINLINE, COUNTY_ROAD] {
        let builder = builder();
        let project = builder.parse(source).expect("Failed to parse");
        let report = builder.horizontal_report(&project).expect("Failed to build");

        let text = render(&builder, &report, Format::Text);
        let xml = render(&builder, &report, Format::Xml);

        let columns = text_point_columns(&text);
        let northings = xml_values(&xml, "Northing");
        let eastings = xml_values(&xml, "Easting");
        assert_eq!(columns.len(), northings.len());

        for ((cells, northing), easting) in columns.iter().zip(&northings).zip(&eastings) {
            let [.., text_northing, text_easting] = cells.as_slice() else {
                panic!("Point line should have coordinates: {cells:?}");
            };
            assert_eq!(text_northing, &format_rounded(*northing, 4));
            assert_eq!(text_easting, &format_rounded(*easting, 4));
        }
    }
}

#[test]
fn test_arc_metrics_agree() {
    let builder = builder();
    let project = builder.parse(COUNTY_ROAD).expect("Failed to parse");
    let report = builder.horizontal_report(&project).expect("Failed to build");

    let text = render(&builder, &report, Format::Text);
    let xml = render(&builder, &report, Format::Xml);

    for (label, tag) in [("Chord", "Chord"), ("External", "External"), ("Radius", "Radius")] {
        let printed = text_metric(&text, label);
        let raw = xml_values(&xml, tag);
        assert_eq!(printed.len(), 2, "two arcs should print {label}");
        assert_eq!(printed.len(), raw.len());
        for (printed, raw) in printed.iter().zip(&raw) {
            assert_eq!(printed, &format_rounded(*raw, 4));
        }
    }
}

#[test]
fn test_vertical_values_agree() {
    let builder = builder();
    let project = builder.parse(COUNTY_ROAD).expect("Failed to parse");
    let report = builder.vertical_report(&project).expect("Failed to build");

    let text = render(&builder, &report, Format::Text);
    let xml = render(&builder, &report, Format::Xml);

    let elevations: Vec<String> = text
        .lines()
        .filter(|line| {
            ["POB", "PVI", "PVC", "PVT"]
                .iter()
                .any(|label| line.starts_with(&format!(" {label} ")))
        })
        .filter_map(|line| line.split_whitespace().last().map(str::to_string))
        .collect();
    let raw = xml_values(&xml, "Elevation");
    assert_eq!(elevations.len(), raw.len());
    for (printed, raw) in elevations.iter().zip(&raw) {
        assert_eq!(printed, &format_rounded(*raw, 2));
    }

    let k_values = xml_values(&xml, "K");
    let printed_k = text_metric(&text, "K = l / ( g2 - g1 )");
    assert_eq!(printed_k.len(), k_values.len());
    for (printed, raw) in printed_k.iter().zip(&k_values) {
        assert_eq!(printed, &format_rounded(raw.abs(), 3));
    }
}

#[test]
fn test_crest_k_is_signed_only_in_xml() {
    let builder = builder();
    let project = builder.parse(MAINLINE).expect("Failed to parse");
    let report = builder.vertical_report(&project).expect("Failed to build");

    let text = render(&builder, &report, Format::Text);
    let xml = render(&builder, &report, Format::Xml);

    // +2% into -1% over the curve length gives a negative K
    let k_values = xml_values(&xml, "K");
    assert_eq!(k_values.len(), 1);
    assert!(k_values[0] < 0.0);
    assert_eq!(
        text_metric(&text, "K = l / ( g2 - g1 )"),
        [format_rounded(k_values[0].abs(), 3)]
    );
}

#[test]
fn test_document_prints_the_text_values() {
    let builder = builder();
    let project = builder.parse(MAINLINE).expect("Failed to parse");
    let report = builder.horizontal_report(&project).expect("Failed to build");

    let text = render(&builder, &report, Format::Text);
    let document = render(&builder, &report, Format::Document);

    for cells in text_point_columns(&text) {
        for cell in cells {
            assert!(document.contains(&cell), "document is missing {cell}");
        }
    }
    for value in text_metric(&text, "Tangent Length") {
        assert!(document.contains(&value));
    }
}

#[test]
fn test_xml_rendering_is_idempotent() {
    let builder = builder();
    let project = builder.parse(MAINLINE).expect("Failed to parse");

    for report in [
        builder.horizontal_report(&project).expect("Failed to build"),
        builder.vertical_report(&project).expect("Failed to build"),
    ] {
        let first = builder.render(&report, Format::Xml).expect("Failed to render");
        let second = builder.render(&report, Format::Xml).expect("Failed to render");
        assert_eq!(first, second);
    }
}
