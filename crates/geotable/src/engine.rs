//! Per-element report engines.
//!
//! An engine turns one element into one [`ReportRow`]. Engines never fail:
//! an element that cannot be evaluated comes back as a failed row carrying
//! the reason, so a single bad element never aborts a report.
//!
//! - [`HorizontalEngine`] - lines, arcs and spirals, located through a
//!   [`GeometryProvider`](geotable_core::geometry::GeometryProvider).
//! - [`VerticalEngine`] - grade tangents and parabolic vertical curves.
//!
//! Point labels that depend on neighbouring elements are decided by the
//! model builder and handed in; see [`crate::model`].
//!
//! [`ReportRow`]: geotable_core::report::ReportRow

mod horizontal;
mod vertical;

pub use horizontal::{ArcGeometry, HorizontalEngine, LineLabels};
pub use vertical::{VerticalCurve, VerticalEngine};

use geotable_core::{
    geometry::LocateError,
    report::{ReportRow, RowKind},
};
use log::warn;
use thiserror::Error;

/// Why an element could not be turned into a complete row.
#[derive(Debug, Error)]
pub(crate) enum ElementError {
    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error("{0}")]
    Invalid(String),
}

/// Checks that an element spans a real, forward station range.
fn check_stations(start: f64, end: f64) -> Result<(), ElementError> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ElementError::Invalid(
            "station is not a finite number".to_string(),
        ));
    }
    if end <= start {
        return Err(ElementError::Invalid(format!(
            "end station {end} does not exceed start station {start}"
        )));
    }
    Ok(())
}

/// Converts an element failure into the explanatory row that replaces it.
fn failed_row(kind: RowKind, what: &str, err: ElementError) -> ReportRow {
    warn!(element = what, error:% = err; "Element reported as failed row");
    ReportRow::failed(kind, format!("Error writing {what} data: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_stations() {
        assert!(check_stations(0.0, 10.0).is_ok());
        assert!(check_stations(10.0, 10.0).is_err());
        assert!(check_stations(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_failed_row_message() {
        let row = failed_row(RowKind::Arc, "arc", ElementError::from(LocateError::Empty));

        assert_eq!(row.kind(), &RowKind::Arc);
        assert_eq!(
            row.message(),
            Some("Error writing arc data: alignment has no elements to evaluate")
        );
    }
}
