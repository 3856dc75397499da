//! Error codes for document diagnostics.
//!
//! Codes are grouped by phase:
//! - `E0xx` - Document syntax
//! - `E1xx` - Schema (fields and element types)
//! - `E2xx` - Geometry validation

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// Malformed document.
    ///
    /// The source is not valid TOML, or a value has the wrong type.
    E001,

    // =========================================================================
    // Schema Errors (E1xx)
    // =========================================================================
    /// Missing required field.
    E100,

    /// Invalid field value, such as an unknown turn direction.
    E101,

    /// Unknown element type; the element is kept as unsupported.
    E102,

    /// Nested compound element.
    ///
    /// A spiral-curve-spiral part is itself a compound or the wrong kind.
    E103,

    // =========================================================================
    // Geometry Errors (E2xx)
    // =========================================================================
    /// End station does not exceed start station.
    E200,

    /// Non-positive radius.
    E201,

    /// Non-positive length.
    E202,

    /// Redundant value disagrees with the values it derives from.
    E203,

    /// Spiral with neither radius at the tangent end.
    E204,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed document",
            ErrorCode::E100 => "missing field",
            ErrorCode::E101 => "invalid field value",
            ErrorCode::E102 => "unsupported element type",
            ErrorCode::E103 => "invalid compound element",
            ErrorCode::E200 => "inverted station range",
            ErrorCode::E201 => "non-positive radius",
            ErrorCode::E202 => "non-positive length",
            ErrorCode::E203 => "inconsistent redundant value",
            ErrorCode::E204 => "spiral without tangent end",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
