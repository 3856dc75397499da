//! GeoTable Core Types
//!
//! This crate provides the foundational types shared by the GeoTable
//! parser, report engines and renderers. It includes:
//!
//! - **Alignment**: Horizontal elements and projects ([`alignment`] module)
//! - **Profile**: Vertical elements ([`profile`] module)
//! - **Geometry**: Points and the provider seam ([`geometry`] module)
//! - **Format**: Station, bearing and angle text ([`format`] module)
//! - **Report**: Rows and headers consumed by renderers ([`report`] module)

pub mod alignment;
pub mod format;
pub mod geometry;
pub mod profile;
pub mod report;
