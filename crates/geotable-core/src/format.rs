//! Station, bearing, and angle formatters shared by every report encoding.
//!
//! All functions are pure. Rounding is half away from zero, which is the
//! convention used on survey plans (`0.125` becomes `0.13`, `-0.125`
//! becomes `-0.13`).
//!
//! # Example
//!
//! ```
//! # use geotable_core::format::{format_bearing, format_station};
//! assert_eq!(format_station(250.0), "2+50.00");
//! assert_eq!(format_bearing(0.0), "N 0^00'00.0000\" E");
//! ```

/// Rounds `value` to `decimals` places, halves away from zero.
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Formats `value` with a fixed number of decimals.
///
/// Values within `5·10^-(decimals+1)` of a whole number snap to it first, so
/// `24999.99999` prints as `25000.0000` rather than `24999.9999` when
/// formatting to four places. Otherwise the value is rounded half away from
/// zero. Negative zero prints without a sign.
pub fn format_rounded(value: f64, decimals: usize) -> String {
    let tolerance = 5.0 / 10f64.powi(decimals as i32 + 1);
    let nearest = value.round();

    let rounded = if (value - nearest).abs() < tolerance {
        nearest
    } else {
        round_half_away(value, decimals as u32)
    };
    // Collapse -0.0 so it never prints as "-0.00"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };

    format!("{rounded:.decimals$}")
}

/// Formats a station as `hundreds+offset`.
///
/// The hundreds part is `floor(value / 100)` and the offset is padded to two
/// integer digits with two decimals (`10+00.00`). The offset is rounded after the split, so `99.995` yields
/// `0+100.00`. Negative stations are not corrected: the sign lands in the
/// hundreds part (`-50.0` yields `-1+50.00`).
pub fn format_station(value: f64) -> String {
    let hundreds = (value / 100.0).floor();
    let offset = round_half_away(value - hundreds * 100.0, 2);
    let offset = if offset == 0.0 { 0.0 } else { offset };

    format!("{}+{:05.2}", hundreds as i64, offset)
}

/// Formats decimal degrees as `D^MM'SS.ssss"`.
///
/// Degrees and minutes are truncated, never rounded, and the seconds are
/// formatted to four decimals without carrying into the minutes. A value a
/// hair below a whole minute therefore prints as `60.0000` seconds.
/// Negative angles carry a leading `-`.
pub fn format_angle_dms(degrees: f64) -> String {
    let sign = if degrees < 0.0 { "-" } else { "" };
    let degrees = degrees.abs();

    let whole = degrees.trunc();
    let minutes_full = (degrees - whole) * 60.0;
    let minutes = minutes_full.trunc();
    let seconds = (minutes_full - minutes) * 60.0;

    format!("{sign}{}^{:02}'{:07.4}\"", whole as i64, minutes as i64, seconds)
}

/// Quadrant letters and the acute angle (degrees) for an azimuth.
///
/// The azimuth is in radians, clockwise from north. It is normalised into
/// `[0, 360)` degrees and mapped to:
///
/// - `[0, 90)` → `N a E`
/// - `[90, 180]` → `S 180-a E`
/// - `(180, 270)` → `S a-180 W`
/// - `[270, 360)` → `N 360-a W`
///
/// Due south belongs to the south-east quadrant.
pub fn bearing_quadrant(direction: f64) -> (&'static str, &'static str, f64) {
    let mut degrees = direction.to_degrees().rem_euclid(360.0);
    if degrees >= 360.0 {
        degrees -= 360.0;
    }

    if degrees < 90.0 {
        ("N", "E", degrees)
    } else if degrees <= 180.0 {
        ("S", "E", 180.0 - degrees)
    } else if degrees < 270.0 {
        ("S", "W", degrees - 180.0)
    } else {
        ("N", "W", 360.0 - degrees)
    }
}

/// Formats an azimuth (radians, clockwise from north) as a quadrant bearing.
pub fn format_bearing(direction: f64) -> String {
    let (north_south, east_west, angle) = bearing_quadrant(direction);
    format!("{north_south} {} {east_west}", format_angle_dms(angle))
}
