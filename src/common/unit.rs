//! Unit conversion utilities.
//!
//! HWP measures geometry in HWPUNIT, 1/7200 of an inch, so one point is
//! exactly 100 units. Character sizes use the same scale.

pub const HWPUNITS_PER_INCH: i64 = 7_200;
pub const HWPUNITS_PER_PT: i64 = 100;
pub const MM_PER_INCH: f64 = 25.4;

#[inline]
pub fn hwpunit_to_pt(units: i32) -> f32 {
    units as f32 / HWPUNITS_PER_PT as f32
}

#[inline]
pub fn hwpunit_to_inch(units: i64) -> f64 {
    units as f64 / HWPUNITS_PER_INCH as f64
}

#[inline]
pub fn hwpunit_to_mm(units: i64) -> f64 {
    hwpunit_to_inch(units) * MM_PER_INCH
}
