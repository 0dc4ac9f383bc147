// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Teaching-load calculation.
//!
//! Converts subject unit counts into required weekly teaching time using
//! fixed institutional ratios. The ratios are constants, not configuration:
//!
//! - one lecture unit is one teaching hour (60 minutes)
//! - one lab unit is 1/0.75 teaching hours (80 minutes)
//!
//! All derivation goes through whole minutes so fractional unit counts
//! produce exact results to one-minute precision (2.25 lab units is
//! exactly 3.0 hours; 1.5 lab units is exactly 2.0 hours).

/// Minutes of teaching time per lecture unit.
pub const LECTURE_MINUTES_PER_UNIT: u32 = 60;

/// Minutes of teaching time per lab unit (one unit / 0.75 hours).
pub const LAB_MINUTES_PER_UNIT: u32 = 80;

/// Converts lecture units to weekly teaching minutes.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lecture_minutes(units: f64) -> u32 {
    (units * f64::from(LECTURE_MINUTES_PER_UNIT)).round() as u32
}

/// Converts lab units to weekly teaching minutes.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lab_minutes(units: f64) -> u32 {
    (units * f64::from(LAB_MINUTES_PER_UNIT)).round() as u32
}

/// Converts lecture units to weekly teaching hours (`units * 1`).
#[must_use]
pub fn lecture_hours(units: f64) -> f64 {
    f64::from(lecture_minutes(units)) / 60.0
}

/// Converts lab units to weekly teaching hours (`units / 0.75`).
#[must_use]
pub fn lab_hours(units: f64) -> f64 {
    f64::from(lab_minutes(units)) / 60.0
}

/// Total weekly teaching minutes for a subject's unit counts.
#[must_use]
pub fn total_minutes(lecture_units: f64, lab_units: f64) -> u32 {
    lecture_minutes(lecture_units).saturating_add(lab_minutes(lab_units))
}

/// Total weekly teaching hours for a subject's unit counts.
#[must_use]
pub fn total_hours(lecture_units: f64, lab_units: f64) -> f64 {
    f64::from(total_minutes(lecture_units, lab_units)) / 60.0
}

/// Converts lab hours back to lab units (`hours * 0.75`).
///
/// Used only for display and edit round-trips; hours are always derived
/// from units, never stored independently.
#[must_use]
pub fn lab_units_from_hours(hours: f64) -> f64 {
    hours * 0.75
}
