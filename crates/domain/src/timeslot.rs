// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The canonical time model: days of week and time-of-day intervals.
//!
//! ## Invariants
//!
//! - A slot's start is strictly before its end.
//! - Intervals are half-open: two slots that merely touch do not overlap.
//! - Comparisons are same-day only; cross-day adjacency is never a conflict.
//! - Durations are whole minutes.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Time;

/// A day of the week.
///
/// Declared Monday-first; the derived ordering is the canonical ordering
/// used for deterministic scheduling output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum WeekDay {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl WeekDay {
    /// All days, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Converts this day to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl FromStr for WeekDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monday" => Ok(Self::Monday),
            "Tuesday" => Ok(Self::Tuesday),
            "Wednesday" => Ok(Self::Wednesday),
            "Thursday" => Ok(Self::Thursday),
            "Friday" => Ok(Self::Friday),
            "Saturday" => Ok(Self::Saturday),
            "Sunday" => Ok(Self::Sunday),
            _ => Err(DomainError::InvalidWeekDay(s.to_string())),
        }
    }
}

impl std::fmt::Display for WeekDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A weekly time slot: a day of week and a half-open time-of-day interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// The day of the week.
    day: WeekDay,
    /// Start of the interval (inclusive).
    start: Time,
    /// End of the interval (exclusive).
    end: Time,
}

impl TimeSlot {
    /// Creates a new `TimeSlot`.
    ///
    /// # Arguments
    ///
    /// * `day` - The day of the week
    /// * `start` - Start of the interval (inclusive)
    /// * `end` - End of the interval (exclusive)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeRange` if `start >= end`.
    pub fn new(day: WeekDay, start: Time, end: Time) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidTimeRange { day, start, end });
        }
        Ok(Self { day, start, end })
    }

    /// Returns the day of the week.
    #[must_use]
    pub const fn day(&self) -> WeekDay {
        self.day
    }

    /// Returns the start time.
    #[must_use]
    pub const fn start(&self) -> Time {
        self.start
    }

    /// Returns the end time.
    #[must_use]
    pub const fn end(&self) -> Time {
        self.end
    }

    /// Returns the slot duration in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        u32::try_from((self.end - self.start).whole_minutes()).unwrap_or(0)
    }

    /// Checks whether two slots overlap.
    ///
    /// Two slots overlap iff they share a day and their half-open intervals
    /// intersect. Touching endpoints (`a.end == b.start`) do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }

    /// Checks whether `inner` lies fully within this slot.
    ///
    /// Used for availability-window containment: a slot equal to its window
    /// is contained; a slot extending past either edge is not.
    #[must_use]
    pub fn contains(&self, inner: &Self) -> bool {
        self.day == inner.day && self.start <= inner.start && inner.end <= self.end
    }

    /// Returns the canonical sort key: day, start, end.
    #[must_use]
    pub const fn ordering_key(&self) -> (WeekDay, Time, Time) {
        (self.day, self.start, self.end)
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}-{:02}:{:02}",
            self.day,
            self.start.hour(),
            self.start.minute(),
            self.end.hour(),
            self.end.minute()
        )
    }
}

/// Sums the duration of a set of slots, in whole minutes.
#[must_use]
pub fn total_minutes(slots: &[TimeSlot]) -> u32 {
    slots
        .iter()
        .fold(0_u32, |acc, slot| acc.saturating_add(slot.duration_minutes()))
}

/// Sums the duration of a set of slots, in hours to one-minute precision.
#[must_use]
pub fn total_hours(slots: &[TimeSlot]) -> f64 {
    f64::from(total_minutes(slots)) / 60.0
}

/// Finds the first pair of slots in the set that overlap each other.
///
/// Returns the indices of the offending pair, or `None` if the set is
/// self-consistent.
#[must_use]
pub fn find_self_overlap(slots: &[TimeSlot]) -> Option<(usize, usize)> {
    for (i, a) in slots.iter().enumerate() {
        for (j, b) in slots.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                return Some((i, j));
            }
        }
    }
    None
}
