// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ids::{ClassroomId, DepartmentId, EntryId, FacultyId, SubjectId};
use crate::timeslot::{TimeSlot, WeekDay};
use crate::types::{EntryStatus, Term};
use time::Time;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A time slot's start is not strictly before its end.
    InvalidTimeRange {
        /// The day of the malformed slot.
        day: WeekDay,
        /// The start time.
        start: Time,
        /// The end time.
        end: Time,
    },
    /// A day-of-week string could not be parsed.
    InvalidWeekDay(String),
    /// A semester string could not be parsed.
    InvalidSemester(String),
    /// An entry status string could not be parsed.
    InvalidEntryStatus(String),
    /// An academic year is outside the supported range.
    InvalidAcademicYear(String),
    /// Two time slots on the same entry overlap each other.
    SelfOverlappingSlots {
        /// The first of the overlapping pair.
        first: TimeSlot,
        /// The second of the overlapping pair.
        second: TimeSlot,
    },
    /// A schedule entry has no time slots.
    EmptyTimeSlots {
        /// The entry missing slots.
        entry: EntryId,
    },
    /// An entry's combined slot time does not cover the subject's hours.
    InsufficientScheduledTime {
        /// The subject being scheduled.
        subject: SubjectId,
        /// Minutes covered by the entry's slots.
        scheduled_minutes: u32,
        /// Minutes the subject requires per week.
        required_minutes: u32,
    },
    /// Faculty load bounds are outside convention or inverted.
    InvalidLoadBounds {
        /// The faculty member with invalid bounds.
        faculty: FacultyId,
        /// The minimum weekly load.
        min_load: u8,
        /// The maximum weekly load.
        max_load: u8,
    },
    /// Faculty preparation limit must be positive.
    InvalidPreparationLimit {
        /// The faculty member with the invalid limit.
        faculty: FacultyId,
    },
    /// Classroom capacity must be positive.
    InvalidCapacity {
        /// The classroom with the invalid capacity.
        classroom: ClassroomId,
        /// The rejected capacity.
        capacity: u32,
    },
    /// Subject unit counts are invalid.
    InvalidUnits {
        /// The subject with invalid units.
        subject: SubjectId,
        /// Why the units were rejected.
        reason: &'static str,
    },
    /// A lifecycle transition is not permitted.
    InvalidLifecycleTransition {
        /// The current status.
        from: EntryStatus,
        /// The requested status.
        to: EntryStatus,
    },
    /// Archived entries cannot be modified.
    ArchivedEntryImmutable {
        /// The archived entry.
        entry: EntryId,
    },
    /// An entry's term does not match the term being operated on.
    TermMismatch {
        /// The term of the operation.
        expected: Term,
        /// The term carried by the entry.
        actual: Term,
    },
    /// A schedule entry with this identifier already exists.
    DuplicateEntry {
        /// The duplicate entry identifier.
        entry: EntryId,
    },
    /// A referenced department does not exist.
    UnknownDepartment {
        /// The missing department.
        department: DepartmentId,
    },
    /// A referenced faculty member does not exist.
    UnknownFaculty {
        /// The missing faculty member.
        faculty: FacultyId,
    },
    /// A referenced classroom does not exist.
    UnknownClassroom {
        /// The missing classroom.
        classroom: ClassroomId,
    },
    /// A referenced subject does not exist.
    UnknownSubject {
        /// The missing subject.
        subject: SubjectId,
    },
    /// A referenced schedule entry does not exist.
    UnknownEntry {
        /// The missing entry.
        entry: EntryId,
    },
}

impl DomainError {
    /// Returns whether this error is a broken reference to missing data.
    ///
    /// Reference errors abort the specific request that carried them; they
    /// are never recoverable by relaxing constraints.
    #[must_use]
    pub const fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownDepartment { .. }
                | Self::UnknownFaculty { .. }
                | Self::UnknownClassroom { .. }
                | Self::UnknownSubject { .. }
                | Self::UnknownEntry { .. }
        )
    }
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeRange { day, start, end } => {
                write!(
                    f,
                    "Invalid time range on {day}: start {start} must be before end {end}"
                )
            }
            Self::InvalidWeekDay(value) => write!(f, "Invalid day of week: {value}"),
            Self::InvalidSemester(value) => write!(f, "Invalid semester: {value}"),
            Self::InvalidEntryStatus(value) => write!(f, "Invalid entry status: {value}"),
            Self::InvalidAcademicYear(msg) => write!(f, "Invalid academic year: {msg}"),
            Self::SelfOverlappingSlots { first, second } => {
                write!(f, "Time slots overlap each other: {first} and {second}")
            }
            Self::EmptyTimeSlots { entry } => {
                write!(f, "Schedule entry '{entry}' has no time slots")
            }
            Self::InsufficientScheduledTime {
                subject,
                scheduled_minutes,
                required_minutes,
            } => {
                write!(
                    f,
                    "Subject '{subject}' requires {required_minutes} minutes per week but only {scheduled_minutes} are scheduled"
                )
            }
            Self::InvalidLoadBounds {
                faculty,
                min_load,
                max_load,
            } => {
                write!(
                    f,
                    "Faculty '{faculty}' has invalid load bounds: min {min_load}, max {max_load} (must satisfy 18 <= min <= max <= 26)"
                )
            }
            Self::InvalidPreparationLimit { faculty } => {
                write!(
                    f,
                    "Faculty '{faculty}' must allow at least one preparation"
                )
            }
            Self::InvalidCapacity {
                classroom,
                capacity,
            } => {
                write!(
                    f,
                    "Classroom '{classroom}' has invalid capacity {capacity}. Must be greater than 0"
                )
            }
            Self::InvalidUnits { subject, reason } => {
                write!(f, "Subject '{subject}' has invalid units: {reason}")
            }
            Self::InvalidLifecycleTransition { from, to } => {
                write!(f, "Cannot transition schedule entry from {from} to {to}")
            }
            Self::ArchivedEntryImmutable { entry } => {
                write!(f, "Schedule entry '{entry}' is archived and cannot be modified")
            }
            Self::TermMismatch { expected, actual } => {
                write!(
                    f,
                    "Entry belongs to {actual} but the operation is scoped to {expected}"
                )
            }
            Self::DuplicateEntry { entry } => {
                write!(f, "Schedule entry '{entry}' already exists")
            }
            Self::UnknownDepartment { department } => {
                write!(f, "Department '{department}' does not exist")
            }
            Self::UnknownFaculty { faculty } => {
                write!(f, "Faculty '{faculty}' does not exist")
            }
            Self::UnknownClassroom { classroom } => {
                write!(f, "Classroom '{classroom}' does not exist")
            }
            Self::UnknownSubject { subject } => {
                write!(f, "Subject '{subject}' does not exist")
            }
            Self::UnknownEntry { entry } => {
                write!(f, "Schedule entry '{entry}' does not exist")
            }
        }
    }
}

impl std::error::Error for DomainError {}
