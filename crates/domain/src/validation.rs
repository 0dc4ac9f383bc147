// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::timeslot;
use crate::types::{Classroom, Faculty, ScheduleEntry, Subject};

/// Validates that an academic year is a reasonable calendar year.
///
/// # Errors
///
/// Returns `DomainError::InvalidAcademicYear` if the starting year is not
/// between 1900 and 2200.
pub fn validate_academic_year(start_year: u16) -> Result<(), DomainError> {
    if !(1900..=2200).contains(&start_year) {
        return Err(DomainError::InvalidAcademicYear(format!(
            "Academic year must start between 1900 and 2200, got {start_year}"
        )));
    }
    Ok(())
}

/// Validates a faculty member's field constraints.
///
/// Checks the conventional weekly load bounds and the preparation limit.
/// It does NOT check anything requiring schedule context (current load and
/// preparations are derived by the engine).
///
/// # Errors
///
/// Returns an error if:
/// - The load bounds are outside 18..=26 or inverted
/// - The preparation limit is zero
pub fn validate_faculty(faculty: &Faculty) -> Result<(), DomainError> {
    // Rule: 18 <= min_load <= max_load <= 26
    let bounds_ok: bool = faculty.min_load >= Faculty::MIN_WEEKLY_LOAD
        && faculty.max_load <= Faculty::MAX_WEEKLY_LOAD
        && faculty.min_load <= faculty.max_load;
    if !bounds_ok {
        return Err(DomainError::InvalidLoadBounds {
            faculty: faculty.faculty_id.clone(),
            min_load: faculty.min_load,
            max_load: faculty.max_load,
        });
    }

    // Rule: at least one preparation must be allowed
    if faculty.max_preparations == 0 {
        return Err(DomainError::InvalidPreparationLimit {
            faculty: faculty.faculty_id.clone(),
        });
    }

    Ok(())
}

/// Validates a classroom's field constraints.
///
/// # Errors
///
/// Returns `DomainError::InvalidCapacity` if the capacity is zero.
pub fn validate_classroom(classroom: &Classroom) -> Result<(), DomainError> {
    if classroom.capacity == 0 {
        return Err(DomainError::InvalidCapacity {
            classroom: classroom.classroom_id.clone(),
            capacity: classroom.capacity,
        });
    }
    Ok(())
}

/// Validates a subject's unit counts.
///
/// # Errors
///
/// Returns an error if either unit count is negative or both are zero.
pub fn validate_subject(subject: &Subject) -> Result<(), DomainError> {
    if subject.lecture_units < 0.0 || subject.lab_units < 0.0 {
        return Err(DomainError::InvalidUnits {
            subject: subject.subject_id.clone(),
            reason: "unit counts cannot be negative",
        });
    }
    if subject.lecture_units <= 0.0 && subject.lab_units <= 0.0 {
        return Err(DomainError::InvalidUnits {
            subject: subject.subject_id.clone(),
            reason: "at least one of lecture units or lab units must be positive",
        });
    }
    Ok(())
}

/// Validates a schedule entry's own time slots.
///
/// The entry must carry at least one slot, and no two of its slots may
/// overlap each other.
///
/// # Errors
///
/// Returns an error if the slot set is empty or self-overlapping.
pub fn validate_entry_slots(entry: &ScheduleEntry) -> Result<(), DomainError> {
    if entry.time_slots.is_empty() {
        return Err(DomainError::EmptyTimeSlots {
            entry: entry.entry_id.clone(),
        });
    }

    if let Some((i, j)) = timeslot::find_self_overlap(&entry.time_slots) {
        return Err(DomainError::SelfOverlappingSlots {
            first: entry.time_slots[i],
            second: entry.time_slots[j],
        });
    }

    Ok(())
}

/// Validates that an entry's combined slot time covers the subject's
/// required weekly teaching time.
///
/// The engine always tiles exactly; manual entries must cover at least the
/// required minutes.
///
/// # Errors
///
/// Returns `DomainError::InsufficientScheduledTime` if the slots fall
/// short.
pub fn validate_entry_coverage(
    entry: &ScheduleEntry,
    subject: &Subject,
) -> Result<(), DomainError> {
    let scheduled_minutes: u32 = entry.scheduled_minutes();
    let required_minutes: u32 = subject.total_minutes();
    if scheduled_minutes < required_minutes {
        return Err(DomainError::InsufficientScheduledTime {
            subject: subject.subject_id.clone(),
            scheduled_minutes,
            required_minutes,
        });
    }
    Ok(())
}
