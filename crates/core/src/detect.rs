// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The conflict detector.
//!
//! Pure read-and-report: given a candidate entry, the other candidates in
//! the same batch, and the term snapshot, returns every hard-constraint
//! violation. Detection never short-circuits and never mutates state.
//!
//! Callers must resolve the candidate's references first (see
//! `validate_entry_references`); a candidate whose subject, faculty, or
//! classroom cannot be resolved yields no conflicts here because the
//! reference failure has already aborted the request.

use crate::constraint::{Conflict, ConstraintKind};
use crate::snapshot::TermSnapshot;
use std::collections::BTreeSet;
use termtable_domain::{Classroom, Faculty, ScheduleEntry, Subject, SubjectId};

/// Detects every hard-constraint violation for a candidate placement.
///
/// The conflict universe is the snapshot's active entries plus the other
/// candidates in `batch`. The candidate's own entry id is excluded from
/// both sides (so updates do not conflict with themselves), and a batch
/// entry supersedes a snapshot entry with the same id.
///
/// # Arguments
///
/// * `candidate` - The placement being validated
/// * `batch` - Other candidates validated in the same call
/// * `snapshot` - The term's data universe
///
/// # Returns
///
/// Every detected conflict, in deterministic order. Empty when the
/// placement is valid.
#[must_use]
pub fn detect_conflicts(
    candidate: &ScheduleEntry,
    batch: &[ScheduleEntry],
    snapshot: &TermSnapshot,
) -> Vec<Conflict> {
    let mut conflicts: Vec<Conflict> = Vec::new();

    let universe: Vec<&ScheduleEntry> = conflict_universe(candidate, batch, snapshot);

    if let Some(faculty) = snapshot.faculty_by_id(&candidate.faculty) {
        check_faculty_status(candidate, faculty, &mut conflicts);
        check_faculty_availability(candidate, faculty, &mut conflicts);
        check_faculty_double_booking(candidate, &universe, &mut conflicts);
        check_faculty_load(candidate, faculty, &universe, &mut conflicts);
        check_preparations(candidate, faculty, &universe, &mut conflicts);
    }

    if let Some(classroom) = snapshot.classroom_by_id(&candidate.classroom) {
        check_classroom_status(candidate, classroom, &mut conflicts);
        check_classroom_double_booking(candidate, &universe, &mut conflicts);
        if let Some(subject) = snapshot.subject_by_id(&candidate.subject) {
            check_classroom_type(classroom, subject, &mut conflicts);
            check_classroom_capacity(classroom, subject, &mut conflicts);
        }
    }

    conflicts
}

/// Builds the set of entries the candidate is checked against.
fn conflict_universe<'a>(
    candidate: &ScheduleEntry,
    batch: &'a [ScheduleEntry],
    snapshot: &'a TermSnapshot,
) -> Vec<&'a ScheduleEntry> {
    let batch_ids: BTreeSet<_> = batch.iter().map(|e| &e.entry_id).collect();
    let mut universe: Vec<&ScheduleEntry> = snapshot
        .active_entries()
        .filter(|e| e.entry_id != candidate.entry_id && !batch_ids.contains(&e.entry_id))
        .collect();
    universe.extend(batch.iter().filter(|e| e.entry_id != candidate.entry_id));
    universe
}

fn check_faculty_status(
    candidate: &ScheduleEntry,
    faculty: &Faculty,
    conflicts: &mut Vec<Conflict>,
) {
    if !faculty.is_active() {
        conflicts.push(Conflict::new(
            ConstraintKind::FacultyInactive,
            None,
            format!(
                "Faculty '{}' is inactive and cannot receive assignments",
                faculty.faculty_id
            ),
        ));
    }
}

fn check_classroom_status(
    candidate: &ScheduleEntry,
    classroom: &Classroom,
    conflicts: &mut Vec<Conflict>,
) {
    if !classroom.is_available() {
        conflicts.push(Conflict::new(
            ConstraintKind::ClassroomNotAvailable,
            None,
            format!(
                "Classroom '{}' is not available for scheduling (subject '{}')",
                classroom.classroom_id, candidate.subject
            ),
        ));
    }
}

fn check_faculty_availability(
    candidate: &ScheduleEntry,
    faculty: &Faculty,
    conflicts: &mut Vec<Conflict>,
) {
    for slot in &candidate.time_slots {
        let covered: bool = faculty
            .availability
            .iter()
            .any(|window| window.contains(slot));
        if !covered {
            conflicts.push(Conflict::new(
                ConstraintKind::FacultyUnavailable,
                None,
                format!(
                    "Faculty '{}' is not available for {slot}",
                    faculty.faculty_id
                ),
            ));
        }
    }
}

fn check_faculty_double_booking(
    candidate: &ScheduleEntry,
    universe: &[&ScheduleEntry],
    conflicts: &mut Vec<Conflict>,
) {
    for existing in universe {
        if existing.faculty != candidate.faculty {
            continue;
        }
        if let Some((own, other)) = first_overlap(candidate, existing) {
            conflicts.push(Conflict::new(
                ConstraintKind::FacultyDoubleBooking,
                Some(existing.entry_id.clone()),
                format!(
                    "Faculty '{}' is already booked {other} for subject '{}' (entry '{}'), overlapping {own}",
                    candidate.faculty, existing.subject, existing.entry_id
                ),
            ));
        }
    }
}

fn check_classroom_double_booking(
    candidate: &ScheduleEntry,
    universe: &[&ScheduleEntry],
    conflicts: &mut Vec<Conflict>,
) {
    for existing in universe {
        if existing.classroom != candidate.classroom {
            continue;
        }
        if let Some((own, other)) = first_overlap(candidate, existing) {
            conflicts.push(Conflict::new(
                ConstraintKind::ClassroomDoubleBooking,
                Some(existing.entry_id.clone()),
                format!(
                    "Classroom '{}' is already occupied {other} by subject '{}' (entry '{}'), overlapping {own}",
                    candidate.classroom, existing.subject, existing.entry_id
                ),
            ));
        }
    }
}

/// Finds the first overlapping slot pair between two entries.
///
/// Returns `(candidate slot, existing slot)`. Overlap is symmetric, so
/// detecting X against {Y} reports the same collision as Y against {X}
/// with the roles swapped.
fn first_overlap(
    candidate: &ScheduleEntry,
    existing: &ScheduleEntry,
) -> Option<(termtable_domain::TimeSlot, termtable_domain::TimeSlot)> {
    for own in &candidate.time_slots {
        for other in &existing.time_slots {
            if own.overlaps(other) {
                return Some((*own, *other));
            }
        }
    }
    None
}

fn check_classroom_type(
    classroom: &Classroom,
    subject: &Subject,
    conflicts: &mut Vec<Conflict>,
) {
    if subject.requires_lab_room() && !classroom.room_type.is_lab_capable() {
        conflicts.push(Conflict::new(
            ConstraintKind::ClassroomTypeMismatch,
            None,
            format!(
                "Subject '{}' has lab hours and requires a lab-capable room, but '{}' is a {} room",
                subject.subject_id, classroom.classroom_id, classroom.room_type
            ),
        ));
    }
    // Laboratories are lab-exclusive: pure-lecture subjects may not occupy them.
    if !subject.requires_lab_room()
        && classroom.room_type == termtable_domain::ClassroomType::Laboratory
    {
        conflicts.push(Conflict::new(
            ConstraintKind::ClassroomTypeMismatch,
            None,
            format!(
                "Subject '{}' has no lab hours and may not occupy laboratory '{}'",
                subject.subject_id, classroom.classroom_id
            ),
        ));
    }
}

fn check_classroom_capacity(
    classroom: &Classroom,
    subject: &Subject,
    conflicts: &mut Vec<Conflict>,
) {
    // Skipped entirely when the subject carries no enrollment estimate.
    if let Some(enrollment) = subject.expected_enrollment {
        if classroom.capacity < enrollment {
            conflicts.push(Conflict::new(
                ConstraintKind::ClassroomCapacity,
                None,
                format!(
                    "Classroom '{}' seats {} but subject '{}' expects {enrollment} students",
                    classroom.classroom_id, classroom.capacity, subject.subject_id
                ),
            ));
        }
    }
}

fn check_faculty_load(
    candidate: &ScheduleEntry,
    faculty: &Faculty,
    universe: &[&ScheduleEntry],
    conflicts: &mut Vec<Conflict>,
) {
    let current_minutes: u32 = universe
        .iter()
        .filter(|e| e.faculty == candidate.faculty)
        .fold(0_u32, |acc, e| acc.saturating_add(e.scheduled_minutes()));
    let candidate_minutes: u32 = candidate.scheduled_minutes();
    let resulting: u32 = current_minutes.saturating_add(candidate_minutes);

    if resulting > faculty.max_load_minutes() {
        conflicts.push(Conflict::new(
            ConstraintKind::FacultyOverload,
            None,
            format!(
                "Assigning subject '{}' would load faculty '{}' to {:.2} hours per week, above the maximum of {}",
                candidate.subject,
                faculty.faculty_id,
                f64::from(resulting) / 60.0,
                faculty.max_load
            ),
        ));
    }
}

fn check_preparations(
    candidate: &ScheduleEntry,
    faculty: &Faculty,
    universe: &[&ScheduleEntry],
    conflicts: &mut Vec<Conflict>,
) {
    let mut subjects: BTreeSet<&SubjectId> = universe
        .iter()
        .filter(|e| e.faculty == candidate.faculty)
        .map(|e| &e.subject)
        .collect();
    if !subjects.contains(&candidate.subject) {
        subjects.insert(&candidate.subject);
        if subjects.len() > usize::from(faculty.max_preparations) {
            conflicts.push(Conflict::new(
                ConstraintKind::PreparationLimit,
                None,
                format!(
                    "Assigning subject '{}' would give faculty '{}' {} distinct preparations, above the maximum of {}",
                    candidate.subject,
                    faculty.faculty_id,
                    subjects.len(),
                    faculty.max_preparations
                ),
            ));
        }
    }
}
