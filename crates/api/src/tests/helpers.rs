// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures, including an in-memory store.

use crate::store::{ScheduleStore, StoreError};
use crate::{ScheduleEntryPayload, TimeSlotPayload};
use std::cell::{Cell, RefCell};
use termtable::{TermSnapshot, TransitionResult};
use termtable_domain::{
    AcademicYear, Classroom, ClassroomId, ClassroomStatus, ClassroomType, CourseId,
    DepartmentId, EmploymentType, EntryId, EntryStatus, Faculty, FacultyId, FacultyStatus,
    ScheduleEntry, Semester, Subject, SubjectId, Term, TimeSlot, WeekDay,
};
use time::Time;

/// An in-memory `ScheduleStore` with revision checking and an optional
/// number of injected stale-commit failures.
pub struct InMemoryStore {
    snapshot: RefCell<TermSnapshot>,
    stale_failures: Cell<u32>,
}

impl InMemoryStore {
    pub const fn new(snapshot: TermSnapshot) -> Self {
        Self {
            snapshot: RefCell::new(snapshot),
            stale_failures: Cell::new(0),
        }
    }

    /// Makes the next `count` commits fail with `StaleRevision`.
    pub fn fail_next_commits(&self, count: u32) {
        self.stale_failures.set(count);
    }

    pub fn current(&self) -> TermSnapshot {
        self.snapshot.borrow().clone()
    }
}

impl ScheduleStore for InMemoryStore {
    fn load_snapshot(&self, term: &Term) -> Result<TermSnapshot, StoreError> {
        let snapshot = self.snapshot.borrow();
        if snapshot.term != *term {
            return Err(StoreError::TermNotFound { term: *term });
        }
        Ok(snapshot.clone())
    }

    fn commit(
        &self,
        _term: &Term,
        expected_revision: u64,
        transition: &TransitionResult,
    ) -> Result<u64, StoreError> {
        let pending: u32 = self.stale_failures.get();
        if pending > 0 {
            self.stale_failures.set(pending - 1);
            return Err(StoreError::StaleRevision {
                expected: expected_revision,
                actual: expected_revision + 1,
            });
        }

        let mut snapshot = self.snapshot.borrow_mut();
        if snapshot.revision != expected_revision {
            return Err(StoreError::StaleRevision {
                expected: expected_revision,
                actual: snapshot.revision,
            });
        }
        snapshot.entries = transition.entries.clone();
        snapshot.revision += 1;
        Ok(snapshot.revision)
    }
}

pub const fn test_term() -> Term {
    Term::new(Semester::First, AcademicYear::new(2025))
}

pub fn slot(day: WeekDay, start: (u8, u8), end: (u8, u8)) -> TimeSlot {
    TimeSlot::new(
        day,
        Time::from_hms(start.0, start.1, 0).unwrap(),
        Time::from_hms(end.0, end.1, 0).unwrap(),
    )
    .unwrap()
}

pub fn test_faculty(faculty_id: &str) -> Faculty {
    Faculty::new(
        FacultyId::new(faculty_id),
        String::from("Test Faculty"),
        DepartmentId::new("CS"),
        EmploymentType::FullTime,
        18,
        24,
        4,
        vec![
            slot(WeekDay::Monday, (8, 0), (17, 0)),
            slot(WeekDay::Tuesday, (8, 0), (17, 0)),
            slot(WeekDay::Wednesday, (8, 0), (17, 0)),
        ],
        FacultyStatus::Active,
    )
}

pub fn lecture_room(classroom_id: &str, capacity: u32) -> Classroom {
    Classroom::new(
        ClassroomId::new(classroom_id),
        capacity,
        ClassroomType::Lecture,
        ClassroomStatus::Available,
    )
}

pub fn lecture_subject(subject_id: &str, lecture_units: f64) -> Subject {
    Subject::new(
        SubjectId::new(subject_id),
        String::from("Test Subject"),
        DepartmentId::new("CS"),
        CourseId::new("BSCS"),
        1,
        Semester::First,
        lecture_units,
        0.0,
        None,
    )
}

pub fn entry(
    entry_id: &str,
    subject: &Subject,
    faculty: &Faculty,
    classroom: &Classroom,
    time_slots: Vec<TimeSlot>,
) -> ScheduleEntry {
    ScheduleEntry::new(
        EntryId::new(entry_id),
        subject.subject_id.clone(),
        faculty.faculty_id.clone(),
        classroom.classroom_id.clone(),
        time_slots,
        test_term(),
        EntryStatus::Draft,
    )
}

pub fn snapshot_with(
    faculty: Vec<Faculty>,
    classrooms: Vec<Classroom>,
    subjects: Vec<Subject>,
    entries: Vec<ScheduleEntry>,
) -> TermSnapshot {
    TermSnapshot::new(
        test_term(),
        vec![DepartmentId::new("CS")],
        faculty,
        classrooms,
        subjects,
        entries,
        1,
    )
}

pub fn slot_payload(day: &str, start: &str, end: &str) -> TimeSlotPayload {
    TimeSlotPayload {
        day: day.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    }
}

pub fn entry_payload(
    entry_id: Option<&str>,
    subject_id: &str,
    faculty_id: &str,
    classroom_id: &str,
    time_slots: Vec<TimeSlotPayload>,
) -> ScheduleEntryPayload {
    ScheduleEntryPayload {
        entry_id: entry_id.map(str::to_string),
        subject_id: subject_id.to_string(),
        faculty_id: faculty_id.to_string(),
        classroom_id: classroom_id.to_string(),
        time_slots,
    }
}
