// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures shared by the core test modules.

use crate::TermSnapshot;
use termtable_domain::{
    AcademicYear, Classroom, ClassroomId, ClassroomStatus, ClassroomType, CourseId,
    DepartmentId, EmploymentType, EntryId, EntryStatus, Faculty, FacultyId, FacultyStatus,
    ScheduleEntry, Semester, Subject, SubjectId, Term, TimeSlot, WeekDay,
};
use time::Time;

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

/// Monday through Friday, 08:00-17:00.
pub fn weekday_windows() -> Vec<TimeSlot> {
    vec![
        slot(WeekDay::Monday, (8, 0), (17, 0)),
        slot(WeekDay::Tuesday, (8, 0), (17, 0)),
        slot(WeekDay::Wednesday, (8, 0), (17, 0)),
        slot(WeekDay::Thursday, (8, 0), (17, 0)),
        slot(WeekDay::Friday, (8, 0), (17, 0)),
    ]
}

pub fn test_faculty(faculty_id: &str) -> Faculty {
    faculty_with(faculty_id, 24, 4, weekday_windows())
}

pub fn faculty_with(
    faculty_id: &str,
    max_load: u8,
    max_preparations: u8,
    availability: Vec<TimeSlot>,
) -> Faculty {
    Faculty::new(
        FacultyId::new(faculty_id),
        String::from("Test Faculty"),
        DepartmentId::new("CS"),
        EmploymentType::FullTime,
        18,
        max_load,
        max_preparations,
        availability,
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

pub fn lab_room(classroom_id: &str, capacity: u32) -> Classroom {
    Classroom::new(
        ClassroomId::new(classroom_id),
        capacity,
        ClassroomType::Laboratory,
        ClassroomStatus::Available,
    )
}

/// A pure-lecture subject in department CS; one lecture unit is one hour.
pub fn lecture_subject(subject_id: &str, lecture_units: f64) -> Subject {
    subject_with(subject_id, lecture_units, 0.0, None)
}

pub fn subject_with(
    subject_id: &str,
    lecture_units: f64,
    lab_units: f64,
    expected_enrollment: Option<u32>,
) -> Subject {
    Subject::new(
        SubjectId::new(subject_id),
        String::from("Test Subject"),
        DepartmentId::new("CS"),
        CourseId::new("BSCS"),
        1,
        Semester::First,
        lecture_units,
        lab_units,
        expected_enrollment,
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
        vec![DepartmentId::new("CS"), DepartmentId::new("MATH")],
        faculty,
        classrooms,
        subjects,
        entries,
        1,
    )
}
