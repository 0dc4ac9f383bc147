// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod ids;
pub mod load;
mod timeslot;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use ids::{ClassroomId, CourseId, DepartmentId, EntryId, FacultyId, SubjectId};
pub use timeslot::{TimeSlot, WeekDay, find_self_overlap, total_hours, total_minutes};
pub use types::{
    AcademicYear, Classroom, ClassroomStatus, ClassroomType, EmploymentType, EntryStatus,
    Faculty, FacultyStatus, ScheduleEntry, Semester, Subject, Term,
};
pub use validation::{
    validate_academic_year, validate_classroom, validate_entry_coverage,
    validate_entry_slots, validate_faculty, validate_subject,
};
