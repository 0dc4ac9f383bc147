// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;
use termtable_domain::{
    Classroom, ClassroomId, DepartmentId, DomainError, EntryId, Faculty, FacultyId,
    ScheduleEntry, Subject, SubjectId, Term,
};

/// Derived load aggregate for one faculty member.
///
/// Recomputed from the term's non-archived entries on every read and after
/// every mutating lifecycle operation; never stored or incrementally
/// trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyLoad {
    /// The faculty member.
    pub faculty_id: FacultyId,
    /// Weekly teaching minutes across the faculty member's active entries.
    pub assigned_minutes: u32,
    /// Distinct subjects taught (preparations).
    pub preparations: usize,
}

impl FacultyLoad {
    /// Weekly teaching hours, to one-minute precision.
    #[must_use]
    pub fn assigned_hours(&self) -> f64 {
        f64::from(self.assigned_minutes) / 60.0
    }
}

/// The immutable data universe for one term.
///
/// A generation or validation run operates over a snapshot fetched once at
/// the start of the run; it never re-reads external state mid-search. The
/// `revision` field is the optimistic-concurrency token checked when the
/// caller commits results.
#[derive(Debug, Clone, PartialEq)]
pub struct TermSnapshot {
    /// The term this snapshot is scoped to.
    pub term: Term,
    /// Known departments.
    pub departments: Vec<DepartmentId>,
    /// All faculty records, active or not.
    pub faculty: Vec<Faculty>,
    /// All classroom records, available or not.
    pub classrooms: Vec<Classroom>,
    /// The subject catalog for this term.
    pub subjects: Vec<Subject>,
    /// All schedule entries for this term, including archived ones.
    pub entries: Vec<ScheduleEntry>,
    /// Persisted-state revision this snapshot was taken at.
    pub revision: u64,
}

impl TermSnapshot {
    /// Creates a new `TermSnapshot`.
    #[must_use]
    pub const fn new(
        term: Term,
        departments: Vec<DepartmentId>,
        faculty: Vec<Faculty>,
        classrooms: Vec<Classroom>,
        subjects: Vec<Subject>,
        entries: Vec<ScheduleEntry>,
        revision: u64,
    ) -> Self {
        Self {
            term,
            departments,
            faculty,
            classrooms,
            subjects,
            entries,
            revision,
        }
    }

    /// Checks if a department exists.
    #[must_use]
    pub fn has_department(&self, department: &DepartmentId) -> bool {
        self.departments.contains(department)
    }

    /// Looks up a faculty member by id.
    #[must_use]
    pub fn faculty_by_id(&self, faculty_id: &FacultyId) -> Option<&Faculty> {
        self.faculty.iter().find(|f| &f.faculty_id == faculty_id)
    }

    /// Looks up a classroom by id.
    #[must_use]
    pub fn classroom_by_id(&self, classroom_id: &ClassroomId) -> Option<&Classroom> {
        self.classrooms
            .iter()
            .find(|c| &c.classroom_id == classroom_id)
    }

    /// Looks up a subject by id.
    #[must_use]
    pub fn subject_by_id(&self, subject_id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| &s.subject_id == subject_id)
    }

    /// Looks up a schedule entry by id.
    #[must_use]
    pub fn entry_by_id(&self, entry_id: &EntryId) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| &e.entry_id == entry_id)
    }

    /// Iterates the entries that participate in live conflict checks
    /// (status draft or published).
    #[must_use]
    pub fn active_entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| e.status.is_active())
    }

    /// Recomputes the derived load aggregate for one faculty member.
    #[must_use]
    pub fn faculty_load(&self, faculty_id: &FacultyId) -> FacultyLoad {
        let mut assigned_minutes: u32 = 0;
        let mut subjects: BTreeSet<&SubjectId> = BTreeSet::new();
        for entry in self.active_entries() {
            if &entry.faculty == faculty_id {
                assigned_minutes = assigned_minutes.saturating_add(entry.scheduled_minutes());
                subjects.insert(&entry.subject);
            }
        }
        FacultyLoad {
            faculty_id: faculty_id.clone(),
            assigned_minutes,
            preparations: subjects.len(),
        }
    }

    /// Validates that every record in the snapshot resolves its references.
    ///
    /// A broken reference is fatal to the request that carried it (the
    /// snapshot is unusable), but never to the engine.
    ///
    /// # Errors
    ///
    /// Returns the first broken reference found.
    pub fn validate_references(&self) -> Result<(), DomainError> {
        for faculty in &self.faculty {
            if !self.has_department(&faculty.department) {
                return Err(DomainError::UnknownDepartment {
                    department: faculty.department.clone(),
                });
            }
        }
        for subject in &self.subjects {
            if !self.has_department(&subject.department) {
                return Err(DomainError::UnknownDepartment {
                    department: subject.department.clone(),
                });
            }
        }
        for entry in &self.entries {
            validate_entry_references(self, entry)?;
        }
        Ok(())
    }
}

/// Validates that a schedule entry's references resolve in the snapshot.
///
/// # Errors
///
/// Returns the first broken reference: unknown subject, faculty, or
/// classroom, or a term mismatch.
pub fn validate_entry_references(
    snapshot: &TermSnapshot,
    entry: &ScheduleEntry,
) -> Result<(), DomainError> {
    if entry.term != snapshot.term {
        return Err(DomainError::TermMismatch {
            expected: snapshot.term,
            actual: entry.term,
        });
    }
    if snapshot.subject_by_id(&entry.subject).is_none() {
        return Err(DomainError::UnknownSubject {
            subject: entry.subject.clone(),
        });
    }
    if snapshot.faculty_by_id(&entry.faculty).is_none() {
        return Err(DomainError::UnknownFaculty {
            faculty: entry.faculty.clone(),
        });
    }
    if snapshot.classroom_by_id(&entry.classroom).is_none() {
        return Err(DomainError::UnknownClassroom {
            classroom: entry.classroom.clone(),
        });
    }
    Ok(())
}

/// Recomputes derived load aggregates for every faculty member.
///
/// Called after every mutating lifecycle operation so the aggregates are
/// always views over the committed entry set.
#[must_use]
pub fn recompute_loads(faculty: &[Faculty], entries: &[ScheduleEntry]) -> Vec<FacultyLoad> {
    faculty
        .iter()
        .map(|member| {
            let mut assigned_minutes: u32 = 0;
            let mut subjects: BTreeSet<&SubjectId> = BTreeSet::new();
            for entry in entries.iter().filter(|e| e.status.is_active()) {
                if entry.faculty == member.faculty_id {
                    assigned_minutes =
                        assigned_minutes.saturating_add(entry.scheduled_minutes());
                    subjects.insert(&entry.subject);
                }
            }
            FacultyLoad {
                faculty_id: member.faculty_id.clone(),
                assigned_minutes,
                preparations: subjects.len(),
            }
        })
        .collect()
}
