// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::{ClassroomId, CourseId, DepartmentId, EntryId, FacultyId, SubjectId};
use crate::load;
use crate::timeslot::TimeSlot;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A semester within an academic year.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Semester {
    /// First semester.
    First,
    /// Second semester.
    Second,
    /// Summer term.
    Summer,
}

impl Semester {
    /// Converts this semester to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Second => "Second",
            Self::Summer => "Summer",
        }
    }
}

impl FromStr for Semester {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "First" => Ok(Self::First),
            "Second" => Ok(Self::Second),
            "Summer" => Ok(Self::Summer),
            _ => Err(DomainError::InvalidSemester(s.to_string())),
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An academic year, identified by its starting calendar year.
///
/// Displayed in the institutional "2025-2026" form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AcademicYear {
    /// The calendar year the academic year starts in.
    start_year: u16,
}

impl AcademicYear {
    /// Creates a new `AcademicYear`.
    ///
    /// # Arguments
    ///
    /// * `start_year` - The calendar year the academic year starts in
    #[must_use]
    pub const fn new(start_year: u16) -> Self {
        Self { start_year }
    }

    /// Returns the starting calendar year.
    #[must_use]
    pub const fn start_year(&self) -> u16 {
        self.start_year
    }

    /// Returns the ending calendar year.
    #[must_use]
    pub const fn end_year(&self) -> u16 {
        self.start_year + 1
    }
}

impl std::fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start_year, self.end_year())
    }
}

/// A term: the `(semester, academic year)` pair that defines the active
/// conflict universe. Entries in different terms never conflict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Term {
    /// The semester.
    pub semester: Semester,
    /// The academic year.
    pub academic_year: AcademicYear,
}

impl Term {
    /// Creates a new `Term`.
    #[must_use]
    pub const fn new(semester: Semester, academic_year: AcademicYear) -> Self {
        Self {
            semester,
            academic_year,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Semester {}", self.semester, self.academic_year)
    }
}

/// Employment classification for a faculty member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    /// Full-time faculty.
    FullTime,
    /// Part-time faculty.
    PartTime,
}

impl EmploymentType {
    /// Converts this employment type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
        }
    }
}

/// Whether a faculty member may receive assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacultyStatus {
    /// Eligible for assignment.
    Active,
    /// Excluded from the assignable pool.
    Inactive,
}

/// A faculty member.
///
/// `current_load` and `current_preparations` are deliberately absent: they
/// are derived aggregates over the active term's schedule entries and are
/// recomputed by the engine, never stored or hand-edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    /// The faculty identifier.
    pub faculty_id: FacultyId,
    /// The faculty member's name (informational, not unique).
    pub name: String,
    /// The department this faculty member belongs to.
    pub department: DepartmentId,
    /// Employment classification.
    pub employment_type: EmploymentType,
    /// Minimum weekly teaching hours (convention: 18..=26).
    pub min_load: u8,
    /// Maximum weekly teaching hours (convention: 18..=26).
    pub max_load: u8,
    /// Maximum number of distinct subjects taught.
    pub max_preparations: u8,
    /// Windows outside of which this faculty member cannot be assigned.
    pub availability: Vec<TimeSlot>,
    /// Whether this faculty member may receive assignments.
    pub status: FacultyStatus,
}

impl Faculty {
    /// Conventional lower bound on weekly teaching hours.
    pub const MIN_WEEKLY_LOAD: u8 = 18;

    /// Conventional upper bound on weekly teaching hours.
    pub const MAX_WEEKLY_LOAD: u8 = 26;

    /// Default number of distinct subjects a faculty member may teach.
    pub const DEFAULT_MAX_PREPARATIONS: u8 = 4;

    /// Creates a new `Faculty`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        faculty_id: FacultyId,
        name: String,
        department: DepartmentId,
        employment_type: EmploymentType,
        min_load: u8,
        max_load: u8,
        max_preparations: u8,
        availability: Vec<TimeSlot>,
        status: FacultyStatus,
    ) -> Self {
        Self {
            faculty_id,
            name,
            department,
            employment_type,
            min_load,
            max_load,
            max_preparations,
            availability,
            status,
        }
    }

    /// Returns whether this faculty member is eligible for assignment.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, FacultyStatus::Active)
    }

    /// Returns the maximum weekly load in minutes.
    #[must_use]
    pub fn max_load_minutes(&self) -> u32 {
        u32::from(self.max_load) * 60
    }
}

/// The physical type of a classroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassroomType {
    /// Standard lecture room.
    Lecture,
    /// Wet/dry laboratory.
    Laboratory,
    /// Computer laboratory.
    ComputerLab,
    /// Conference room.
    Conference,
    /// Anything else.
    Other,
}

impl ClassroomType {
    /// Converts this classroom type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lecture => "lecture",
            Self::Laboratory => "laboratory",
            Self::ComputerLab => "computer-lab",
            Self::Conference => "conference",
            Self::Other => "other",
        }
    }

    /// Returns whether this room type can host lab hours.
    #[must_use]
    pub const fn is_lab_capable(&self) -> bool {
        matches!(self, Self::Laboratory | Self::ComputerLab)
    }
}

impl std::fmt::Display for ClassroomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operational status of a classroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassroomStatus {
    /// Eligible for scheduling.
    Available,
    /// Under maintenance; excluded from scheduling.
    Maintenance,
    /// Reserved outside the timetabling system; excluded from scheduling.
    Reserved,
}

/// A classroom.
///
/// Classrooms are global resources shared across all subjects and faculty;
/// no subsystem owns a classroom exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// The classroom identifier.
    pub classroom_id: ClassroomId,
    /// Seating capacity (positive).
    pub capacity: u32,
    /// Physical room type.
    pub room_type: ClassroomType,
    /// Operational status.
    pub status: ClassroomStatus,
}

impl Classroom {
    /// Creates a new `Classroom`.
    #[must_use]
    pub const fn new(
        classroom_id: ClassroomId,
        capacity: u32,
        room_type: ClassroomType,
        status: ClassroomStatus,
    ) -> Self {
        Self {
            classroom_id,
            capacity,
            room_type,
            status,
        }
    }

    /// Returns whether this classroom is eligible for scheduling.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.status, ClassroomStatus::Available)
    }
}

/// A subject offering to be scheduled.
///
/// Teaching hours are always derived from the unit counts through the load
/// calculator; they are never stored independently of units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// The subject identifier.
    pub subject_id: SubjectId,
    /// Descriptive title.
    pub title: String,
    /// The owning department.
    pub department: DepartmentId,
    /// The course of study this subject belongs to.
    pub course: CourseId,
    /// Year level within the course (1-based).
    pub year_level: u8,
    /// The semester this subject is offered in.
    pub semester: Semester,
    /// Lecture units (>= 0).
    pub lecture_units: f64,
    /// Lab units (>= 0); at least one of the unit counts must be positive.
    pub lab_units: f64,
    /// Expected enrollment; capacity checks are skipped when absent.
    pub expected_enrollment: Option<u32>,
}

impl Subject {
    /// Creates a new `Subject`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        subject_id: SubjectId,
        title: String,
        department: DepartmentId,
        course: CourseId,
        year_level: u8,
        semester: Semester,
        lecture_units: f64,
        lab_units: f64,
        expected_enrollment: Option<u32>,
    ) -> Self {
        Self {
            subject_id,
            title,
            department,
            course,
            year_level,
            semester,
            lecture_units,
            lab_units,
            expected_enrollment,
        }
    }

    /// Derived weekly lecture hours.
    #[must_use]
    pub fn lecture_hours(&self) -> f64 {
        load::lecture_hours(self.lecture_units)
    }

    /// Derived weekly lab hours.
    #[must_use]
    pub fn lab_hours(&self) -> f64 {
        load::lab_hours(self.lab_units)
    }

    /// Derived total weekly teaching hours.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        load::total_hours(self.lecture_units, self.lab_units)
    }

    /// Derived total weekly teaching minutes (the engine tiles in minutes).
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        load::total_minutes(self.lecture_units, self.lab_units)
    }

    /// Returns whether this subject requires a lab-capable classroom.
    #[must_use]
    pub const fn requires_lab_room(&self) -> bool {
        self.lab_units > 0.0
    }
}

/// Lifecycle state of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EntryStatus {
    /// Produced by the engine or a manual create; not yet committed to the
    /// published timetable.
    #[default]
    Draft,
    /// Visible on the published timetable.
    Published,
    /// Retained for history; excluded from active conflict checks.
    Archived,
}

impl EntryStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft -> Published (explicit publish)
    /// - Draft -> Archived (end of term)
    /// - Published -> Archived (end of term)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Published)
                | (Self::Draft | Self::Published, Self::Archived)
        )
    }

    /// Returns whether entries in this status participate in live conflict
    /// checks.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Draft | Self::Published)
    }
}

impl FromStr for EntryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidEntryStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A schedule entry: one subject offering assigned to one faculty member,
/// one classroom, and one or more weekly time slots within a term.
///
/// ## Invariants
///
/// - At least one time slot.
/// - The entry's own time slots never overlap each other.
/// - The combined slot duration covers the subject's required weekly
///   teaching time.
///
/// Field-level invariants are enforced by `validate_entry_slots` and
/// `validate_entry_coverage`, mirroring how user fields are validated
/// separately from construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// The entry identifier.
    pub entry_id: EntryId,
    /// The subject being taught.
    pub subject: SubjectId,
    /// The assigned faculty member.
    pub faculty: FacultyId,
    /// The assigned classroom.
    pub classroom: ClassroomId,
    /// The weekly time slots.
    pub time_slots: Vec<TimeSlot>,
    /// The term this entry belongs to.
    pub term: Term,
    /// Lifecycle status.
    pub status: EntryStatus,
}

impl ScheduleEntry {
    /// Creates a new `ScheduleEntry`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        entry_id: EntryId,
        subject: SubjectId,
        faculty: FacultyId,
        classroom: ClassroomId,
        time_slots: Vec<TimeSlot>,
        term: Term,
        status: EntryStatus,
    ) -> Self {
        Self {
            entry_id,
            subject,
            faculty,
            classroom,
            time_slots,
            term,
            status,
        }
    }

    /// Total scheduled minutes across this entry's slots.
    #[must_use]
    pub fn scheduled_minutes(&self) -> u32 {
        crate::timeslot::total_minutes(&self.time_slots)
    }
}
