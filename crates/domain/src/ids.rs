// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identifier newtypes for the timetabling domain.
//!
//! Identifiers are institutional codes (e.g., "CS101", "RM-204"). They are
//! trimmed and normalized to uppercase so lookups are case-insensitive.

use serde::{Deserialize, Serialize};

/// Identifies a department.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DepartmentId {
    /// The department code (e.g., "CS").
    value: String,
}

impl DepartmentId {
    /// Creates a new `DepartmentId`, trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the department code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Identifies a course of study (degree program).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId {
    /// The course code (e.g., "BSCS").
    value: String,
}

impl CourseId {
    /// Creates a new `CourseId`, trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the course code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Identifies a faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacultyId {
    /// The faculty code (e.g., "FAC-012").
    value: String,
}

impl FacultyId {
    /// Creates a new `FacultyId`, trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the faculty code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for FacultyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Identifies a classroom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassroomId {
    /// The room code (e.g., "RM-204").
    value: String,
}

impl ClassroomId {
    /// Creates a new `ClassroomId`, trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the room code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ClassroomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Identifies a subject offering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId {
    /// The subject code (e.g., "CS101").
    value: String,
}

impl SubjectId {
    /// Creates a new `SubjectId`, trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the subject code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Identifies a schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId {
    /// The entry identifier.
    value: String,
}

impl EntryId {
    /// Creates a new `EntryId`, trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
