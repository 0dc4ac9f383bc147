// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use termtable::{Conflict, CoreError};
use termtable_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// One or more hard constraints were violated by the request.
    ScheduleConflict {
        /// Every detected conflict.
        conflicts: Vec<Conflict>,
    },
    /// A referenced resource was not found. Reference failures abort the
    /// request that carried them.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A commit kept racing concurrent writers and ran out of retries.
    StaleCommit {
        /// How many detect-then-commit attempts were made.
        attempts: u32,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for '{field}': {message}")
            }
            Self::DomainRuleViolation { message } => {
                write!(f, "Domain rule violation: {message}")
            }
            Self::ScheduleConflict { conflicts } => {
                write!(f, "{} schedule conflict(s) detected", conflicts.len())
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::StaleCommit { attempts } => {
                write!(
                    f,
                    "Commit kept racing concurrent writers; gave up after {attempts} attempts"
                )
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConflictsDetected(conflicts) => Self::ScheduleConflict { conflicts },
            CoreError::DomainViolation(domain_err) => {
                if domain_err.is_reference_error() {
                    Self::ResourceNotFound {
                        resource_type: reference_resource_type(&domain_err).to_string(),
                        message: domain_err.to_string(),
                    }
                } else {
                    Self::DomainRuleViolation {
                        message: domain_err.to_string(),
                    }
                }
            }
        }
    }
}

/// Names the resource type behind a reference error.
const fn reference_resource_type(err: &DomainError) -> &'static str {
    match err {
        DomainError::UnknownDepartment { .. } => "Department",
        DomainError::UnknownFaculty { .. } => "Faculty",
        DomainError::UnknownClassroom { .. } => "Classroom",
        DomainError::UnknownSubject { .. } => "Subject",
        _ => "Schedule entry",
    }
}
