// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::constraint::Conflict;
use termtable_domain::DomainError;

/// Errors that can occur during conflict detection, generation, and state
/// transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// One or more hard constraints were violated by a candidate
    /// placement. Carries every detected conflict; detection never
    /// short-circuits.
    ConflictsDetected(Vec<Conflict>),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ConflictsDetected(conflicts) => {
                write!(f, "{} schedule conflict(s) detected:", conflicts.len())?;
                for conflict in conflicts {
                    write!(f, " {conflict};")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
