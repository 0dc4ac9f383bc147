// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage collaborator boundary.
//!
//! Persistence is external to the engine: the service consumes snapshot
//! reads and an atomic, revision-checked write sink through this trait.
//! Committing is the sole critical section for concurrent requests on the
//! same term (optimistic concurrency: detect-then-commit, retry on
//! staleness).

use termtable::{TermSnapshot, TransitionResult};
use termtable_domain::Term;
use thiserror::Error;

/// Errors surfaced by a schedule store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The persisted revision moved since the snapshot was taken; the
    /// caller must reload and re-validate.
    #[error("Stale snapshot: expected revision {expected}, store is at {actual}")]
    StaleRevision {
        /// The revision the caller validated against.
        expected: u64,
        /// The revision the store is actually at.
        actual: u64,
    },

    /// No data exists for the requested term.
    #[error("No schedule data for {term}")]
    TermNotFound {
        /// The requested term.
        term: Term,
    },

    /// The storage backend failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Read and write access to persisted schedule state, scoped by term.
pub trait ScheduleStore {
    /// Loads the immutable universe for a term, including the revision
    /// token for optimistic-concurrency commits.
    ///
    /// # Errors
    ///
    /// Returns an error if the term is unknown or the backend fails.
    fn load_snapshot(&self, term: &Term) -> Result<TermSnapshot, StoreError>;

    /// Atomically persists a transition if and only if the store is still
    /// at `expected_revision`. Returns the new revision.
    ///
    /// Implementations must persist the full entry set and the recomputed
    /// faculty aggregates together.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StaleRevision` when another writer committed
    /// since the snapshot was taken.
    fn commit(
        &self,
        term: &Term,
        expected_revision: u64,
        transition: &TransitionResult,
    ) -> Result<u64, StoreError>;
}
