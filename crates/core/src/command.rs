// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use termtable_domain::{ClassroomId, EntryId, FacultyId, ScheduleEntry, Term, TimeSlot};

/// A typed partial update to a schedule entry.
///
/// Absent fields are left untouched. Request shapes are explicit optional
/// fields, never a generic dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryPatch {
    /// Reassign the faculty member.
    pub faculty: Option<FacultyId>,
    /// Reassign the classroom.
    pub classroom: Option<ClassroomId>,
    /// Replace the weekly time slots.
    pub time_slots: Option<Vec<TimeSlot>>,
}

impl EntryPatch {
    /// Returns whether this patch changes anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.faculty.is_none() && self.classroom.is_none() && self.time_slots.is_none()
    }
}

/// A command represents caller intent as data only.
///
/// Commands are the only way to request schedule mutations; every command
/// that changes placements re-runs conflict detection before it is
/// applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a schedule entry. The entry is persisted as draft regardless
    /// of the status it carries.
    CreateEntry {
        /// The entry to create.
        entry: ScheduleEntry,
    },
    /// Partially update an existing entry.
    UpdateEntry {
        /// The entry to update.
        entry_id: EntryId,
        /// The fields to change.
        patch: EntryPatch,
    },
    /// Publish a batch of draft entries atomically.
    PublishEntries {
        /// The entries to publish together.
        entry_ids: Vec<EntryId>,
    },
    /// Archive every active entry in a term.
    ArchiveTerm {
        /// The term to archive.
        term: Term,
    },
    /// Delete an entry.
    DeleteEntry {
        /// The entry to delete.
        entry_id: EntryId,
    },
}
