// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, EntryPatch};
use crate::constraint::Conflict;
use crate::detect::detect_conflicts;
use crate::error::CoreError;
use crate::snapshot::{FacultyLoad, TermSnapshot, recompute_loads, validate_entry_references};
use std::collections::BTreeSet;
use termtable_domain::{
    DomainError, EntryId, EntryStatus, ScheduleEntry, validate_entry_coverage,
    validate_entry_slots,
};

/// The result of a successful lifecycle transition.
///
/// Transitions are atomic: they either produce a complete new entry set or
/// fail without side effects. Faculty load aggregates are recomputed from
/// the new set on every transition, never trusted incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The term's complete entry set after the transition.
    pub entries: Vec<ScheduleEntry>,
    /// Derived load aggregates for every faculty member, recomputed over
    /// the new entry set.
    pub faculty_loads: Vec<FacultyLoad>,
}

/// Applies a lifecycle command to the snapshot, producing the new entry
/// set and recomputed faculty aggregates.
///
/// The snapshot is never mutated; the caller owns persistence of the
/// result (and must re-validate against fresh state if the snapshot has
/// gone stale — see the api crate's commit loop).
///
/// # Arguments
///
/// * `snapshot` - The current term universe (immutable)
/// * `command` - The mutation to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` with the new entry set and recomputed loads
/// * `Err(CoreError)` if the command violates domain rules or conflicts
///
/// # Errors
///
/// Returns an error if:
/// - A reference does not resolve (subject, faculty, classroom, entry)
/// - The entry violates slot or coverage invariants
/// - Conflict detection reports any hard-constraint violation
/// - A lifecycle transition is not permitted
#[allow(clippy::too_many_lines)]
pub fn apply(snapshot: &TermSnapshot, command: Command) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateEntry { entry } => {
            validate_entry_references(snapshot, &entry)?;
            if snapshot.entry_by_id(&entry.entry_id).is_some() {
                return Err(CoreError::DomainViolation(DomainError::DuplicateEntry {
                    entry: entry.entry_id,
                }));
            }

            // Entries always enter the system as drafts.
            let mut entry: ScheduleEntry = entry;
            entry.status = EntryStatus::Draft;

            validate_entry(snapshot, &entry)?;

            let conflicts: Vec<Conflict> = detect_conflicts(&entry, &[], snapshot);
            if !conflicts.is_empty() {
                return Err(CoreError::ConflictsDetected(conflicts));
            }

            let mut entries: Vec<ScheduleEntry> = snapshot.entries.clone();
            entries.push(entry);
            Ok(transition(snapshot, entries))
        }
        Command::UpdateEntry { entry_id, patch } => {
            let existing: &ScheduleEntry = snapshot
                .entry_by_id(&entry_id)
                .ok_or_else(|| DomainError::UnknownEntry {
                    entry: entry_id.clone(),
                })?;
            if existing.status == EntryStatus::Archived {
                return Err(CoreError::DomainViolation(
                    DomainError::ArchivedEntryImmutable { entry: entry_id },
                ));
            }

            let patched: ScheduleEntry = patch_entry(existing, patch);
            validate_entry_references(snapshot, &patched)?;
            validate_entry(snapshot, &patched)?;

            // Detection excludes the entry's own prior placement.
            let conflicts: Vec<Conflict> = detect_conflicts(&patched, &[], snapshot);
            if !conflicts.is_empty() {
                return Err(CoreError::ConflictsDetected(conflicts));
            }

            let entries: Vec<ScheduleEntry> = snapshot
                .entries
                .iter()
                .map(|e| {
                    if e.entry_id == entry_id {
                        patched.clone()
                    } else {
                        e.clone()
                    }
                })
                .collect();
            Ok(transition(snapshot, entries))
        }
        Command::PublishEntries { entry_ids } => {
            let unique_ids: Vec<EntryId> = dedup_ids(entry_ids);
            let mut batch: Vec<ScheduleEntry> = Vec::new();
            for entry_id in &unique_ids {
                let entry: &ScheduleEntry = snapshot.entry_by_id(entry_id).ok_or_else(|| {
                    DomainError::UnknownEntry {
                        entry: entry_id.clone(),
                    }
                })?;
                if !entry.status.can_transition_to(EntryStatus::Published) {
                    return Err(CoreError::DomainViolation(
                        DomainError::InvalidLifecycleTransition {
                            from: entry.status,
                            to: EntryStatus::Published,
                        },
                    ));
                }
                batch.push(entry.clone());
            }

            // The batch is validated together: each member against the rest
            // of the term and against the other members, so newly published
            // entries cannot conflict with each other. One conflict fails
            // the whole batch; no member's status changes.
            let mut conflicts: Vec<Conflict> = Vec::new();
            for member in &batch {
                conflicts.extend(detect_conflicts(member, &batch, snapshot));
            }
            if !conflicts.is_empty() {
                return Err(CoreError::ConflictsDetected(conflicts));
            }

            let id_set: BTreeSet<&EntryId> = unique_ids.iter().collect();
            let entries: Vec<ScheduleEntry> = snapshot
                .entries
                .iter()
                .map(|e| {
                    if id_set.contains(&e.entry_id) {
                        let mut published: ScheduleEntry = e.clone();
                        published.status = EntryStatus::Published;
                        published
                    } else {
                        e.clone()
                    }
                })
                .collect();
            Ok(transition(snapshot, entries))
        }
        Command::ArchiveTerm { term } => {
            if term != snapshot.term {
                return Err(CoreError::DomainViolation(DomainError::TermMismatch {
                    expected: snapshot.term,
                    actual: term,
                }));
            }

            // Archiving only shrinks the active conflict universe; no
            // conflict re-check is needed.
            let entries: Vec<ScheduleEntry> = snapshot
                .entries
                .iter()
                .map(|e| {
                    if e.status.is_active() {
                        let mut archived: ScheduleEntry = e.clone();
                        archived.status = EntryStatus::Archived;
                        archived
                    } else {
                        e.clone()
                    }
                })
                .collect();
            Ok(transition(snapshot, entries))
        }
        Command::DeleteEntry { entry_id } => {
            if snapshot.entry_by_id(&entry_id).is_none() {
                return Err(CoreError::DomainViolation(DomainError::UnknownEntry {
                    entry: entry_id,
                }));
            }
            let entries: Vec<ScheduleEntry> = snapshot
                .entries
                .iter()
                .filter(|e| e.entry_id != entry_id)
                .cloned()
                .collect();
            Ok(transition(snapshot, entries))
        }
    }
}

/// Runs the entry-level invariants that need the subject catalog.
fn validate_entry(snapshot: &TermSnapshot, entry: &ScheduleEntry) -> Result<(), CoreError> {
    validate_entry_slots(entry)?;
    if let Some(subject) = snapshot.subject_by_id(&entry.subject) {
        validate_entry_coverage(entry, subject)?;
    }
    Ok(())
}

/// Applies a patch to an entry, leaving absent fields untouched.
fn patch_entry(existing: &ScheduleEntry, patch: EntryPatch) -> ScheduleEntry {
    let mut patched: ScheduleEntry = existing.clone();
    if let Some(faculty) = patch.faculty {
        patched.faculty = faculty;
    }
    if let Some(classroom) = patch.classroom {
        patched.classroom = classroom;
    }
    if let Some(time_slots) = patch.time_slots {
        patched.time_slots = time_slots;
    }
    patched
}

/// Deduplicates ids preserving first-seen order.
fn dedup_ids(entry_ids: Vec<EntryId>) -> Vec<EntryId> {
    let mut seen: BTreeSet<EntryId> = BTreeSet::new();
    entry_ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Packages the new entry set with freshly recomputed faculty aggregates.
fn transition(snapshot: &TermSnapshot, entries: Vec<ScheduleEntry>) -> TransitionResult {
    let faculty_loads: Vec<FacultyLoad> = recompute_loads(&snapshot.faculty, &entries);
    TransitionResult {
        entries,
        faculty_loads,
    }
}
