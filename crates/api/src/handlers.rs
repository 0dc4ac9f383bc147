// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The schedule service: the engine's external operations.
//!
//! Each operation parses its transport-shaped request into domain types,
//! runs the core engine against a snapshot loaded from the store, and (for
//! mutating operations) commits through the optimistic-concurrency loop:
//! load snapshot, validate, commit at the snapshot's revision, and on
//! staleness reload and re-validate against the latest persisted state.

use crate::error::ApiError;
use crate::request_response::{
    ArchiveTermRequest, ArchiveTermResponse, CommitEntryRequest, CommitEntryResponse,
    ConflictInfo, DeleteEntryRequest, DeleteEntryResponse, DetectConflictsRequest,
    DetectConflictsResponse, FacultyLoadInfo, GenerateSchedulesRequest,
    GenerateSchedulesResponse, GenerationOptionsPayload, PublishEntriesRequest,
    PublishEntriesResponse, ScheduleEntryInfo, ScheduleEntryPayload, TimeSlotInfo,
    TimeSlotPayload, UnresolvedSubjectInfo,
};
use crate::store::{ScheduleStore, StoreError};
use std::collections::BTreeSet;
use std::time::Duration;
use termtable::{
    CancelToken, Command, Conflict, CoreError, EntryPatch, FacultyLoad, SearchLimits,
    TermSnapshot, TransitionResult, UnresolvedSubject, apply, generate_assignment,
    validate_entry_references,
};
use termtable_domain::{
    AcademicYear, ClassroomId, DomainError, EntryId, EntryStatus, FacultyId,
    ScheduleEntry, Semester, SubjectId, Term, TimeSlot, WeekDay,
    validate_academic_year,
};
use time::Time;
use time::macros::format_description;

/// The engine's external interface, generic over the storage collaborator.
pub struct ScheduleService<S> {
    store: S,
    max_commit_attempts: u32,
}

impl<S: ScheduleStore> ScheduleService<S> {
    /// Default number of detect-then-commit attempts before giving up on
    /// a racing term.
    pub const DEFAULT_COMMIT_ATTEMPTS: u32 = 3;

    /// Creates a new service over a store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            max_commit_attempts: Self::DEFAULT_COMMIT_ATTEMPTS,
        }
    }

    /// Creates a new service with an explicit commit-attempt bound.
    #[must_use]
    pub const fn with_commit_attempts(store: S, max_commit_attempts: u32) -> Self {
        Self {
            store,
            max_commit_attempts,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Detects conflicts for a proposed entry. Read-only.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed input or broken references; detected
    /// conflicts are data, not errors.
    pub fn detect_conflicts(
        &self,
        request: &DetectConflictsRequest,
    ) -> Result<DetectConflictsResponse, ApiError> {
        let term: Term = parse_term(&request.semester, request.academic_year)?;
        let snapshot: TermSnapshot = self.load(&term)?;
        let candidate: ScheduleEntry = parse_entry(&request.candidate, term)?;

        validate_entry_references(&snapshot, &candidate)
            .map_err(CoreError::from)
            .map_err(ApiError::from)?;

        let conflicts: Vec<Conflict> = termtable::detect_conflicts(&candidate, &[], &snapshot);
        let message: String = format!("{} conflict(s) detected", conflicts.len());
        Ok(DetectConflictsResponse {
            conflicts: conflicts.into_iter().map(conflict_info).collect(),
            message,
        })
    }

    /// Generates a schedule for the requested subjects. Read-only: the
    /// returned entries are drafts the caller may commit.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed input or broken references. Search
    /// exhaustion is reported in the response status, not as an error.
    pub fn generate_schedules(
        &self,
        request: &GenerateSchedulesRequest,
    ) -> Result<GenerateSchedulesResponse, ApiError> {
        let term: Term = parse_term(&request.semester, request.academic_year)?;
        let mut snapshot: TermSnapshot = self.load(&term)?;
        let subject_ids: Vec<SubjectId> = request
            .subject_ids
            .iter()
            .map(|id| SubjectId::new(id))
            .collect();
        let options: GenerationOptionsPayload = request.options.clone().unwrap_or_default();

        // Published entries are immutable inputs to generation unless the
        // caller explicitly releases the requested subjects; released
        // entries leave the search universe but are never mutated here.
        if options.release_published {
            let requested: BTreeSet<&SubjectId> = subject_ids.iter().collect();
            snapshot
                .entries
                .retain(|e| !(e.status.is_active() && requested.contains(&e.subject)));
        }

        let limits: SearchLimits = SearchLimits::new(
            options.max_trials.unwrap_or(SearchLimits::DEFAULT_MAX_TRIALS),
            options
                .max_backtracks
                .unwrap_or(SearchLimits::DEFAULT_MAX_BACKTRACKS),
        );
        let cancel: CancelToken = options.time_limit_ms.map_or_else(CancelToken::none, |ms| {
            CancelToken::deadline_in(Duration::from_millis(ms))
        });

        let outcome = generate_assignment(&snapshot, &subject_ids, &limits, &cancel)?;

        let message: String = format!(
            "Generation {}: {} of {} subject(s) placed",
            outcome.status,
            outcome.assigned.len(),
            outcome.assigned.len() + outcome.unresolved.len()
        );
        Ok(GenerateSchedulesResponse {
            status: outcome.status.as_str().to_string(),
            assigned: outcome.assigned.iter().map(entry_info).collect(),
            unresolved: outcome
                .unresolved
                .into_iter()
                .map(unresolved_info)
                .collect(),
            trials: outcome.trials,
            backtracks: outcome.backtracks,
            message,
        })
    }

    /// Validates and commits one entry (create or update mode).
    ///
    /// # Errors
    ///
    /// Returns an error on malformed input, broken references, detected
    /// conflicts, or a commit that keeps racing concurrent writers.
    pub fn validate_and_commit(
        &self,
        request: &CommitEntryRequest,
    ) -> Result<CommitEntryResponse, ApiError> {
        let term: Term = parse_term(&request.semester, request.academic_year)?;
        let entry: ScheduleEntry = parse_entry(&request.entry, term)?;
        let entry_id: EntryId = entry.entry_id.clone();

        let command: Command = match request.mode.as_str() {
            "create" => Command::CreateEntry { entry },
            "update" => {
                if request.entry.entry_id.is_none() {
                    return Err(ApiError::InvalidInput {
                        field: String::from("entry.entry_id"),
                        message: String::from("entry_id is required in update mode"),
                    });
                }
                Command::UpdateEntry {
                    entry_id: entry_id.clone(),
                    patch: EntryPatch {
                        faculty: Some(entry.faculty),
                        classroom: Some(entry.classroom),
                        time_slots: Some(entry.time_slots),
                    },
                }
            }
            other => {
                return Err(ApiError::InvalidInput {
                    field: String::from("mode"),
                    message: format!("'{other}' is not a valid mode (create, update)"),
                });
            }
        };

        let (committed, revision): (ScheduleEntry, u64) =
            self.commit_with_retry(&term, |snapshot| {
                let transition: TransitionResult = apply(snapshot, command.clone())?;
                let committed: ScheduleEntry = transition
                    .entries
                    .iter()
                    .find(|e| e.entry_id == entry_id)
                    .cloned()
                    .ok_or_else(|| ApiError::Internal {
                        message: format!("Committed entry '{entry_id}' missing from transition"),
                    })?;
                Ok((transition, committed))
            })?;

        let message: String = format!(
            "Schedule entry '{}' {}",
            committed.entry_id,
            if request.mode == "create" {
                "created as draft"
            } else {
                "updated"
            }
        );
        Ok(CommitEntryResponse {
            entry: entry_info(&committed),
            revision,
            message,
        })
    }

    /// Publishes a batch of draft entries atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any member conflicts (the whole batch fails) or
    /// the commit keeps racing concurrent writers.
    pub fn publish_entries(
        &self,
        request: &PublishEntriesRequest,
    ) -> Result<PublishEntriesResponse, ApiError> {
        let term: Term = parse_term(&request.semester, request.academic_year)?;
        let entry_ids: Vec<EntryId> = request
            .entry_ids
            .iter()
            .map(|id| EntryId::new(id))
            .collect();
        let unique: BTreeSet<&EntryId> = entry_ids.iter().collect();
        let published: usize = unique.len();

        let ((), revision): ((), u64) = self.commit_with_retry(&term, |snapshot| {
            let transition: TransitionResult = apply(
                snapshot,
                Command::PublishEntries {
                    entry_ids: entry_ids.clone(),
                },
            )?;
            Ok((transition, ()))
        })?;

        Ok(PublishEntriesResponse {
            published,
            revision,
            message: format!("{published} entry(ies) published for {term}"),
        })
    }

    /// Archives every active entry in the term.
    ///
    /// # Errors
    ///
    /// Returns an error if the term is unknown or the commit keeps racing
    /// concurrent writers.
    pub fn archive_term(
        &self,
        request: &ArchiveTermRequest,
    ) -> Result<ArchiveTermResponse, ApiError> {
        let term: Term = parse_term(&request.semester, request.academic_year)?;

        let (archived, revision): (usize, u64) = self.commit_with_retry(&term, |snapshot| {
            let flipped: usize = snapshot.active_entries().count();
            let transition: TransitionResult =
                apply(snapshot, Command::ArchiveTerm { term })?;
            Ok((transition, flipped))
        })?;

        Ok(ArchiveTermResponse {
            archived,
            revision,
            message: format!("{archived} entry(ies) archived for {term}"),
        })
    }

    /// Deletes an entry and recomputes the derived faculty aggregates.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is unknown or the commit keeps racing
    /// concurrent writers.
    pub fn delete_entry(
        &self,
        request: &DeleteEntryRequest,
    ) -> Result<DeleteEntryResponse, ApiError> {
        let term: Term = parse_term(&request.semester, request.academic_year)?;
        let entry_id: EntryId = EntryId::new(&request.entry_id);

        let (faculty_loads, revision): (Vec<FacultyLoad>, u64) =
            self.commit_with_retry(&term, |snapshot| {
                let transition: TransitionResult = apply(
                    snapshot,
                    Command::DeleteEntry {
                        entry_id: entry_id.clone(),
                    },
                )?;
                let loads: Vec<FacultyLoad> = transition.faculty_loads.clone();
                Ok((transition, loads))
            })?;

        Ok(DeleteEntryResponse {
            revision,
            faculty_loads: faculty_loads.iter().map(load_info).collect(),
            message: format!("Schedule entry '{entry_id}' deleted"),
        })
    }

    fn load(&self, term: &Term) -> Result<TermSnapshot, ApiError> {
        self.store.load_snapshot(term).map_err(map_store_error)
    }

    /// The detect-then-commit loop: the commit is the sole critical
    /// section for concurrent requests on the same term. On staleness the
    /// snapshot is reloaded and the command fully re-validated against the
    /// latest persisted state before retrying.
    fn commit_with_retry<T, F>(&self, term: &Term, build: F) -> Result<(T, u64), ApiError>
    where
        F: Fn(&TermSnapshot) -> Result<(TransitionResult, T), ApiError>,
    {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            let snapshot: TermSnapshot = self.load(term)?;
            let (transition, meta) = build(&snapshot)?;
            match self.store.commit(term, snapshot.revision, &transition) {
                Ok(revision) => return Ok((meta, revision)),
                Err(StoreError::StaleRevision { .. }) => {
                    if attempts >= self.max_commit_attempts {
                        return Err(ApiError::StaleCommit { attempts });
                    }
                    tracing::warn!(
                        "Stale snapshot for {} on commit attempt {}; reloading",
                        term,
                        attempts
                    );
                }
                Err(err) => return Err(map_store_error(err)),
            }
        }
    }
}

fn map_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::TermNotFound { term } => ApiError::ResourceNotFound {
            resource_type: String::from("Term"),
            message: format!("No schedule data for {term}"),
        },
        StoreError::Backend(message) => ApiError::Internal { message },
        StoreError::StaleRevision { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

fn parse_term(semester: &str, academic_year: u16) -> Result<Term, ApiError> {
    let semester: Semester = semester.parse().map_err(|err: DomainError| {
        ApiError::InvalidInput {
            field: String::from("semester"),
            message: err.to_string(),
        }
    })?;
    validate_academic_year(academic_year).map_err(|err| ApiError::InvalidInput {
        field: String::from("academic_year"),
        message: err.to_string(),
    })?;
    Ok(Term::new(semester, AcademicYear::new(academic_year)))
}

fn parse_time(field: &str, value: &str) -> Result<Time, ApiError> {
    Time::parse(value, format_description!("[hour]:[minute]")).map_err(|_| {
        ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("'{value}' is not a valid HH:MM time"),
        }
    })
}

fn parse_slot(field: &str, payload: &TimeSlotPayload) -> Result<TimeSlot, ApiError> {
    let day: WeekDay = payload
        .day
        .parse()
        .map_err(|err: DomainError| ApiError::InvalidInput {
            field: field.to_string(),
            message: err.to_string(),
        })?;
    let start: Time = parse_time(field, &payload.start)?;
    let end: Time = parse_time(field, &payload.end)?;
    TimeSlot::new(day, start, end).map_err(|err| ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    })
}

fn parse_entry(payload: &ScheduleEntryPayload, term: Term) -> Result<ScheduleEntry, ApiError> {
    let subject: SubjectId = SubjectId::new(&payload.subject_id);
    let entry_id: EntryId = payload
        .entry_id
        .as_deref()
        .map_or_else(|| EntryId::new(&format!("MAN-{subject}")), EntryId::new);

    let mut time_slots: Vec<TimeSlot> = Vec::with_capacity(payload.time_slots.len());
    for slot in &payload.time_slots {
        time_slots.push(parse_slot("time_slots", slot)?);
    }

    Ok(ScheduleEntry::new(
        entry_id,
        subject,
        FacultyId::new(&payload.faculty_id),
        ClassroomId::new(&payload.classroom_id),
        time_slots,
        term,
        EntryStatus::Draft,
    ))
}

fn format_time(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

fn slot_info(slot: &TimeSlot) -> TimeSlotInfo {
    TimeSlotInfo {
        day: slot.day().as_str().to_string(),
        start: format_time(slot.start()),
        end: format_time(slot.end()),
    }
}

fn entry_info(entry: &ScheduleEntry) -> ScheduleEntryInfo {
    ScheduleEntryInfo {
        entry_id: entry.entry_id.value().to_string(),
        subject_id: entry.subject.value().to_string(),
        faculty_id: entry.faculty.value().to_string(),
        classroom_id: entry.classroom.value().to_string(),
        time_slots: entry.time_slots.iter().map(slot_info).collect(),
        term: entry.term.to_string(),
        status: entry.status.as_str().to_string(),
    }
}

fn conflict_info(conflict: Conflict) -> ConflictInfo {
    ConflictInfo {
        constraint: conflict.kind.as_str().to_string(),
        existing_entry_id: conflict
            .existing_entry
            .map(|id| id.value().to_string()),
        explanation: conflict.explanation,
    }
}

fn unresolved_info(unresolved: UnresolvedSubject) -> UnresolvedSubjectInfo {
    UnresolvedSubjectInfo {
        subject_id: unresolved.subject.value().to_string(),
        blocking_constraint: unresolved
            .blocking_constraint
            .map(|kind| kind.as_str().to_string()),
        reason: unresolved.detail,
    }
}

fn load_info(load: &FacultyLoad) -> FacultyLoadInfo {
    FacultyLoadInfo {
        faculty_id: load.faculty_id.value().to_string(),
        assigned_hours: load.assigned_hours(),
        preparations: load.preparations,
    }
}
