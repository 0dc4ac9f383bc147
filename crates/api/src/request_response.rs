// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry transport-shaped primitives (day names, "HH:MM" times,
//! semester names) and are parsed into domain types at the service
//! boundary. Responses are serializable DTOs distinct from domain types.

/// A weekly time slot in transport shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlotPayload {
    /// Day name (e.g., "Monday").
    pub day: String,
    /// Start time, "HH:MM".
    pub start: String,
    /// End time, "HH:MM".
    pub end: String,
}

/// A schedule entry in transport shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntryPayload {
    /// The entry identifier. Optional on create; required on update.
    pub entry_id: Option<String>,
    /// The subject code.
    pub subject_id: String,
    /// The faculty code.
    pub faculty_id: String,
    /// The room code.
    pub classroom_id: String,
    /// The weekly time slots.
    pub time_slots: Vec<TimeSlotPayload>,
}

/// API request to detect conflicts for a proposed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectConflictsRequest {
    /// The semester name ("First", "Second", "Summer").
    pub semester: String,
    /// The starting calendar year of the academic year.
    pub academic_year: u16,
    /// The proposed entry.
    pub candidate: ScheduleEntryPayload,
}

/// One detected conflict.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConflictInfo {
    /// The violated constraint (e.g., "faculty-double-booking").
    pub constraint: String,
    /// The offending existing entry, if one is involved.
    pub existing_entry_id: Option<String>,
    /// Human-readable explanation.
    pub explanation: String,
}

/// API response for a conflict detection call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DetectConflictsResponse {
    /// Every detected conflict; empty when the placement is valid.
    pub conflicts: Vec<ConflictInfo>,
    /// A summary message.
    pub message: String,
}

/// Optional knobs for a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationOptionsPayload {
    /// Trial budget override.
    pub max_trials: Option<u32>,
    /// Backtrack budget override.
    pub max_backtracks: Option<u32>,
    /// Wall-clock limit for the search, in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Release existing entries for the requested subjects from the
    /// search universe. Defaults to false: published entries are
    /// immutable inputs to generation unless explicitly released.
    pub release_published: bool,
}

/// API request to generate a term schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSchedulesRequest {
    /// The semester name.
    pub semester: String,
    /// The starting calendar year of the academic year.
    pub academic_year: u16,
    /// The subjects needing sections.
    pub subject_ids: Vec<String>,
    /// Optional search knobs.
    pub options: Option<GenerationOptionsPayload>,
}

/// A weekly time slot in response shape.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeSlotInfo {
    /// Day name.
    pub day: String,
    /// Start time, "HH:MM".
    pub start: String,
    /// End time, "HH:MM".
    pub end: String,
}

/// A schedule entry in response shape.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleEntryInfo {
    /// The entry identifier.
    pub entry_id: String,
    /// The subject code.
    pub subject_id: String,
    /// The faculty code.
    pub faculty_id: String,
    /// The room code.
    pub classroom_id: String,
    /// The weekly time slots.
    pub time_slots: Vec<TimeSlotInfo>,
    /// The term, displayed (e.g., "First Semester 2025-2026").
    pub term: String,
    /// Lifecycle status ("draft", "published", "archived").
    pub status: String,
}

/// A subject the engine could not place.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnresolvedSubjectInfo {
    /// The subject code.
    pub subject_id: String,
    /// The dominant blocking constraint, when one was identified.
    pub blocking_constraint: Option<String>,
    /// Human-readable blocking reason.
    pub reason: String,
}

/// API response for a generation call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateSchedulesResponse {
    /// Terminal status: "satisfied", "partially-satisfied", "infeasible".
    pub status: String,
    /// Draft entries for every placed subject. Nothing is persisted.
    pub assigned: Vec<ScheduleEntryInfo>,
    /// Subjects that could not be placed, with reasons.
    pub unresolved: Vec<UnresolvedSubjectInfo>,
    /// Candidate placements trialled.
    pub trials: u32,
    /// Undo operations performed.
    pub backtracks: u32,
    /// A summary message.
    pub message: String,
}

/// API request to validate and commit one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEntryRequest {
    /// The semester name.
    pub semester: String,
    /// The starting calendar year of the academic year.
    pub academic_year: u16,
    /// "create" or "update".
    pub mode: String,
    /// The entry to validate and commit.
    pub entry: ScheduleEntryPayload,
}

/// API response for a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommitEntryResponse {
    /// The committed entry.
    pub entry: ScheduleEntryInfo,
    /// The store revision after the commit.
    pub revision: u64,
    /// A success message.
    pub message: String,
}

/// API request to publish a batch of draft entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishEntriesRequest {
    /// The semester name.
    pub semester: String,
    /// The starting calendar year of the academic year.
    pub academic_year: u16,
    /// The entries to publish together.
    pub entry_ids: Vec<String>,
}

/// API response for a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublishEntriesResponse {
    /// How many entries were published.
    pub published: usize,
    /// The store revision after the commit.
    pub revision: u64,
    /// A success message.
    pub message: String,
}

/// API request to archive a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveTermRequest {
    /// The semester name.
    pub semester: String,
    /// The starting calendar year of the academic year.
    pub academic_year: u16,
}

/// API response for a successful archive.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArchiveTermResponse {
    /// How many entries were archived.
    pub archived: usize,
    /// The store revision after the commit.
    pub revision: u64,
    /// A success message.
    pub message: String,
}

/// API request to delete an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEntryRequest {
    /// The semester name.
    pub semester: String,
    /// The starting calendar year of the academic year.
    pub academic_year: u16,
    /// The entry to delete.
    pub entry_id: String,
}

/// Derived load aggregate for one faculty member.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FacultyLoadInfo {
    /// The faculty code.
    pub faculty_id: String,
    /// Weekly teaching hours across the faculty member's active entries.
    pub assigned_hours: f64,
    /// Distinct subjects taught.
    pub preparations: usize,
}

/// API response for a successful delete.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeleteEntryResponse {
    /// The store revision after the commit.
    pub revision: u64,
    /// Recomputed load aggregates for every faculty member.
    pub faculty_loads: Vec<FacultyLoadInfo>,
    /// A success message.
    pub message: String,
}
