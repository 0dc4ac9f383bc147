// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The assignment search engine.
//!
//! Constraint-ordered backtracking over the subjects that need placement:
//! subjects are ordered most-constrained-first, candidate
//! `(faculty, classroom, slot-set)` triples are enumerated in a
//! deterministic total order, and every trial placement runs the conflict
//! detector against the entries committed so far. Backtracking uses an
//! explicit frame stack with undo records rather than native recursion so
//! cancellation and budget checks run at every iteration.
//!
//! ## Invariants
//!
//! - The engine never mutates the snapshot; placed entries are returned as
//!   drafts for the caller to persist.
//! - Repeated runs on identical input produce identical output.
//! - On cancellation or budget exhaustion the engine returns whatever it
//!   has placed so far rather than blocking.

use crate::constraint::{CandidateScore, ConstraintKind};
use crate::detect::detect_conflicts;
use crate::error::CoreError;
use crate::snapshot::TermSnapshot;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use termtable_domain::{
    Classroom, ClassroomId, DomainError, EntryId, EntryStatus, Faculty, FacultyId,
    ScheduleEntry, Subject, SubjectId, Term, TimeSlot, find_self_overlap,
    validate_subject,
};
use time::Time;

/// Start-offset granularity when tiling a slot inside a window, in minutes.
const OFFSET_STEP_MINUTES: u32 = 30;

/// How many candidates to sample when explaining why a subject could not
/// be placed.
const EXPLAIN_SAMPLE: usize = 8;

/// Budget bounds for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of candidate placements to trial.
    pub max_trials: u32,
    /// Maximum number of undo operations before the search stops
    /// backtracking and fails forward.
    pub max_backtracks: u32,
}

impl SearchLimits {
    /// Default trial budget.
    pub const DEFAULT_MAX_TRIALS: u32 = 20_000;

    /// Default backtrack budget.
    pub const DEFAULT_MAX_BACKTRACKS: u32 = 1_000;

    /// Creates new `SearchLimits`.
    #[must_use]
    pub const fn new(max_trials: u32, max_backtracks: u32) -> Self {
        Self {
            max_trials,
            max_backtracks,
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_TRIALS, Self::DEFAULT_MAX_BACKTRACKS)
    }
}

/// Cooperative cancellation for a generation run.
///
/// Checked at every search iteration. A token can carry a caller-owned
/// flag, a deadline, or both; the default token never cancels.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Creates a token that never cancels.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            flag: None,
            deadline: None,
        }
    }

    /// Creates a token backed by a caller-owned flag.
    #[must_use]
    pub const fn with_flag(flag: Arc<AtomicBool>) -> Self {
        Self {
            flag: Some(flag),
            deadline: None,
        }
    }

    /// Creates a token that cancels at `deadline`.
    #[must_use]
    pub const fn with_deadline(deadline: Instant) -> Self {
        Self {
            flag: None,
            deadline: Some(deadline),
        }
    }

    /// Creates a token that cancels after `timeout` from now.
    #[must_use]
    pub fn deadline_in(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Returns whether the run should stop.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        let flagged: bool = self
            .flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        flagged || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Terminal status of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Every requested subject was placed.
    Satisfied,
    /// Some subjects were placed; `unresolved` lists the rest with their
    /// blocking reasons.
    PartiallySatisfied,
    /// No subject could be placed at all.
    Infeasible,
}

impl GenerationStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Satisfied => "satisfied",
            Self::PartiallySatisfied => "partially-satisfied",
            Self::Infeasible => "infeasible",
        }
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A subject the engine could not place, with its blocking reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedSubject {
    /// The subject that could not be placed.
    pub subject: SubjectId,
    /// The constraint that dominated the failed attempts, when one did.
    pub blocking_constraint: Option<ConstraintKind>,
    /// Human-readable blocking reason.
    pub detail: String,
}

/// The result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Terminal status.
    pub status: GenerationStatus,
    /// Draft entries for every placed subject, ordered by subject id.
    /// Nothing is persisted by the engine.
    pub assigned: Vec<ScheduleEntry>,
    /// Subjects that could not be placed, with per-subject reasons.
    pub unresolved: Vec<UnresolvedSubject>,
    /// Candidate placements trialled.
    pub trials: u32,
    /// Undo operations performed.
    pub backtracks: u32,
}

/// A candidate `(faculty, classroom, slot-set)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    faculty: FacultyId,
    classroom: ClassroomId,
    slots: Vec<TimeSlot>,
    score: CandidateScore,
}

/// A decision point: one subject and its remaining candidates.
#[derive(Debug)]
struct Frame {
    order_idx: usize,
    candidates: Vec<Candidate>,
    cursor: usize,
}

/// Why the search stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Halt {
    Cancelled,
    TrialBudget,
}

/// Per-subject placement bookkeeping during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlacementState {
    Unplaced,
    Placed,
    Failed,
    Halted,
}

/// Searches for a full assignment of the requested subjects.
///
/// # Arguments
///
/// * `snapshot` - The immutable term universe (pre-existing entries,
///   faculty, classrooms, subjects)
/// * `subject_ids` - The subjects needing placement (duplicates ignored)
/// * `limits` - Trial and backtrack budgets
/// * `cancel` - Cooperative cancellation token
///
/// # Returns
///
/// A `GenerationOutcome`; the engine distinguishes `Satisfied`,
/// `PartiallySatisfied`, and `Infeasible` by how much of the request it
/// placed. Unresolved subjects carry the specific constraint that blocked
/// their attempts, derived from the conflict detector.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` when the snapshot or the request
/// references missing data, or a requested subject has invalid units.
/// Search exhaustion is never an error.
#[allow(clippy::too_many_lines)]
pub fn generate_assignment(
    snapshot: &TermSnapshot,
    subject_ids: &[SubjectId],
    limits: &SearchLimits,
    cancel: &CancelToken,
) -> Result<GenerationOutcome, CoreError> {
    snapshot.validate_references()?;

    // Resolve and validate the request, dropping duplicate ids.
    let mut seen: BTreeSet<&SubjectId> = BTreeSet::new();
    let mut requested: Vec<&Subject> = Vec::new();
    for subject_id in subject_ids {
        if !seen.insert(subject_id) {
            continue;
        }
        let subject: &Subject =
            snapshot
                .subject_by_id(subject_id)
                .ok_or_else(|| DomainError::UnknownSubject {
                    subject: subject_id.clone(),
                })?;
        validate_subject(subject)?;
        requested.push(subject);
    }

    let order: Vec<&Subject> = order_subjects(snapshot, requested);
    let total: usize = order.len();

    let mut state: Vec<PlacementState> = vec![PlacementState::Unplaced; total];
    let mut reasons: BTreeMap<usize, UnresolvedSubject> = BTreeMap::new();

    // Pre-pass: subjects with an empty faculty or classroom pool can never
    // be placed; backtracking will not help them.
    for (idx, subject) in order.iter().enumerate() {
        if qualified_faculty(snapshot, subject).is_empty() {
            state[idx] = PlacementState::Failed;
            reasons.insert(
                idx,
                UnresolvedSubject {
                    subject: subject.subject_id.clone(),
                    blocking_constraint: None,
                    detail: format!(
                        "No active faculty in department '{}' is qualified for this subject",
                        subject.department
                    ),
                },
            );
        } else if compatible_classrooms(snapshot, subject).is_empty() {
            state[idx] = PlacementState::Failed;
            reasons.insert(
                idx,
                UnresolvedSubject {
                    subject: subject.subject_id.clone(),
                    blocking_constraint: None,
                    detail: String::from(
                        "No available classroom matches this subject's type and capacity requirements",
                    ),
                },
            );
        }
    }

    let mut stack: Vec<Frame> = Vec::new();
    let mut placements: Vec<ScheduleEntry> = Vec::new();
    let mut trials: u32 = 0;
    let mut backtracks: u32 = 0;
    let mut halt: Option<Halt> = None;
    let mut current: Option<Frame> = None;

    loop {
        if halt.is_none() {
            halt = check_halt(cancel, trials, limits);
        }
        if let Some(reason) = halt {
            if let Some(frame) = current.take() {
                state[frame.order_idx] = PlacementState::Halted;
            }
            for slot_state in &mut state {
                if *slot_state == PlacementState::Unplaced {
                    *slot_state = PlacementState::Halted;
                }
            }
            tracing::warn!(
                "Generation halted ({}) after {} trials and {} backtracks",
                halt_label(reason),
                trials,
                backtracks
            );
            break;
        }

        let mut frame: Frame = match current.take() {
            Some(frame) => frame,
            None => {
                let Some(idx) = state.iter().position(|s| *s == PlacementState::Unplaced)
                else {
                    break;
                };
                Frame {
                    order_idx: idx,
                    candidates: build_candidates(snapshot, order[idx], &placements),
                    cursor: 0,
                }
            }
        };

        // Trial candidates in score order until one survives detection.
        let mut placed: bool = false;
        while frame.cursor < frame.candidates.len() {
            if check_halt(cancel, trials, limits).is_some() {
                break;
            }
            let candidate: Candidate = frame.candidates[frame.cursor].clone();
            frame.cursor += 1;
            trials += 1;

            let entry: ScheduleEntry =
                entry_from(snapshot.term, order[frame.order_idx], &candidate);
            let conflicts = detect_conflicts(&entry, &placements, snapshot);
            if conflicts.is_empty() {
                placements.push(entry);
                placed = true;
                break;
            }
        }

        if placed {
            state[frame.order_idx] = PlacementState::Placed;
            stack.push(frame);
            continue;
        }

        if check_halt(cancel, trials, limits).is_some() {
            // Re-queue so the halt branch attributes the right subject.
            current = Some(frame);
            continue;
        }

        // Candidates exhausted: undo the most recent placement and retry it
        // with its next-best candidate, or fail this subject forward once
        // the backtrack budget is spent.
        if backtracks < limits.max_backtracks {
            if let Some(prev) = stack.pop() {
                backtracks += 1;
                placements.pop();
                state[prev.order_idx] = PlacementState::Unplaced;
                state[frame.order_idx] = PlacementState::Unplaced;
                tracing::debug!(
                    "Backtracking from subject '{}' to retry '{}'",
                    order[frame.order_idx].subject_id,
                    order[prev.order_idx].subject_id
                );
                current = Some(prev);
                continue;
            }
        }
        state[frame.order_idx] = PlacementState::Failed;
    }

    // Explain every failure against the final assignment so the caller can
    // act on the reasons (relax capacity, add availability, and so on).
    let mut unresolved: Vec<UnresolvedSubject> = Vec::new();
    for (idx, subject) in order.iter().enumerate() {
        match state[idx] {
            PlacementState::Placed => {}
            PlacementState::Failed => {
                let reason = reasons
                    .remove(&idx)
                    .unwrap_or_else(|| explain_failure(snapshot, subject, &placements));
                unresolved.push(reason);
            }
            PlacementState::Halted => {
                let detail: String = match halt {
                    Some(Halt::Cancelled) => String::from(
                        "Generation was cancelled before this subject could be placed",
                    ),
                    _ => format!(
                        "The trial budget ({}) was exhausted before this subject could be placed",
                        limits.max_trials
                    ),
                };
                unresolved.push(UnresolvedSubject {
                    subject: subject.subject_id.clone(),
                    blocking_constraint: None,
                    detail,
                });
            }
            PlacementState::Unplaced => {
                // Unreachable: the loop only exits with no Unplaced slots
                // or after the halt branch converted them.
            }
        }
    }

    let mut assigned: Vec<ScheduleEntry> = placements;
    assigned.sort_by(|a, b| a.subject.cmp(&b.subject));

    let status: GenerationStatus = if unresolved.is_empty() {
        GenerationStatus::Satisfied
    } else if assigned.is_empty() {
        GenerationStatus::Infeasible
    } else {
        GenerationStatus::PartiallySatisfied
    };

    tracing::info!(
        "Generation {}: {} placed, {} unresolved, {} trials, {} backtracks",
        status,
        assigned.len(),
        unresolved.len(),
        trials,
        backtracks
    );

    Ok(GenerationOutcome {
        status,
        assigned,
        unresolved,
        trials,
        backtracks,
    })
}

fn check_halt(cancel: &CancelToken, trials: u32, limits: &SearchLimits) -> Option<Halt> {
    // Trial budget first: it is cheap and deterministic.
    if trials >= limits.max_trials {
        return Some(Halt::TrialBudget);
    }
    if cancel.is_cancelled() {
        return Some(Halt::Cancelled);
    }
    None
}

const fn halt_label(halt: Halt) -> &'static str {
    match halt {
        Halt::Cancelled => "cancelled",
        Halt::TrialBudget => "trial budget exhausted",
    }
}

/// Orders subjects most-constrained-first: ascending product of pool
/// sizes, then descending required minutes, then subject id.
fn order_subjects<'a>(
    snapshot: &TermSnapshot,
    requested: Vec<&'a Subject>,
) -> Vec<&'a Subject> {
    let mut keyed: Vec<(usize, std::cmp::Reverse<u32>, SubjectId, &Subject)> = requested
        .into_iter()
        .map(|subject| {
            let faculty_pool: usize = qualified_faculty(snapshot, subject).len();
            let room_pool: usize = compatible_classrooms(snapshot, subject).len();
            (
                faculty_pool.saturating_mul(room_pool),
                std::cmp::Reverse(subject.total_minutes()),
                subject.subject_id.clone(),
                subject,
            )
        })
        .collect();
    keyed.sort_by(|a, b| (a.0, &a.1, &a.2).cmp(&(b.0, &b.1, &b.2)));
    keyed.into_iter().map(|(_, _, _, subject)| subject).collect()
}

/// The faculty pool for a subject: same department, active.
fn qualified_faculty<'a>(snapshot: &'a TermSnapshot, subject: &Subject) -> Vec<&'a Faculty> {
    let mut pool: Vec<&Faculty> = snapshot
        .faculty
        .iter()
        .filter(|f| f.is_active() && f.department == subject.department)
        .collect();
    pool.sort_by(|a, b| a.faculty_id.cmp(&b.faculty_id));
    pool
}

/// The classroom pool for a subject: available, type-compatible, and big
/// enough for the expected enrollment when one is known.
fn compatible_classrooms<'a>(
    snapshot: &'a TermSnapshot,
    subject: &Subject,
) -> Vec<&'a Classroom> {
    let mut pool: Vec<&Classroom> = snapshot
        .classrooms
        .iter()
        .filter(|room| room.is_available())
        .filter(|room| {
            if subject.requires_lab_room() {
                room.room_type.is_lab_capable()
            } else {
                room.room_type != termtable_domain::ClassroomType::Laboratory
            }
        })
        .filter(|room| {
            subject
                .expected_enrollment
                .is_none_or(|enrollment| room.capacity >= enrollment)
        })
        .collect();
    pool.sort_by(|a, b| a.classroom_id.cmp(&b.classroom_id));
    pool
}

/// Current committed minutes and distinct subjects for a faculty member,
/// over the snapshot's active entries plus this run's placements.
fn committed_load(
    faculty_id: &FacultyId,
    snapshot: &TermSnapshot,
    placements: &[ScheduleEntry],
) -> (u32, BTreeSet<SubjectId>) {
    let mut minutes: u32 = 0;
    let mut subjects: BTreeSet<SubjectId> = BTreeSet::new();
    for entry in snapshot.active_entries().chain(placements.iter()) {
        if &entry.faculty == faculty_id {
            minutes = minutes.saturating_add(entry.scheduled_minutes());
            subjects.insert(entry.subject.clone());
        }
    }
    (minutes, subjects)
}

/// Enumerates candidates for one subject in deterministic score order.
fn build_candidates(
    snapshot: &TermSnapshot,
    subject: &Subject,
    placements: &[ScheduleEntry],
) -> Vec<Candidate> {
    let required: u32 = subject.total_minutes();
    let rooms: Vec<&Classroom> = compatible_classrooms(snapshot, subject);
    let mut candidates: Vec<Candidate> = Vec::new();

    for faculty in qualified_faculty(snapshot, subject) {
        let (current_minutes, preparations) =
            committed_load(&faculty.faculty_id, snapshot, placements);

        // Headroom pre-filter; the detector would reject these anyway.
        let resulting: u32 = current_minutes.saturating_add(required);
        if resulting > faculty.max_load_minutes() {
            continue;
        }
        if !preparations.contains(&subject.subject_id)
            && preparations.len() + 1 > usize::from(faculty.max_preparations)
        {
            continue;
        }

        let slot_sets: Vec<Vec<TimeSlot>> = tile_slot_sets(&faculty.availability, required);
        for room in &rooms {
            let capacity_waste: u32 = subject
                .expected_enrollment
                .map_or(0, |enrollment| room.capacity.saturating_sub(enrollment));
            for slots in &slot_sets {
                candidates.push(Candidate {
                    faculty: faculty.faculty_id.clone(),
                    classroom: room.classroom_id.clone(),
                    slots: slots.clone(),
                    score: CandidateScore {
                        slot_count: slots.len(),
                        resulting_load_minutes: resulting,
                        capacity_waste,
                    },
                });
            }
        }
    }

    // Total order: score, then faculty id, then classroom id, then slots.
    candidates.sort_by(|a, b| {
        a.score
            .cmp(&b.score)
            .then_with(|| a.faculty.cmp(&b.faculty))
            .then_with(|| a.classroom.cmp(&b.classroom))
            .then_with(|| slots_key(&a.slots).cmp(&slots_key(&b.slots)))
    });
    candidates
}

fn slots_key(slots: &[TimeSlot]) -> Vec<(termtable_domain::WeekDay, Time, Time)> {
    slots.iter().map(TimeSlot::ordering_key).collect()
}

/// Tiles a faculty member's availability windows into candidate slot sets
/// accumulating `required` minutes.
///
/// Single-window blocks are generated at 30-minute start offsets; when no
/// single window suffices (or as lower-ranked alternatives), greedy
/// multi-window tilings are generated starting from each window in
/// canonical order. Self-overlapping tilings (possible when windows
/// overlap) are discarded.
fn tile_slot_sets(windows: &[TimeSlot], required: u32) -> Vec<Vec<TimeSlot>> {
    if required == 0 {
        return Vec::new();
    }
    let mut sorted: Vec<TimeSlot> = windows.to_vec();
    sorted.sort_by_key(TimeSlot::ordering_key);

    let mut sets: Vec<Vec<TimeSlot>> = Vec::new();

    // Single contiguous blocks.
    for window in &sorted {
        let length: u32 = window.duration_minutes();
        if length < required {
            continue;
        }
        let mut offset: u32 = 0;
        while offset + required <= length {
            if let (Some(start), Some(end)) = (
                advance(window.start(), offset),
                advance(window.start(), offset + required),
            ) {
                if let Ok(slot) = TimeSlot::new(window.day(), start, end) {
                    push_unique(vec![slot], &mut sets);
                }
            }
            offset += OFFSET_STEP_MINUTES;
        }
    }

    // Greedy multi-window tilings, one starting at each window.
    for start_idx in 0..sorted.len() {
        let mut remaining: u32 = required;
        let mut blocks: Vec<TimeSlot> = Vec::new();
        for window in &sorted[start_idx..] {
            if remaining == 0 {
                break;
            }
            let take: u32 = remaining.min(window.duration_minutes());
            if take == 0 {
                continue;
            }
            if let Some(end) = advance(window.start(), take) {
                if let Ok(block) = TimeSlot::new(window.day(), window.start(), end) {
                    blocks.push(block);
                    remaining -= take;
                }
            }
        }
        if remaining == 0 && blocks.len() >= 2 && find_self_overlap(&blocks).is_none() {
            push_unique(blocks, &mut sets);
        }
    }

    sets
}

fn push_unique(set: Vec<TimeSlot>, sets: &mut Vec<Vec<TimeSlot>>) {
    if !sets.contains(&set) {
        sets.push(set);
    }
}

/// Adds whole minutes to a time of day; `None` past midnight.
fn advance(time: Time, minutes: u32) -> Option<Time> {
    let total: u32 = u32::from(time.hour()) * 60 + u32::from(time.minute()) + minutes;
    if total >= 24 * 60 {
        return None;
    }
    let hour: u8 = u8::try_from(total / 60).ok()?;
    let minute: u8 = u8::try_from(total % 60).ok()?;
    Time::from_hms(hour, minute, 0).ok()
}

/// Materializes a candidate as a draft schedule entry.
///
/// Generated ids are deterministic per subject so repeated runs on the
/// same input produce identical output.
fn entry_from(term: Term, subject: &Subject, candidate: &Candidate) -> ScheduleEntry {
    ScheduleEntry::new(
        EntryId::new(&format!("GEN-{}", subject.subject_id)),
        subject.subject_id.clone(),
        candidate.faculty.clone(),
        candidate.classroom.clone(),
        candidate.slots.clone(),
        term,
        EntryStatus::Draft,
    )
}

/// Explains why a subject could not be placed, against the final
/// assignment: samples its best candidates, tallies the conflicts the
/// detector reports, and cites the dominant constraint.
fn explain_failure(
    snapshot: &TermSnapshot,
    subject: &Subject,
    placements: &[ScheduleEntry],
) -> UnresolvedSubject {
    let candidates: Vec<Candidate> = build_candidates(snapshot, subject, placements);
    if candidates.is_empty() {
        return diagnose_empty_pool(snapshot, subject, placements);
    }

    let mut tally: BTreeMap<ConstraintKind, (u32, String)> = BTreeMap::new();
    for candidate in candidates.iter().take(EXPLAIN_SAMPLE) {
        let entry: ScheduleEntry = entry_from(snapshot.term, subject, candidate);
        for conflict in detect_conflicts(&entry, placements, snapshot) {
            tally
                .entry(conflict.kind)
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, conflict.explanation));
        }
    }

    let dominant: Option<(&ConstraintKind, &(u32, String))> = tally
        .iter()
        .max_by(|a, b| a.1.0.cmp(&b.1.0).then_with(|| b.0.cmp(a.0)));

    dominant.map_or_else(
        || UnresolvedSubject {
            subject: subject.subject_id.clone(),
            blocking_constraint: None,
            detail: String::from(
                "No conflict blocks this subject against the final assignment; retry with a larger search budget",
            ),
        },
        |(kind, (_, explanation))| UnresolvedSubject {
            subject: subject.subject_id.clone(),
            blocking_constraint: Some(*kind),
            detail: explanation.clone(),
        },
    )
}

/// Diagnoses why candidate enumeration came up empty: the faculty pool
/// filters (load headroom, preparation headroom) or window tiling.
fn diagnose_empty_pool(
    snapshot: &TermSnapshot,
    subject: &Subject,
    placements: &[ScheduleEntry],
) -> UnresolvedSubject {
    let pool: Vec<&Faculty> = qualified_faculty(snapshot, subject);
    if pool.is_empty() {
        return UnresolvedSubject {
            subject: subject.subject_id.clone(),
            blocking_constraint: None,
            detail: format!(
                "No active faculty in department '{}' is qualified for this subject",
                subject.department
            ),
        };
    }
    if compatible_classrooms(snapshot, subject).is_empty() {
        return UnresolvedSubject {
            subject: subject.subject_id.clone(),
            blocking_constraint: None,
            detail: String::from(
                "No available classroom matches this subject's type and capacity requirements",
            ),
        };
    }

    let required: u32 = subject.total_minutes();
    let mut load_blocked: u32 = 0;
    let mut prep_blocked: u32 = 0;
    let mut window_blocked: u32 = 0;
    for faculty in &pool {
        let (current_minutes, preparations) =
            committed_load(&faculty.faculty_id, snapshot, placements);
        if current_minutes.saturating_add(required) > faculty.max_load_minutes() {
            load_blocked += 1;
        } else if !preparations.contains(&subject.subject_id)
            && preparations.len() + 1 > usize::from(faculty.max_preparations)
        {
            prep_blocked += 1;
        } else if tile_slot_sets(&faculty.availability, required).is_empty() {
            window_blocked += 1;
        }
    }

    let (kind, detail): (ConstraintKind, String) =
        if load_blocked >= prep_blocked && load_blocked >= window_blocked && load_blocked > 0 {
            (
                ConstraintKind::FacultyOverload,
                String::from("Every qualified faculty member is at maximum weekly load"),
            )
        } else if prep_blocked >= window_blocked && prep_blocked > 0 {
            (
                ConstraintKind::PreparationLimit,
                String::from(
                    "Every qualified faculty member is at their preparation limit",
                ),
            )
        } else {
            (
                ConstraintKind::FacultyUnavailable,
                format!(
                    "No qualified faculty member's availability windows can cover the required {required} minutes per week"
                ),
            )
        };

    UnresolvedSubject {
        subject: subject.subject_id.clone(),
        blocking_constraint: Some(kind),
        detail,
    }
}
