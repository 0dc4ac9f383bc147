// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the schedule lifecycle manager.

use super::helpers::{
    entry, lecture_room, lecture_subject, slot, snapshot_with, test_faculty, test_term,
};
use crate::{Command, CoreError, EntryPatch, TransitionResult, apply};
use termtable_domain::{
    AcademicYear, Classroom, ClassroomId, DomainError, EntryId, EntryStatus, Faculty,
    ScheduleEntry, Semester, Subject, Term, WeekDay,
};

#[test]
fn test_create_persists_as_draft() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room: Classroom = lecture_room("RM-101", 40);
    let subject: Subject = lecture_subject("CS101", 2.0);
    let snapshot = snapshot_with(
        vec![faculty.clone()],
        vec![room.clone()],
        vec![subject.clone()],
        vec![],
    );

    // The caller claims published; the lifecycle forces draft.
    let mut candidate: ScheduleEntry = entry(
        "E-1",
        &subject,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    candidate.status = EntryStatus::Published;

    let result: TransitionResult =
        apply(&snapshot, Command::CreateEntry { entry: candidate }).unwrap();

    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].status, EntryStatus::Draft);

    // Faculty aggregates are recomputed from the new entry set.
    let load = result
        .faculty_loads
        .iter()
        .find(|l| l.faculty_id == faculty.faculty_id)
        .unwrap();
    assert_eq!(load.assigned_minutes, 120);
    assert_eq!(load.preparations, 1);
}

#[test]
fn test_create_rejects_conflicts() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room: Classroom = lecture_room("RM-101", 40);
    let subject_a: Subject = lecture_subject("CS101", 2.0);
    let subject_b: Subject = lecture_subject("CS102", 2.0);
    let existing: ScheduleEntry = entry(
        "E-1",
        &subject_a,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    let snapshot = snapshot_with(
        vec![faculty.clone()],
        vec![room.clone()],
        vec![subject_a, subject_b.clone()],
        vec![existing],
    );

    let candidate: ScheduleEntry = entry(
        "E-2",
        &subject_b,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (9, 0), (11, 0))],
    );

    let result = apply(&snapshot, Command::CreateEntry { entry: candidate });
    let Err(CoreError::ConflictsDetected(conflicts)) = result else {
        panic!("expected ConflictsDetected");
    };
    assert!(!conflicts.is_empty());
}

#[test]
fn test_create_rejects_duplicate_id() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room: Classroom = lecture_room("RM-101", 40);
    let subject: Subject = lecture_subject("CS101", 2.0);
    let existing: ScheduleEntry = entry(
        "E-1",
        &subject,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    let snapshot = snapshot_with(
        vec![faculty.clone()],
        vec![room.clone()],
        vec![subject.clone()],
        vec![existing],
    );

    let duplicate: ScheduleEntry = entry(
        "E-1",
        &subject,
        &faculty,
        &room,
        vec![slot(WeekDay::Tuesday, (8, 0), (10, 0))],
    );
    let result = apply(&snapshot, Command::CreateEntry { entry: duplicate });
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DuplicateEntry { .. })
    ));
}

#[test]
fn test_create_rejects_unknown_subject() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room: Classroom = lecture_room("RM-101", 40);
    let known: Subject = lecture_subject("CS101", 2.0);
    let unknown: Subject = lecture_subject("CS999", 2.0);
    let snapshot = snapshot_with(
        vec![faculty.clone()],
        vec![room.clone()],
        vec![known],
        vec![],
    );

    let candidate: ScheduleEntry = entry(
        "E-1",
        &unknown,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    let result = apply(&snapshot, Command::CreateEntry { entry: candidate });
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::UnknownSubject { .. })
    ));
}

#[test]
fn test_create_rejects_undercovered_entry() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room: Classroom = lecture_room("RM-101", 40);
    let subject: Subject = lecture_subject("CS101", 3.0);
    let snapshot = snapshot_with(
        vec![faculty.clone()],
        vec![room.clone()],
        vec![subject.clone()],
        vec![],
    );

    // Two of the three required hours.
    let candidate: ScheduleEntry = entry(
        "E-1",
        &subject,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    let result = apply(&snapshot, Command::CreateEntry { entry: candidate });
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InsufficientScheduledTime { .. })
    ));
}

#[test]
fn test_update_excludes_own_placement() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room_a: Classroom = lecture_room("RM-101", 40);
    let room_b: Classroom = lecture_room("RM-102", 40);
    let subject: Subject = lecture_subject("CS101", 2.0);
    let existing: ScheduleEntry = entry(
        "E-1",
        &subject,
        &faculty,
        &room_a,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    let snapshot = snapshot_with(
        vec![faculty.clone()],
        vec![room_a, room_b.clone()],
        vec![subject.clone()],
        vec![existing],
    );

    // Moving rooms while keeping the same slots must not conflict with the
    // entry's own prior placement.
    let result: TransitionResult = apply(
        &snapshot,
        Command::UpdateEntry {
            entry_id: EntryId::new("E-1"),
            patch: EntryPatch {
                classroom: Some(room_b.classroom_id.clone()),
                ..EntryPatch::default()
            },
        },
    )
    .unwrap();

    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].classroom, room_b.classroom_id);
    assert_eq!(
        result.entries[0].time_slots,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))]
    );
}

#[test]
fn test_update_rejects_archived_entry() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room: Classroom = lecture_room("RM-101", 40);
    let subject: Subject = lecture_subject("CS101", 2.0);
    let mut archived: ScheduleEntry = entry(
        "E-1",
        &subject,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    archived.status = EntryStatus::Archived;
    let snapshot = snapshot_with(
        vec![faculty],
        vec![room],
        vec![subject],
        vec![archived],
    );

    let result = apply(
        &snapshot,
        Command::UpdateEntry {
            entry_id: EntryId::new("E-1"),
            patch: EntryPatch {
                classroom: Some(ClassroomId::new("RM-101")),
                ..EntryPatch::default()
            },
        },
    );
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::ArchivedEntryImmutable { .. })
    ));
}

#[test]
fn test_publish_batch_succeeds() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room: Classroom = lecture_room("RM-101", 40);
    let subject_a: Subject = lecture_subject("CS101", 2.0);
    let subject_b: Subject = lecture_subject("CS102", 2.0);
    let entries = vec![
        entry(
            "E-1",
            &subject_a,
            &faculty,
            &room,
            vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
        ),
        entry(
            "E-2",
            &subject_b,
            &faculty,
            &room,
            vec![slot(WeekDay::Monday, (10, 0), (12, 0))],
        ),
    ];
    let snapshot = snapshot_with(
        vec![faculty],
        vec![room],
        vec![subject_a, subject_b],
        entries,
    );

    let result: TransitionResult = apply(
        &snapshot,
        Command::PublishEntries {
            entry_ids: vec![EntryId::new("E-1"), EntryId::new("E-2")],
        },
    )
    .unwrap();

    assert!(result
        .entries
        .iter()
        .all(|e| e.status == EntryStatus::Published));
}

#[test]
fn test_publish_batch_fails_atomically() {
    // The two drafts conflict with each other: publishing both must fail
    // as a whole, leaving both statuses untouched.
    let faculty: Faculty = test_faculty("FAC-001");
    let room_a: Classroom = lecture_room("RM-101", 40);
    let room_b: Classroom = lecture_room("RM-102", 40);
    let subject_a: Subject = lecture_subject("CS101", 2.0);
    let subject_b: Subject = lecture_subject("CS102", 2.0);
    let entries = vec![
        entry(
            "E-1",
            &subject_a,
            &faculty,
            &room_a,
            vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
        ),
        entry(
            "E-2",
            &subject_b,
            &faculty,
            &room_b,
            vec![slot(WeekDay::Monday, (9, 0), (11, 0))],
        ),
    ];
    let snapshot = snapshot_with(
        vec![faculty],
        vec![room_a, room_b],
        vec![subject_a, subject_b],
        entries,
    );

    let result = apply(
        &snapshot,
        Command::PublishEntries {
            entry_ids: vec![EntryId::new("E-1"), EntryId::new("E-2")],
        },
    );

    let Err(CoreError::ConflictsDetected(conflicts)) = result else {
        panic!("expected ConflictsDetected");
    };
    assert!(!conflicts.is_empty());
    // The snapshot is untouched; both entries remain drafts.
    assert!(snapshot.entries.iter().all(|e| e.status == EntryStatus::Draft));
}

#[test]
fn test_publish_rejects_non_draft() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room: Classroom = lecture_room("RM-101", 40);
    let subject: Subject = lecture_subject("CS101", 2.0);
    let mut published: ScheduleEntry = entry(
        "E-1",
        &subject,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    published.status = EntryStatus::Published;
    let snapshot = snapshot_with(vec![faculty], vec![room], vec![subject], vec![published]);

    let result = apply(
        &snapshot,
        Command::PublishEntries {
            entry_ids: vec![EntryId::new("E-1")],
        },
    );
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidLifecycleTransition { .. })
    ));
}

#[test]
fn test_archive_term_flips_active_entries() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room: Classroom = lecture_room("RM-101", 40);
    let subject_a: Subject = lecture_subject("CS101", 2.0);
    let subject_b: Subject = lecture_subject("CS102", 2.0);
    let mut published: ScheduleEntry = entry(
        "E-1",
        &subject_a,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    published.status = EntryStatus::Published;
    let draft: ScheduleEntry = entry(
        "E-2",
        &subject_b,
        &faculty,
        &room,
        vec![slot(WeekDay::Tuesday, (8, 0), (10, 0))],
    );
    let snapshot = snapshot_with(
        vec![faculty],
        vec![room],
        vec![subject_a, subject_b],
        vec![published, draft],
    );

    let result: TransitionResult = apply(
        &snapshot,
        Command::ArchiveTerm { term: test_term() },
    )
    .unwrap();

    assert!(result
        .entries
        .iter()
        .all(|e| e.status == EntryStatus::Archived));

    // Archived entries leave the active universe: the faculty member's
    // derived load drops to zero.
    assert!(result.faculty_loads.iter().all(|l| l.assigned_minutes == 0));
}

#[test]
fn test_archive_rejects_other_term() {
    let snapshot = snapshot_with(vec![], vec![], vec![], vec![]);
    let other: Term = Term::new(Semester::Second, AcademicYear::new(2025));

    let result = apply(&snapshot, Command::ArchiveTerm { term: other });
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::TermMismatch { .. })
    ));
}

#[test]
fn test_delete_recomputes_faculty_loads() {
    let faculty: Faculty = test_faculty("FAC-001");
    let room: Classroom = lecture_room("RM-101", 40);
    let subject: Subject = lecture_subject("CS101", 2.0);
    let existing: ScheduleEntry = entry(
        "E-1",
        &subject,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    let snapshot = snapshot_with(
        vec![faculty.clone()],
        vec![room],
        vec![subject],
        vec![existing],
    );
    assert_eq!(
        snapshot.faculty_load(&faculty.faculty_id).assigned_minutes,
        120
    );

    let result: TransitionResult = apply(
        &snapshot,
        Command::DeleteEntry {
            entry_id: EntryId::new("E-1"),
        },
    )
    .unwrap();

    assert!(result.entries.is_empty());
    let load = result
        .faculty_loads
        .iter()
        .find(|l| l.faculty_id == faculty.faculty_id)
        .unwrap();
    assert_eq!(load.assigned_minutes, 0);
    assert_eq!(load.preparations, 0);
}

#[test]
fn test_delete_unknown_entry() {
    let snapshot = snapshot_with(vec![], vec![], vec![], vec![]);
    let result = apply(
        &snapshot,
        Command::DeleteEntry {
            entry_id: EntryId::new("E-404"),
        },
    );
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::UnknownEntry { .. })
    ));
}
