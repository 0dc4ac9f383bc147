// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the read-side service operations.

use super::helpers::{
    InMemoryStore, entry, entry_payload, lecture_room, lecture_subject, slot, slot_payload,
    snapshot_with, test_faculty,
};
use crate::{
    ApiError, DetectConflictsRequest, GenerateSchedulesRequest, GenerateSchedulesResponse,
    GenerationOptionsPayload, ScheduleService,
};
use termtable_domain::{EntryStatus, WeekDay};

fn service_with_conflict_fixture() -> ScheduleService<InMemoryStore> {
    let faculty = test_faculty("FAC-001");
    let room = lecture_room("RM-101", 40);
    let subject_a = lecture_subject("CS101", 2.0);
    let subject_b = lecture_subject("CS102", 2.0);
    let existing = entry(
        "E-1",
        &subject_a,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    let snapshot = snapshot_with(
        vec![faculty],
        vec![room, lecture_room("RM-102", 40)],
        vec![subject_a, subject_b],
        vec![existing],
    );
    ScheduleService::new(InMemoryStore::new(snapshot))
}

#[test]
fn test_detect_conflicts_reports_double_booking() {
    let service = service_with_conflict_fixture();

    let response = service
        .detect_conflicts(&DetectConflictsRequest {
            semester: String::from("First"),
            academic_year: 2025,
            candidate: entry_payload(
                Some("E-2"),
                "CS102",
                "FAC-001",
                "RM-102",
                vec![slot_payload("Monday", "09:00", "11:00")],
            ),
        })
        .unwrap();

    assert_eq!(response.conflicts.len(), 1);
    assert_eq!(response.conflicts[0].constraint, "faculty-double-booking");
    assert_eq!(
        response.conflicts[0].existing_entry_id.as_deref(),
        Some("E-1")
    );
    assert!(response.message.contains("1 conflict"));
}

#[test]
fn test_detect_conflicts_clean_candidate() {
    let service = service_with_conflict_fixture();

    let response = service
        .detect_conflicts(&DetectConflictsRequest {
            semester: String::from("First"),
            academic_year: 2025,
            candidate: entry_payload(
                Some("E-2"),
                "CS102",
                "FAC-001",
                "RM-102",
                vec![slot_payload("Tuesday", "09:00", "11:00")],
            ),
        })
        .unwrap();

    assert!(response.conflicts.is_empty());
}

#[test]
fn test_detect_conflicts_rejects_malformed_day() {
    let service = service_with_conflict_fixture();

    let result = service.detect_conflicts(&DetectConflictsRequest {
        semester: String::from("First"),
        academic_year: 2025,
        candidate: entry_payload(
            Some("E-2"),
            "CS102",
            "FAC-001",
            "RM-102",
            vec![slot_payload("Mondayish", "09:00", "11:00")],
        ),
    });

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { .. }
    ));
}

#[test]
fn test_detect_conflicts_rejects_malformed_time() {
    let service = service_with_conflict_fixture();

    let result = service.detect_conflicts(&DetectConflictsRequest {
        semester: String::from("First"),
        academic_year: 2025,
        candidate: entry_payload(
            Some("E-2"),
            "CS102",
            "FAC-001",
            "RM-102",
            vec![slot_payload("Monday", "9 o'clock", "11:00")],
        ),
    });

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { .. }
    ));
}

#[test]
fn test_detect_conflicts_unknown_subject_is_resource_not_found() {
    let service = service_with_conflict_fixture();

    let result = service.detect_conflicts(&DetectConflictsRequest {
        semester: String::from("First"),
        academic_year: 2025,
        candidate: entry_payload(
            Some("E-2"),
            "CS999",
            "FAC-001",
            "RM-102",
            vec![slot_payload("Monday", "09:00", "11:00")],
        ),
    });

    let Err(ApiError::ResourceNotFound { resource_type, .. }) = result else {
        panic!("expected ResourceNotFound");
    };
    assert_eq!(resource_type, "Subject");
}

#[test]
fn test_detect_conflicts_unknown_term() {
    let service = service_with_conflict_fixture();

    let result = service.detect_conflicts(&DetectConflictsRequest {
        semester: String::from("Second"),
        academic_year: 2025,
        candidate: entry_payload(
            Some("E-2"),
            "CS102",
            "FAC-001",
            "RM-102",
            vec![slot_payload("Monday", "09:00", "11:00")],
        ),
    });

    assert!(matches!(
        result.unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
}

#[test]
fn test_generate_schedules_end_to_end() {
    let snapshot = snapshot_with(
        vec![test_faculty("FAC-001"), test_faculty("FAC-002")],
        vec![lecture_room("RM-101", 40), lecture_room("RM-102", 40)],
        vec![lecture_subject("CS101", 3.0), lecture_subject("CS102", 3.0)],
        vec![],
    );
    let service = ScheduleService::new(InMemoryStore::new(snapshot));

    let response: GenerateSchedulesResponse = service
        .generate_schedules(&GenerateSchedulesRequest {
            semester: String::from("First"),
            academic_year: 2025,
            subject_ids: vec![String::from("CS101"), String::from("CS102")],
            options: None,
        })
        .unwrap();

    assert_eq!(response.status, "satisfied");
    assert_eq!(response.assigned.len(), 2);
    assert!(response.unresolved.is_empty());
    assert!(response.assigned.iter().all(|e| e.status == "draft"));
    assert!(response.message.contains("2 of 2"));

    // Generation is read-only: the store must be untouched.
    let service_store_entries = service
        .generate_schedules(&GenerateSchedulesRequest {
            semester: String::from("First"),
            academic_year: 2025,
            subject_ids: vec![String::from("CS101"), String::from("CS102")],
            options: None,
        })
        .unwrap();
    assert_eq!(response, service_store_entries);
}

#[test]
fn test_generate_schedules_response_serializes() {
    let snapshot = snapshot_with(
        vec![test_faculty("FAC-001")],
        vec![lecture_room("RM-101", 40)],
        vec![lecture_subject("CS101", 3.0)],
        vec![],
    );
    let service = ScheduleService::new(InMemoryStore::new(snapshot));

    let response = service
        .generate_schedules(&GenerateSchedulesRequest {
            semester: String::from("First"),
            academic_year: 2025,
            subject_ids: vec![String::from("CS101")],
            options: None,
        })
        .unwrap();

    let json: String = serde_json::to_string(&response).unwrap();
    let round_tripped: GenerateSchedulesResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(response, round_tripped);
    assert!(json.contains("\"status\":\"satisfied\""));
}

#[test]
fn test_generate_respects_published_entries_by_default() {
    // CS101's published section owns the sole two-hour window; without an
    // explicit release, regeneration must leave it alone and fail.
    let faculty = termtable_domain::Faculty::new(
        termtable_domain::FacultyId::new("FAC-001"),
        String::from("Test Faculty"),
        termtable_domain::DepartmentId::new("CS"),
        termtable_domain::EmploymentType::FullTime,
        18,
        24,
        4,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
        termtable_domain::FacultyStatus::Active,
    );
    let room = lecture_room("RM-101", 40);
    let subject = lecture_subject("CS101", 2.0);
    let mut published = entry(
        "E-PUB",
        &subject,
        &faculty,
        &room,
        vec![slot(WeekDay::Monday, (8, 0), (10, 0))],
    );
    published.status = EntryStatus::Published;
    let snapshot = snapshot_with(vec![faculty], vec![room], vec![subject], vec![published]);
    let service = ScheduleService::new(InMemoryStore::new(snapshot));

    let request = |release: bool| GenerateSchedulesRequest {
        semester: String::from("First"),
        academic_year: 2025,
        subject_ids: vec![String::from("CS101")],
        options: Some(GenerationOptionsPayload {
            release_published: release,
            ..GenerationOptionsPayload::default()
        }),
    };

    let kept = service.generate_schedules(&request(false)).unwrap();
    assert_eq!(kept.status, "infeasible");
    assert_eq!(kept.unresolved.len(), 1);

    let released = service.generate_schedules(&request(true)).unwrap();
    assert_eq!(released.status, "satisfied");
    assert_eq!(released.assigned.len(), 1);
}

#[test]
fn test_generate_time_limit_returns_partial_not_error() {
    let snapshot = snapshot_with(
        vec![test_faculty("FAC-001")],
        vec![lecture_room("RM-101", 40)],
        vec![lecture_subject("CS101", 3.0)],
        vec![],
    );
    let service = ScheduleService::new(InMemoryStore::new(snapshot));

    // A zero-millisecond limit cancels before the first placement.
    let response = service
        .generate_schedules(&GenerateSchedulesRequest {
            semester: String::from("First"),
            academic_year: 2025,
            subject_ids: vec![String::from("CS101")],
            options: Some(GenerationOptionsPayload {
                time_limit_ms: Some(0),
                ..GenerationOptionsPayload::default()
            }),
        })
        .unwrap();

    assert_eq!(response.status, "infeasible");
    assert_eq!(response.unresolved.len(), 1);
}

#[test]
fn test_generate_rejects_bad_semester() {
    let service = service_with_conflict_fixture();
    let result = service.generate_schedules(&GenerateSchedulesRequest {
        semester: String::from("Winter"),
        academic_year: 2025,
        subject_ids: vec![String::from("CS101")],
        options: None,
    });
    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "semester"
    ));
}
