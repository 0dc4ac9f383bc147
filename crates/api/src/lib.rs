// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod request_response;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::ApiError;
pub use handlers::ScheduleService;
pub use request_response::{
    ArchiveTermRequest, ArchiveTermResponse, CommitEntryRequest, CommitEntryResponse,
    ConflictInfo, DeleteEntryRequest, DeleteEntryResponse, DetectConflictsRequest,
    DetectConflictsResponse, FacultyLoadInfo, GenerateSchedulesRequest,
    GenerateSchedulesResponse, GenerationOptionsPayload, PublishEntriesRequest,
    PublishEntriesResponse, ScheduleEntryInfo, ScheduleEntryPayload, TimeSlotInfo,
    TimeSlotPayload, UnresolvedSubjectInfo,
};
pub use store::{ScheduleStore, StoreError};
