//! Domain types and models
//!
//! Mirrors the timetable backend's event payloads: association fields carry
//! ids plus display data but own nothing.

pub mod conflict;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// Re-export conflict types for convenience
pub use conflict::{ConflictInfo, ConflictKind, ConflictPeer, ConflictSummary, Severity};

/// Kind of teaching session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Lecture,
    Tutorial,
    Lab,
    Exam,
    Project,
}

/// Scheduling status of an event
///
/// `Conflict` is a derived display status: the detector sets it whenever the
/// conflicts list is non-empty and restores the prior value once it clears.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
    Conflict,
}

impl Default for EventStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

/// Subject reference (id + display fields)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubjectRef {
    pub id: String,
    pub name: String,
    pub code: String,
    /// Display color, e.g. "#2d7ff9"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Teacher reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeacherRef {
    pub id: String,
    pub name: String,
}

/// Room reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomRef {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
}

/// Academic program (student cohort) reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramRef {
    pub id: String,
    pub name: String,
    pub enrolled: u32,
}

/// One scheduled teaching session on the weekly grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub subject: SubjectRef,
    pub teacher: TeacherRef,
    pub room: RoomRef,
    /// One or more cohorts attending the session
    pub programs: Vec<ProgramRef>,

    pub date: NaiveDate,
    /// "HH:MM", 24h
    pub start_time: String,
    /// "HH:MM", 24h
    pub end_time: String,
    /// Always equals end − start; denormalized for layout math
    pub duration_minutes: u32,
    #[serde(default)]
    pub recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_pattern: Option<String>,

    pub session_type: SessionType,
    #[serde(default)]
    pub status: EventStatus,
    /// Status that `Conflict` overrode; restored when conflicts clear
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_status: Option<EventStatus>,
    /// Recomputed by the detector after every mutation, never authored
    #[serde(default)]
    pub conflicts: Vec<ConflictInfo>,

    pub created_by: String,
    pub last_modified: DateTime<Utc>,
}

impl CalendarEvent {
    /// Total students enrolled across all attending programs.
    pub fn enrolled_total(&self) -> u32 {
        self.programs.iter().map(|p| p.enrolled).sum()
    }

    /// Whether any program id is shared with `other`.
    pub fn shares_program_with(&self, other: &Self) -> bool {
        self.programs
            .iter()
            .any(|p| other.programs.iter().any(|q| q.id == p.id))
    }

    /// The UI-facing conflict: highest severity, ties broken by kind rank
    /// (teacher > room > student > capacity).
    pub fn primary_conflict(&self) -> Option<&ConflictInfo> {
        self.conflicts
            .iter()
            .min_by_key(|c| (std::cmp::Reverse(c.severity), c.kind.rank()))
    }

    /// Compact "start–end" display window, e.g. "09:00–10:30".
    pub fn time_window(&self) -> String {
        format!("{}\u{2013}{}", self.start_time, self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(id: &str, enrolled: u32) -> ProgramRef {
        ProgramRef { id: id.to_string(), name: format!("Program {id}"), enrolled }
    }

    fn minimal_event(programs: Vec<ProgramRef>) -> CalendarEvent {
        CalendarEvent {
            id: "evt_1".to_string(),
            title: "Algorithms".to_string(),
            description: None,
            subject: SubjectRef {
                id: "sub_1".to_string(),
                name: "Algorithms".to_string(),
                code: "CS201".to_string(),
                color: None,
            },
            teacher: TeacherRef { id: "t_1".to_string(), name: "Dr. Ionescu".to_string() },
            room: RoomRef {
                id: "r_1".to_string(),
                name: "A101".to_string(),
                capacity: 60,
                building: None,
            },
            programs,
            date: NaiveDate::from_ymd_opt(2024, 10, 7).unwrap(),
            start_time: "09:00".to_string(),
            end_time: "10:30".to_string(),
            duration_minutes: 90,
            recurring: false,
            recurrence_pattern: None,
            session_type: SessionType::Lecture,
            status: EventStatus::Scheduled,
            prior_status: None,
            conflicts: Vec::new(),
            created_by: "importer".to_string(),
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn enrolled_total_sums_programs() {
        let event = minimal_event(vec![program("p1", 25), program("p2", 40)]);
        assert_eq!(event.enrolled_total(), 65);
    }

    #[test]
    fn shares_program_with_requires_common_id() {
        let a = minimal_event(vec![program("p1", 25), program("p2", 40)]);
        let b = minimal_event(vec![program("p2", 40)]);
        let c = minimal_event(vec![program("p3", 10)]);
        assert!(a.shares_program_with(&b));
        assert!(!a.shares_program_with(&c));
    }

    #[test]
    fn disjoint_empty_program_lists_share_nothing() {
        let a = minimal_event(Vec::new());
        let b = minimal_event(Vec::new());
        assert!(!a.shares_program_with(&b));
    }

    #[test]
    fn primary_conflict_prefers_severity_then_kind() {
        let mut event = minimal_event(vec![program("p1", 25)]);
        event.conflicts = vec![
            ConflictInfo {
                kind: ConflictKind::CapacityExceeded,
                severity: Severity::Medium,
                message: "over capacity".to_string(),
                other: None,
            },
            ConflictInfo {
                kind: ConflictKind::RoomConflict,
                severity: Severity::High,
                message: "room clash".to_string(),
                other: None,
            },
            ConflictInfo {
                kind: ConflictKind::TeacherConflict,
                severity: Severity::High,
                message: "teacher clash".to_string(),
                other: None,
            },
        ];

        let primary = event.primary_conflict().unwrap();
        assert_eq!(primary.kind, ConflictKind::TeacherConflict);
        assert_eq!(primary.severity, Severity::High);
    }

    #[test]
    fn serialization_round_trip_preserves_temporal_fields() {
        let event = minimal_event(vec![program("p1", 25)]);
        let json = serde_json::to_string(&event).unwrap();
        let back: CalendarEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.date, event.date);
        assert_eq!(back.start_time, "09:00");
        assert_eq!(back.end_time, "10:30");
        assert_eq!(back.duration_minutes, 90);
    }
}
