//! Conflict model
//!
//! Conflicts are detector output: valid, displayable domain data, never
//! errors. Every record on an event describes one scheduling problem
//! affecting it.

use serde::{Deserialize, Serialize};

/// What kind of scheduling problem was detected
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    TeacherConflict,
    RoomConflict,
    StudentConflict,
    CapacityExceeded,
}

impl ConflictKind {
    /// Tie-break rank for equal severities; lower wins
    /// (teacher > room > student > capacity).
    pub fn rank(self) -> u8 {
        match self {
            Self::TeacherConflict => 0,
            Self::RoomConflict => 1,
            Self::StudentConflict => 2,
            Self::CapacityExceeded => 3,
        }
    }
}

/// Conflict severity, ordered `Low < Medium < High < Critical`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// The other event involved in a pairwise conflict
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConflictPeer {
    pub event_id: String,
    pub title: String,
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM"
    pub end_time: String,
}

/// One detected scheduling problem affecting an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConflictInfo {
    pub kind: ConflictKind,
    pub severity: Severity,
    /// Human-readable explanation shown in the conflict tooltip
    pub message: String,
    /// Present for teacher/room/student conflicts, absent for capacity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<ConflictPeer>,
}

/// Aggregate counts for the grid header badge
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConflictSummary {
    pub total: usize,
    pub teacher: usize,
    pub room: usize,
    pub student: usize,
    pub capacity: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_severity: Option<Severity>,
}

impl ConflictSummary {
    /// Fold one conflict record into the summary.
    pub fn record(&mut self, conflict: &ConflictInfo) {
        self.total += 1;
        match conflict.kind {
            ConflictKind::TeacherConflict => self.teacher += 1,
            ConflictKind::RoomConflict => self.room += 1,
            ConflictKind::StudentConflict => self.student += 1,
            ConflictKind::CapacityExceeded => self.capacity += 1,
        }
        self.highest_severity = Some(match self.highest_severity {
            Some(current) => current.max(conflict.severity),
            None => conflict.severity,
        });
    }
}
