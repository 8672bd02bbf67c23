//! Conflict detection over the visible event set
//!
//! Full O(n²) pairwise rescan on every mutation. At weekly-session scale
//! (tens to low hundreds of events) this is cheaper than maintaining an
//! incremental index, and it keeps the detector a pure function of the set.

use slotgrid_domain::constants::CAPACITY_CRITICAL_OVERFLOW_RATIO;
use slotgrid_domain::types::{
    CalendarEvent, ConflictInfo, ConflictKind, ConflictPeer, ConflictSummary, EventStatus,
    Severity, SessionType,
};
use slotgrid_domain::Result;
use tracing::debug;

use crate::grid;

/// Recomputes every event's conflicts list and derived status.
///
/// The detector is the only writer of `conflicts`, `status == Conflict`, and
/// `prior_status`; callers re-run it after every insert, relocate, or
/// delete.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictDetector;

impl ConflictDetector {
    pub fn new() -> Self {
        Self
    }

    /// Rescan the whole set, rewriting each event's conflicts and status.
    ///
    /// Intervals are parsed up front so a malformed time fails the run
    /// before any event is touched.
    pub fn detect(&self, events: &mut [CalendarEvent]) -> Result<ConflictSummary> {
        let intervals: Vec<(u32, u32)> = events
            .iter()
            .map(|event| {
                Ok((
                    grid::time_to_minutes(&event.start_time)?,
                    grid::time_to_minutes(&event.end_time)?,
                ))
            })
            .collect::<Result<_>>()?;

        let mut found: Vec<Vec<ConflictInfo>> = vec![Vec::new(); events.len()];

        // Pairwise scan: only same-date pairs can overlap
        for i in 0..events.len() {
            for j in (i + 1)..events.len() {
                if events[i].date != events[j].date {
                    continue;
                }
                if !overlaps(intervals[i], intervals[j]) {
                    continue;
                }
                let (a, b) = (&events[i], &events[j]);

                if a.teacher.id == b.teacher.id {
                    let severity = if a.session_type == SessionType::Exam
                        || b.session_type == SessionType::Exam
                    {
                        Severity::Critical
                    } else {
                        Severity::High
                    };
                    found[i].push(teacher_conflict(a, b, severity));
                    found[j].push(teacher_conflict(b, a, severity));
                }

                if a.room.id == b.room.id {
                    found[i].push(room_conflict(a, b));
                    found[j].push(room_conflict(b, a));
                }

                if a.shares_program_with(b) {
                    found[i].push(student_conflict(a, b));
                    found[j].push(student_conflict(b, a));
                }
            }
        }

        // Capacity check is per-event, independent of overlap
        for (event, conflicts) in events.iter().zip(found.iter_mut()) {
            if let Some(conflict) = capacity_conflict(event) {
                conflicts.push(conflict);
            }
        }

        let mut summary = ConflictSummary::default();
        for (event, conflicts) in events.iter_mut().zip(found) {
            for conflict in &conflicts {
                summary.record(conflict);
            }
            event.conflicts = conflicts;
            apply_status(event);
        }

        debug!(
            events = events.len(),
            conflicts = summary.total,
            "conflict detection pass complete"
        );
        Ok(summary)
    }
}

/// Half-open interval overlap: `[a_start, a_end) ∩ [b_start, b_end) ≠ ∅`.
fn overlaps(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Keep status and conflicts in lock-step: `Conflict` iff the list is
/// non-empty, remembering the overridden value so it can be restored.
fn apply_status(event: &mut CalendarEvent) {
    if event.conflicts.is_empty() {
        if event.status == EventStatus::Conflict {
            event.status = event.prior_status.take().unwrap_or_default();
        }
    } else if event.status != EventStatus::Conflict {
        event.prior_status = Some(event.status);
        event.status = EventStatus::Conflict;
    }
}

fn peer(other: &CalendarEvent) -> ConflictPeer {
    ConflictPeer {
        event_id: other.id.clone(),
        title: other.title.clone(),
        start_time: other.start_time.clone(),
        end_time: other.end_time.clone(),
    }
}

fn teacher_conflict(event: &CalendarEvent, other: &CalendarEvent, severity: Severity) -> ConflictInfo {
    ConflictInfo {
        kind: ConflictKind::TeacherConflict,
        severity,
        message: format!(
            "{} is also teaching {} at {}",
            event.teacher.name,
            other.title,
            other.time_window()
        ),
        other: Some(peer(other)),
    }
}

fn room_conflict(event: &CalendarEvent, other: &CalendarEvent) -> ConflictInfo {
    ConflictInfo {
        kind: ConflictKind::RoomConflict,
        severity: Severity::High,
        message: format!(
            "Room {} is double-booked with {} at {}",
            event.room.name,
            other.title,
            other.time_window()
        ),
        other: Some(peer(other)),
    }
}

fn student_conflict(event: &CalendarEvent, other: &CalendarEvent) -> ConflictInfo {
    let shared = event
        .programs
        .iter()
        .find(|p| other.programs.iter().any(|q| q.id == p.id))
        .map_or_else(|| "a cohort".to_string(), |p| p.name.clone());
    ConflictInfo {
        kind: ConflictKind::StudentConflict,
        severity: Severity::Medium,
        message: format!("{shared} also attends {} at {}", other.title, other.time_window()),
        other: Some(peer(other)),
    }
}

fn capacity_conflict(event: &CalendarEvent) -> Option<ConflictInfo> {
    let enrolled = event.enrolled_total();
    let capacity = event.room.capacity;
    if enrolled <= capacity {
        return None;
    }
    let overflow = enrolled - capacity;
    #[allow(clippy::cast_precision_loss)]
    let severity = if overflow as f32 > capacity as f32 * CAPACITY_CRITICAL_OVERFLOW_RATIO {
        Severity::Critical
    } else {
        Severity::Medium
    };
    Some(ConflictInfo {
        kind: ConflictKind::CapacityExceeded,
        severity,
        message: format!(
            "{enrolled} students enrolled for {capacity} seats in {}",
            event.room.name
        ),
        other: None,
    })
}
