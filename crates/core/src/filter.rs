//! Display filter pipeline
//!
//! Derives the visible subset from the full working set. Pure function of
//! (events, criteria): never mutates the store, recomputed on every store
//! mutation or criteria change.

use serde::{Deserialize, Serialize};
use slotgrid_domain::types::{CalendarEvent, EventStatus, SessionType};

/// User-selected filter and search state.
///
/// All clauses are ANDed. Empty allow-lists allow everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring over title, subject name, teacher name,
    /// and room name
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub teacher_ids: Vec<String>,
    #[serde(default)]
    pub room_ids: Vec<String>,
    #[serde(default)]
    pub session_types: Vec<SessionType>,
    pub show_conflicts: bool,
    pub show_completed: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            teacher_ids: Vec::new(),
            room_ids: Vec::new(),
            session_types: Vec::new(),
            show_conflicts: true,
            show_completed: true,
        }
    }
}

impl FilterCriteria {
    /// Whether one event passes every clause.
    pub fn matches(&self, event: &CalendarEvent) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let haystacks = [
                &event.title,
                &event.subject.name,
                &event.teacher.name,
                &event.room.name,
            ];
            if !haystacks.iter().any(|h| h.to_lowercase().contains(&needle)) {
                return false;
            }
        }
        if !self.teacher_ids.is_empty() && !self.teacher_ids.contains(&event.teacher.id) {
            return false;
        }
        if !self.room_ids.is_empty() && !self.room_ids.contains(&event.room.id) {
            return false;
        }
        if !self.session_types.is_empty() && !self.session_types.contains(&event.session_type) {
            return false;
        }
        if !self.show_conflicts && event.status == EventStatus::Conflict {
            return false;
        }
        if !self.show_completed && event.status == EventStatus::Completed {
            return false;
        }
        true
    }
}

/// Apply the criteria to the working set, preserving order.
pub fn apply<'a>(events: &'a [CalendarEvent], criteria: &FilterCriteria) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|e| criteria.matches(e)).collect()
}
