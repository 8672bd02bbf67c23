//! Drag-reschedule state machine
//!
//! An explicit Idle/Dragging controller, decoupled from rendering so the
//! gesture logic is testable on its own. Drags are serial per pointer
//! device: picking up while a drag is active is not a defined input and is
//! ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slotgrid_domain::{GridConfig, SlotGridError};
use tracing::debug;

use crate::grid;
use crate::store::EventStore;

/// One grid cell: a day column and the slot's start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: NaiveDate,
    /// "HH:MM" slot start
    pub start_time: String,
}

/// Controller state; `Dragging` remembers where the event came from so a
/// rejected drop can snap back without consulting the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { event_id: String, origin: GridCell },
}

/// Result of a drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The event moved; `conflicts` is its post-move conflict count
    /// (a move that creates conflicts is surfaced, never blocked).
    Relocated { event_id: String, conflicts: usize },
    /// Target outside the valid window; the store is untouched and the
    /// event snaps back to `origin`.
    Rejected { origin: GridCell, reason: SlotGridError },
    /// The dragged event vanished from the working set (deleted by a reload
    /// mid-drag); abort silently and refresh.
    StaleEvent { event_id: String },
    /// No drag was active.
    NoDrag,
}

/// Orchestrates a drag gesture against the event store.
pub struct DragController {
    config: GridConfig,
    state: DragState,
    hovered: Option<GridCell>,
}

impl DragController {
    pub fn new(config: GridConfig) -> Self {
        Self { config, state: DragState::Idle, hovered: None }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The candidate cell currently highlighted, if any.
    pub fn hovered(&self) -> Option<&GridCell> {
        self.hovered.as_ref()
    }

    /// Start dragging an event. Returns whether the drag actually started:
    /// ignored while another drag is active or when the id is unknown.
    pub fn pick_up(&mut self, store: &EventStore, event_id: &str) -> bool {
        if self.is_dragging() {
            debug!(event_id, "ignoring pick-up while a drag is active");
            return false;
        }
        let Some(event) = store.get(event_id) else {
            debug!(event_id, "ignoring pick-up of unknown event");
            return false;
        };
        self.state = DragState::Dragging {
            event_id: event.id.clone(),
            origin: GridCell { date: event.date, start_time: event.start_time.clone() },
        };
        self.hovered = None;
        true
    }

    /// Track the candidate drop cell under the pointer. Visual only; no
    /// store mutation.
    pub fn hover(&mut self, cell: GridCell) {
        if self.is_dragging() {
            self.hovered = Some(cell);
        }
    }

    /// Release outside any valid cell. Returns whether a drag was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.hovered = None;
        if self.is_dragging() {
            self.state = DragState::Idle;
            true
        } else {
            false
        }
    }

    /// Drop the dragged event on a cell.
    ///
    /// The target is validated against the configured grid window before the
    /// store is touched: an out-of-window slot (including one whose end
    /// would run past closing) rejects the drop and leaves every event
    /// exactly where it was.
    pub async fn drop_on(&mut self, store: &mut EventStore, cell: GridCell) -> DropOutcome {
        let DragState::Dragging { event_id, origin } = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return DropOutcome::NoDrag;
        };
        self.hovered = None;

        let Some(event) = store.get(&event_id) else {
            debug!(%event_id, "dragged event disappeared; aborting drop");
            return DropOutcome::StaleEvent { event_id };
        };
        let duration = event.duration_minutes;

        match self.validate_target(&cell, duration) {
            Ok(()) => {}
            Err(reason) => {
                debug!(%event_id, %reason, "drop target rejected; snapping back");
                return DropOutcome::Rejected { origin, reason };
            }
        }

        match store.relocate(&event_id, cell.date, &cell.start_time).await {
            Ok(()) => {
                let conflicts = store.get(&event_id).map_or(0, |e| e.conflicts.len());
                DropOutcome::Relocated { event_id, conflicts }
            }
            Err(SlotGridError::EventNotFound(_)) => DropOutcome::StaleEvent { event_id },
            Err(reason) => DropOutcome::Rejected { origin, reason },
        }
    }

    /// A drop target is valid when the whole `[start, start + duration)`
    /// range fits the rendered window.
    fn validate_target(&self, cell: &GridCell, duration_minutes: u32) -> slotgrid_domain::Result<()> {
        let start = grid::time_to_minutes(&cell.start_time)?;
        let end = start + duration_minutes;
        if !self.config.contains_range(start, end) {
            return Err(SlotGridError::RelocationRejected(format!(
                "{} on {} is outside the {:02}:00-{:02}:00 grid",
                cell.start_time, cell.date, self.config.start_hour, self.config.end_hour
            )));
        }
        Ok(())
    }
}
