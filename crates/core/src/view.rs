//! Week view-model assembly
//!
//! The only consumer of grid geometry. Combines the working set, the filter
//! pipeline, and the grid model into the plain data the rendering layer
//! paints; it computes no conflict or filter logic of its own.

use chrono::NaiveDate;
use serde::Serialize;
use slotgrid_domain::types::CalendarEvent;
use slotgrid_domain::{GridConfig, Result};

use crate::filter::{self, FilterCriteria};
use crate::grid;

/// One event placed on the grid.
///
/// `row` is the anchor row (the slot equal to the event's start); the block
/// is painted once there and spans `row_span` rows downward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent {
    pub event: CalendarEvent,
    /// 0 = Monday column
    pub column: usize,
    pub row: usize,
    pub row_span: usize,
}

/// Everything the renderer needs to paint one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekViewModel {
    pub week_dates: [NaiveDate; 7],
    pub time_slots: Vec<String>,
    pub events: Vec<PositionedEvent>,
}

/// Assemble the view model for the week containing `anchor`.
///
/// Events outside the week, or starting outside the rendered hour range,
/// are not positioned (they exist in the store but have no cell to occupy).
pub fn build_week_view(
    events: &[CalendarEvent],
    criteria: &FilterCriteria,
    config: &GridConfig,
    anchor: NaiveDate,
) -> Result<WeekViewModel> {
    let week_dates = grid::week_dates(anchor);
    let time_slots = grid::slots_for_window(config.start_hour, config.end_hour, config.slot_minutes);
    if time_slots.is_empty() {
        // Degenerate window: nothing can be positioned
        return Ok(WeekViewModel { week_dates, time_slots, events: Vec::new() });
    }
    let window_start = config.window_start_minutes();
    let window_end = config.window_end_minutes();

    let mut positioned = Vec::new();
    for event in filter::apply(events, criteria) {
        let Some(column) = grid::column_for_date(anchor, event.date) else {
            continue;
        };
        let start = grid::time_to_minutes(&event.start_time)?;
        if start < window_start || start >= window_end {
            continue;
        }
        positioned.push(PositionedEvent {
            event: event.clone(),
            column,
            row: ((start - window_start) / config.slot_minutes) as usize,
            row_span: grid::row_span(event.duration_minutes, config.slot_minutes),
        });
    }

    Ok(WeekViewModel { week_dates, time_slots, events: positioned })
}
