//! Grid geometry - pure conversion between wall-clock time and grid
//! coordinates
//!
//! Everything here is stateless. Times of day are "HH:MM" 24h strings as
//! delivered by the timetable backend; internally they map to minutes since
//! midnight (0..=1439). Events occupy half-open `[start, end)` intervals.

use chrono::{Datelike, Days, NaiveDate};
use slotgrid_domain::constants::{DAYS_PER_WEEK, MINUTES_PER_DAY};
use slotgrid_domain::{Result, SlotGridError};

/// Parse "HH:MM" into minutes since midnight.
///
/// Strict: exactly two digits on each side of the colon, hour 00-23,
/// minute 00-59.
pub fn time_to_minutes(time: &str) -> Result<u32> {
    let malformed = || SlotGridError::InvalidTimeFormat(time.to_string());

    let (hours, minutes) = time.split_once(':').ok_or_else(malformed)?;
    if hours.len() != 2
        || minutes.len() != 2
        || !hours.bytes().all(|b| b.is_ascii_digit())
        || !minutes.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed());
    }

    let hours: u32 = hours.parse().map_err(|_| malformed())?;
    let minutes: u32 = minutes.parse().map_err(|_| malformed())?;
    if hours > 23 || minutes > 59 {
        return Err(malformed());
    }

    Ok(hours * 60 + minutes)
}

/// Format minutes since midnight back into "HH:MM".
pub fn minutes_to_time(minutes: u32) -> Result<String> {
    if minutes >= MINUTES_PER_DAY {
        return Err(SlotGridError::TimeOutOfBounds(format!(
            "{minutes} minutes is past the end of the day"
        )));
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Shift a time of day by `delta` minutes (may be negative).
///
/// The result must stay within the same day; crossing midnight in either
/// direction is `TimeOutOfBounds`.
pub fn add_minutes(time: &str, delta: i32) -> Result<String> {
    let base = i64::from(time_to_minutes(time)?);
    let shifted = base + i64::from(delta);
    if shifted < 0 || shifted >= i64::from(MINUTES_PER_DAY) {
        return Err(SlotGridError::TimeOutOfBounds(format!(
            "{time} {delta:+} minutes leaves the day"
        )));
    }
    // Range-checked above, so the narrowing cast is exact
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let shifted = shifted as u32;
    minutes_to_time(shifted)
}

/// Fixed list of grid row labels: every `step_minutes` from `start_hour`
/// (inclusive) to `end_hour` (exclusive).
///
/// `slots_for_window(8, 18, 30)` yields 21 rows, "08:00" through "17:30".
pub fn slots_for_window(start_hour: u32, end_hour: u32, step_minutes: u32) -> Vec<String> {
    if step_minutes == 0 || end_hour <= start_hour {
        return Vec::new();
    }
    let mut slots = Vec::new();
    let mut minutes = start_hour * 60;
    let end = (end_hour * 60).min(MINUTES_PER_DAY);
    while minutes < end {
        slots.push(format!("{:02}:{:02}", minutes / 60, minutes % 60));
        minutes += step_minutes;
    }
    slots
}

/// The seven dates of the Monday-start week containing `anchor`.
///
/// ISO semantics: a Sunday anchor belongs to the week of the *previous*
/// Monday (Sunday is day 7, not day 0).
pub fn week_dates(anchor: NaiveDate) -> [NaiveDate; 7] {
    let monday = anchor - Days::new(u64::from(anchor.weekday().num_days_from_monday()));
    std::array::from_fn(|offset| monday + Days::new(offset as u64))
}

/// Column index (0 = Monday) of `date` within the week containing `anchor`,
/// or `None` when the date falls in a different week.
pub fn column_for_date(anchor: NaiveDate, date: NaiveDate) -> Option<usize> {
    week_dates(anchor)
        .iter()
        .position(|d| *d == date)
        .filter(|&col| col < DAYS_PER_WEEK)
}

/// Whether `slot` is the anchor row for an event starting at `event_start`.
///
/// Only the slot equal to the event's own start paints the event block;
/// later overlapping slots render as covered, preventing duplicates.
pub fn is_anchor_slot(slot: &str, event_start: &str) -> Result<bool> {
    Ok(time_to_minutes(slot)? == time_to_minutes(event_start)?)
}

/// Whether the slot starting at `slot` falls within the event's
/// `[start, end)` interval.
pub fn occupies_slot(slot: &str, event_start: &str, event_end: &str) -> Result<bool> {
    let slot_start = time_to_minutes(slot)?;
    Ok(slot_start >= time_to_minutes(event_start)? && slot_start < time_to_minutes(event_end)?)
}

/// Number of grid rows an event block spans; rendered height is proportional
/// to `duration / step`.
pub fn row_span(duration_minutes: u32, step_minutes: u32) -> usize {
    if step_minutes == 0 {
        return 0;
    }
    (duration_minutes.div_ceil(step_minutes)) as usize
}
