//! Boundary port interfaces for the event store
//!
//! Concrete transport (REST client, local mock, fixture file) is a caller
//! concern; the store only sees these traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use slotgrid_domain::{CalendarEvent, Result};

/// Trait for fetching the events of a visible window
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch all events within `[window_start, window_end]`.
    ///
    /// Transport failures surface as `LoadFailed`.
    async fn fetch_events(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>>;
}

/// Trait for persisting a relocation
///
/// Optional: the grid edits purely client-side when no sink is configured,
/// and a sink failure never rolls back the local relocation.
#[async_trait]
pub trait RelocationSink: Send + Sync {
    async fn save_relocation(
        &self,
        event_id: &str,
        new_date: NaiveDate,
        new_start: &str,
    ) -> Result<()>;
}
