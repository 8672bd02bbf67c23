use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use slotgrid_core::store::ports::{EventSource, RelocationSink};
use slotgrid_domain::{CalendarEvent, Result as DomainResult, SlotGridError};

/// In-memory mock for `EventSource`.
///
/// Stores a fixed set of events and returns the ones whose date falls in the
/// requested window. Designed for store/drag tests where deterministic
/// responses are required.
#[derive(Default, Clone)]
pub struct MockEventSource {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl MockEventSource {
    /// Create a new mock seeded with the provided events.
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events: Arc::new(Mutex::new(events)), fail_next: Arc::new(Mutex::new(false)) }
    }

    /// Convenience helper for adding a single event to the mock.
    pub fn with_event(self, event: CalendarEvent) -> Self {
        self.events.lock().unwrap().push(event);
        self
    }

    /// Replace the backing set (simulates the backend changing between
    /// reloads).
    pub fn set_events(&self, events: Vec<CalendarEvent>) {
        *self.events.lock().unwrap() = events;
    }

    /// Make the next fetch fail with `LoadFailed`.
    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    async fn fetch_events(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> DomainResult<Vec<CalendarEvent>> {
        if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
            return Err(SlotGridError::LoadFailed("simulated transport failure".to_string()));
        }
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.date >= window_start && e.date <= window_end)
            .cloned()
            .collect())
    }
}

/// Recording mock for the optional `RelocationSink`.
#[derive(Default, Clone)]
pub struct MockRelocationSink {
    saved: Arc<Mutex<Vec<(String, NaiveDate, String)>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockRelocationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every relocation the store forwarded, in order.
    pub fn saved(&self) -> Vec<(String, NaiveDate, String)> {
        self.saved.lock().unwrap().clone()
    }

    /// Make every save fail (the store must log and carry on).
    pub fn fail_all(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl RelocationSink for MockRelocationSink {
    async fn save_relocation(
        &self,
        event_id: &str,
        new_date: NaiveDate,
        new_start: &str,
    ) -> DomainResult<()> {
        if *self.fail.lock().unwrap() {
            return Err(SlotGridError::LoadFailed("sink unavailable".to_string()));
        }
        self.saved.lock().unwrap().push((
            event_id.to_string(),
            new_date,
            new_start.to_string(),
        ));
        Ok(())
    }
}
