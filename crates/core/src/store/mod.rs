//! In-memory event store for the visible window
//!
//! Single-writer, single-threaded: all mutation happens on the UI's main
//! execution context, so there is no locking. The only asynchronous boundary
//! is loading through the `EventSource` port, which is ticketed so a stale
//! completion can never clobber a newer one.

pub mod ports;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use slotgrid_domain::types::{CalendarEvent, ConflictSummary};
use slotgrid_domain::{Result, SlotGridError};
use tracing::{debug, error};

use crate::conflicts::ConflictDetector;
use crate::grid;
use ports::{EventSource, RelocationSink};

/// Handle for one in-flight load; completions with a superseded ticket are
/// discarded (latest call wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    window_start: NaiveDate,
    window_end: NaiveDate,
}

/// What `complete_load` did with a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The working set was replaced with this many events.
    Applied(usize),
    /// A newer load was issued meanwhile; this response was dropped.
    Stale,
}

/// Owns the event collection for the currently-viewed window.
///
/// Every mutation re-runs conflict detection before returning, so callers
/// never observe an event set whose statuses are out of step with its
/// conflicts.
pub struct EventStore {
    source: Arc<dyn EventSource>,
    sink: Option<Arc<dyn RelocationSink>>,
    detector: ConflictDetector,
    events: Vec<CalendarEvent>,
    window: Option<(NaiveDate, NaiveDate)>,
    load_seq: u64,
}

impl EventStore {
    /// Create a store reading through `source`, with no persistence sink.
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            sink: None,
            detector: ConflictDetector::new(),
            events: Vec::new(),
            window: None,
            load_seq: 0,
        }
    }

    /// Attach an optional relocation sink.
    ///
    /// Sink failures are logged, never propagated: the local working set is
    /// the authority until an explicit save path persists it.
    pub fn with_sink(mut self, sink: Arc<dyn RelocationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// The full working set, detector-consistent.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Events scheduled on one calendar day.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    /// Look up one event by id.
    pub fn get(&self, event_id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// The window the current set was loaded for, if any load completed.
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.window
    }

    /// Aggregate conflict counts for the header badge.
    pub fn conflict_summary(&self) -> ConflictSummary {
        let mut summary = ConflictSummary::default();
        for event in &self.events {
            for conflict in &event.conflicts {
                summary.record(conflict);
            }
        }
        summary
    }

    /// Issue a ticket for a window load, superseding any in-flight one.
    pub fn begin_load(&mut self, window_start: NaiveDate, window_end: NaiveDate) -> LoadTicket {
        self.load_seq += 1;
        LoadTicket { seq: self.load_seq, window_start, window_end }
    }

    /// Apply a fetch result for a previously issued ticket.
    ///
    /// A superseded ticket is discarded outright - even its errors. For the
    /// current ticket, success replaces the whole working set (the prior set
    /// is not merged) and failure retains the previous set and surfaces
    /// `LoadFailed`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<Vec<CalendarEvent>>,
    ) -> Result<LoadOutcome> {
        if ticket.seq != self.load_seq {
            debug!(seq = ticket.seq, current = self.load_seq, "discarding stale load response");
            return Ok(LoadOutcome::Stale);
        }
        match fetched {
            Ok(mut events) => {
                self.detector.detect(&mut events)?;
                let count = events.len();
                self.events = events;
                self.window = Some((ticket.window_start, ticket.window_end));
                debug!(count, "window load applied");
                Ok(LoadOutcome::Applied(count))
            }
            Err(err) => {
                error!(error = %err, "window load failed; keeping previous event set");
                Err(err)
            }
        }
    }

    /// Fetch and replace the working set for a window.
    ///
    /// Serial convenience over `begin_load`/`complete_load`; navigation
    /// between weeks goes through here.
    pub async fn load(
        &mut self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Result<LoadOutcome> {
        let ticket = self.begin_load(window_start, window_end);
        let fetched = self.source.fetch_events(window_start, window_end).await;
        self.complete_load(ticket, fetched)
    }

    /// Move an event to a new day and start time.
    ///
    /// Duration is preserved: the new end time is recomputed from the new
    /// start, never carried over. The event set is untouched when the
    /// operation fails, and detection re-runs before this returns so the
    /// renderer never sees an intermediate state.
    pub async fn relocate(
        &mut self,
        event_id: &str,
        new_date: NaiveDate,
        new_start: &str,
    ) -> Result<()> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or_else(|| SlotGridError::EventNotFound(event_id.to_string()))?;

        // Compute the new end before any write so a failure is a no-op
        let duration = self.events[index].duration_minutes;
        #[allow(clippy::cast_possible_wrap)]
        let new_end = grid::add_minutes(new_start, duration as i32)?;

        let event = &mut self.events[index];
        event.date = new_date;
        event.start_time = new_start.to_string();
        event.end_time = new_end;
        event.last_modified = Utc::now();
        self.detector.detect(&mut self.events)?;

        if let Some(sink) = &self.sink {
            if let Err(err) = sink.save_relocation(event_id, new_date, new_start).await {
                error!(error = %err, event_id, "failed to persist relocation");
            }
        }

        debug!(event_id, %new_date, new_start, "event relocated");
        Ok(())
    }

    /// Insert a new event or replace an existing one by id.
    pub fn upsert(&mut self, event: CalendarEvent) -> Result<()> {
        match self.events.iter().position(|e| e.id == event.id) {
            Some(index) => self.events[index] = event,
            None => self.events.push(event),
        }
        self.detector.detect(&mut self.events)?;
        Ok(())
    }

    /// Remove an event from the working set.
    pub fn remove(&mut self, event_id: &str) -> Result<()> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or_else(|| SlotGridError::EventNotFound(event_id.to_string()))?;
        self.events.remove(index);
        self.detector.detect(&mut self.events)?;
        Ok(())
    }
}
