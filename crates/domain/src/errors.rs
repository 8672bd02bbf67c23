//! Error types used throughout the scheduling grid

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for slotgrid
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SlotGridError {
    /// A time-of-day string did not parse as "HH:MM" 24h.
    ///
    /// Contract violation on well-formed input; callers propagate it rather
    /// than recover.
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// Time arithmetic left the 0..=1439 minutes-since-midnight range.
    #[error("Time out of bounds: {0}")]
    TimeOutOfBounds(String),

    /// The referenced event is not in the working set (stale reference).
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// Fetching events for the visible window failed; the previous working
    /// set is retained.
    #[error("Load failed: {0}")]
    LoadFailed(String),

    /// A drop target was outside the valid grid window. Normal outcome of a
    /// drag gesture, not a defect.
    #[error("Relocation rejected: {0}")]
    RelocationRejected(String),
}

/// Result type alias for slotgrid operations
pub type Result<T> = std::result::Result<T, SlotGridError>;
