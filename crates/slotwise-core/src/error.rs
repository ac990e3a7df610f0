//! Core error types for slotwise-core.
//!
//! The engine never aborts on bad input: anything a caller can get wrong is
//! reported through these types, and scheduling shortfalls (unplaced units,
//! timeouts) travel as statuses on the optimization outcome instead.

use thiserror::Error;

/// Top-level error type for the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed caller input (slots, durations, clock times, capacity)
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum InputError {
    /// Slot index outside the weekly grid
    #[error("Slot index {slot} out of range (grid has {max} slots)")]
    SlotOutOfRange { slot: i64, max: usize },

    /// Hour or minute outside the clock
    #[error("Invalid clock time {hour:02}:{minute:02}")]
    ClockOutOfRange { hour: u32, minute: u32 },

    /// Clock string that is not HH:MM
    #[error("Failed to parse clock time '{0}': expected HH:MM")]
    ClockUnparsable(String),

    /// Units must occupy at least one slot
    #[error("Duration must be positive, got {0} slots")]
    NonPositiveDuration(i64),

    /// More units than the engine accepts in one call
    #[error("Too many units: {count} exceeds the per-call capacity of {max}")]
    TooManyUnits { count: usize, max: usize },

    /// Bad configuration value
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// Planner deadline that has already passed
    #[error("Deadline {deadline} is before the planning date {today}")]
    DeadlineInPast {
        deadline: chrono::NaiveDate,
        today: chrono::NaiveDate,
    },
}

/// Result type alias for EngineError
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
