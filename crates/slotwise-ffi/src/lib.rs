//! C-compatible FFI bindings for the Slotwise timeline optimization engine.
//!
//! `slotwise-ffi` provides a stable C ABI over `slotwise-core`, enabling a
//! host written in C/C++ or any language with C FFI support (the reference
//! host drives it via Python ctypes) to run weekly timeline optimization
//! in-process.
//!
//! # Quick Start (C/C++)
//!
//! ```c
//! TimelineTask tasks[2] = {0};
//! tasks[0].id = 1;
//! tasks[0].duration_slots = 4;
//! tasks[0].priority = 9;
//! tasks[0].deadline_slot = 48;
//!
//! WeeklyTimeline* timeline = optimize_timeline(tasks, 2, NULL);
//! if (timeline != NULL) {
//!     if (timeline->optimization_status == 0) {
//!         // tasks[i].assigned_slot now holds the placements
//!     }
//!     free_timeline_memory(timeline);
//! }
//! ```
//!
//! # Ownership Contract
//!
//! `optimize_timeline` returns a heap allocation the caller owns. Extract
//! whatever is needed, then release it with `free_timeline_memory` exactly
//! once, on every exit path, including error paths. A null return signals
//! an internal failure (distinct from a normal unsolvable/timeout status)
//! and must not be dereferenced or freed. The task array passed in is
//! never owned or freed by the library; assigned slots are written back
//! into it before `optimize_timeline` returns.
//!
//! # ABI Stability
//!
//! The following are part of the ABI contract and will never change:
//!
//! - [`TimelineTask`], [`OptimizationConfig`], [`WeeklyTimeline`] and
//!   [`ScheduleGap`] memory layout and field order
//! - Status code values (`STATUS_SUCCESS`, `STATUS_UNSOLVABLE`,
//!   `STATUS_TIMEOUT`) and slot sentinels (`EMPTY_SLOT`, `BLOCKED_SLOT`)
//! - Function signatures of the exported `extern "C"` functions
//!
//! # Thread Safety
//!
//! All functions are thread-safe. The library holds no global mutable
//! state; every call builds and discards its own working memory.

#![deny(unsafe_op_in_unsafe_fn)]

mod ffi;
mod types;

// Re-export FFI functions
pub use ffi::{
    find_gaps, free_timeline_memory, get_engine_version, get_slots_per_day, get_week_slots,
    optimize_timeline, validate_constraints,
};

// Re-export types
pub use types::{
    OptimizationConfig, ScheduleGap, TimelineTask, WeeklyTimeline, BLOCKED_SLOT, EMPTY_SLOT,
    ERR_INVALID_INPUT, ERR_NONE, MAX_SUBJECT_LEN, MAX_TASKS, MAX_TITLE_LEN, STATUS_SUCCESS,
    STATUS_TIMEOUT, STATUS_UNSOLVABLE,
};
