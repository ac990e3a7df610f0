//! Extern "C" API for FFI consumers.
//!
//! This module exposes the `#[no_mangle] pub extern "C"` functions that form
//! the stable C ABI of the engine. They can be called from C/C++ or any
//! language with C FFI support (the reference host drives them via ctypes).
//!
//! # Safety
//!
//! All functions in this module:
//! - Never panic across the FFI boundary (panics are caught and converted
//!   to error results)
//! - Validate all input pointers before use
//! - Follow a strict ownership contract: `optimize_timeline` returns an
//!   owned allocation that the caller must release through exactly one
//!   `free_timeline_memory` call, on every exit path; the task array stays
//!   caller-owned throughout

use core::ffi::c_char;
use std::ptr;
use std::slice;

use slotwise_core::{validate, Engine, SchedulableUnit};

use crate::types::{
    OptimizationConfig, ScheduleGap, TimelineTask, WeeklyTimeline, ERR_INVALID_INPUT, MAX_TASKS,
    STATUS_UNSOLVABLE,
};

/// Catches any panic and returns a default value instead of unwinding
/// across the FFI boundary.
macro_rules! catch_panic {
    ($default:expr, $body:expr) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(result) => result,
            Err(_) => $default,
        }
    }};
}

/// Optimize a weekly timeline.
///
/// # Arguments
///
/// * `tasks` - Array of tasks; `assigned_slot` is written back in place
/// * `count` - Number of tasks in the array (capped at 100)
/// * `config` - Optimization parameters, or null for the defaults
///
/// # Returns
///
/// An owned `WeeklyTimeline`, or null on an internal failure. On bad input
/// the timeline carries `error_code = ERR_INVALID_INPUT` instead of a
/// result. The caller must release the returned pointer with
/// [`free_timeline_memory`] exactly once.
///
/// # Safety
///
/// `tasks` must point to `count` valid, writable `TimelineTask` values (or
/// be null with `count == 0`); `config` must be null or point to a valid
/// `OptimizationConfig`.
#[no_mangle]
pub unsafe extern "C" fn optimize_timeline(
    tasks: *mut TimelineTask,
    count: i32,
    config: *const OptimizationConfig,
) -> *mut WeeklyTimeline {
    catch_panic!(ptr::null_mut(), {
        if tasks.is_null() && count > 0 {
            return ptr::null_mut();
        }
        let count = count.clamp(0, MAX_TASKS as i32);
        let task_slice: &mut [TimelineTask] = if count == 0 {
            &mut []
        } else {
            // SAFETY: caller guarantees `tasks` points to `count` tasks
            unsafe { slice::from_raw_parts_mut(tasks, count as usize) }
        };

        let core_config = if config.is_null() {
            slotwise_core::OptimizeConfig::default()
        } else {
            // SAFETY: checked non-null above
            unsafe { &*config }.to_core()
        };

        let mut timeline = Box::new(WeeklyTimeline::empty(tasks, count));

        let units: Option<Vec<SchedulableUnit>> =
            task_slice.iter().map(TimelineTask::to_unit).collect();
        let Some(units) = units else {
            timeline.error_code = ERR_INVALID_INPUT;
            timeline.optimization_status = STATUS_UNSOLVABLE;
            return Box::into_raw(timeline);
        };

        let engine = Engine::new();
        match engine.optimize(&units, &core_config) {
            Ok(outcome) => {
                for (slot, code) in timeline.slots.iter_mut().zip(outcome.grid.codes()) {
                    *slot = code;
                }
                for (task, unit) in task_slice.iter_mut().zip(&outcome.units) {
                    task.write_assignment(unit);
                }
                timeline.optimization_status = outcome.status.code();
                timeline.total_gaps_filled = outcome.gaps_filled as i32;
                timeline.total_conflicts = outcome.conflicts as i32;
            }
            Err(_) => {
                timeline.error_code = ERR_INVALID_INPUT;
                timeline.optimization_status = STATUS_UNSOLVABLE;
            }
        }

        Box::into_raw(timeline)
    })
}

/// Release a timeline returned by [`optimize_timeline`].
///
/// Null is a safe no-op. The task array referenced by the timeline is owned
/// by the caller and is not freed here.
///
/// # Safety
///
/// `timeline` must be null or a pointer previously returned by
/// [`optimize_timeline`] that has not been freed yet; calling this twice on
/// the same pointer is undefined behavior.
#[no_mangle]
pub unsafe extern "C" fn free_timeline_memory(timeline: *mut WeeklyTimeline) {
    if timeline.is_null() {
        return;
    }
    // SAFETY: caller guarantees this is an unfreed Box from optimize_timeline
    drop(unsafe { Box::from_raw(timeline) });
}

/// Count constraint violations in a finished timeline.
///
/// Checks overlap, deadline and bounds invariants for every placed task.
///
/// # Returns
///
/// The number of violations, 0 for a consistent timeline, or -1 if
/// `timeline` is null or malformed.
///
/// # Safety
///
/// `timeline` must be null or point to a valid `WeeklyTimeline` whose
/// `tasks` pointer is either null (with `task_count == 0`) or valid for
/// `task_count` reads.
#[no_mangle]
pub unsafe extern "C" fn validate_constraints(timeline: *const WeeklyTimeline) -> i32 {
    catch_panic!(-1, {
        if timeline.is_null() {
            return -1;
        }
        // SAFETY: checked non-null above
        let timeline = unsafe { &*timeline };
        if timeline.task_count < 0 || (timeline.tasks.is_null() && timeline.task_count > 0) {
            return -1;
        }

        let task_slice: &[TimelineTask] = if timeline.task_count == 0 {
            &[]
        } else {
            // SAFETY: caller guarantees task_count tasks behind the pointer
            unsafe { slice::from_raw_parts(timeline.tasks, timeline.task_count as usize) }
        };

        let units: Vec<SchedulableUnit> = task_slice
            .iter()
            .filter_map(|task| {
                let mut unit = task.to_unit()?;
                unit.assigned_slot =
                    usize::try_from(task.assigned_slot).ok();
                Some(unit)
            })
            .collect();

        validate(&timeline.grid(), &units).len() as i32
    })
}

/// Find gaps in a finished timeline.
///
/// # Arguments
///
/// * `timeline` - The timeline to scan
/// * `gaps` - Output buffer
/// * `capacity` - Capacity of the output buffer
///
/// # Returns
///
/// The number of gaps written, at most `capacity`; 0 if either pointer is
/// null or `capacity` is not positive.
///
/// # Safety
///
/// `timeline` must be null or valid; `gaps` must be null or valid for
/// `capacity` writes of `ScheduleGap`.
#[no_mangle]
pub unsafe extern "C" fn find_gaps(
    timeline: *const WeeklyTimeline,
    gaps: *mut ScheduleGap,
    capacity: i32,
) -> i32 {
    catch_panic!(0, {
        if timeline.is_null() || gaps.is_null() || capacity <= 0 {
            return 0;
        }
        // SAFETY: checked non-null above
        let timeline = unsafe { &*timeline };
        // SAFETY: caller guarantees capacity writes behind `gaps`
        let buffer = unsafe { slice::from_raw_parts_mut(gaps, capacity as usize) };

        let found = slotwise_core::find_gaps(&timeline.grid(), 1);
        let written = found.len().min(buffer.len());
        for (out, gap) in buffer.iter_mut().zip(found.iter().take(written)) {
            *out = ScheduleGap::from_core(gap);
        }
        written as i32
    })
}

/// Engine version as a static NUL-terminated string.
///
/// The returned pointer is static; the caller must not free it.
#[no_mangle]
pub extern "C" fn get_engine_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Slots per day in the grid model.
#[no_mangle]
pub extern "C" fn get_slots_per_day() -> i32 {
    crate::types::FFI_SLOTS_PER_DAY
}

/// Slots per week in the grid model.
#[no_mangle]
pub extern "C" fn get_week_slots() -> i32 {
    crate::types::FFI_WEEK_SLOTS
}
