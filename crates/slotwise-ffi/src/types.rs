//! ABI-stable types shared with C callers.
//!
//! Field order and layout of every `#[repr(C)]` struct here is part of the
//! ABI contract and must match the host's declarations exactly.

use slotwise_core::{Category, SchedulableUnit, SlotOwner, WeekGrid};
use slotwise_core::{Gap, OptimizeConfig};
use slotwise_core::{SLOTS_PER_DAY, WEEK_SLOTS};

/// Maximum bytes in a task title, including NUL padding.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum bytes in a subject code, including NUL padding.
pub const MAX_SUBJECT_LEN: usize = 20;

/// Maximum tasks accepted by one `optimize_timeline` call.
pub const MAX_TASKS: usize = 100;

/// Sentinel for an empty slot in the `slots` array.
pub const EMPTY_SLOT: i32 = SlotOwner::EMPTY_CODE;

/// Sentinel for a blocked (sleep) slot in the `slots` array.
pub const BLOCKED_SLOT: i32 = SlotOwner::BLOCKED_CODE;

/// Optimization finished with every task placed.
pub const STATUS_SUCCESS: i32 = 0;

/// At least one task could not be placed before its deadline.
pub const STATUS_UNSOLVABLE: i32 = -1;

/// The time budget elapsed before the packing loop finished.
pub const STATUS_TIMEOUT: i32 = -2;

/// No error.
pub const ERR_NONE: i32 = 0;

/// The task or config input failed validation.
pub const ERR_INVALID_INPUT: i32 = 1;

/// A task to be placed in the timeline.
///
/// Mirrors the host's record field for field: `assigned_slot` is written
/// back by `optimize_timeline`, everything else is input.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TimelineTask {
    pub id: i32,
    /// Duration in 30-minute slots, must be positive
    pub duration_slots: i32,
    /// 1-10, higher is more important
    pub priority: i32,
    /// Category code, see [`Category`]
    pub category: i32,
    /// Absolute slot index the task must finish by
    pub deadline_slot: i32,
    /// Locked tasks are pinned to `preferred_slot`
    pub is_locked: bool,
    /// NUL-padded UTF-8 bytes
    pub title: [u8; MAX_TITLE_LEN],
    /// NUL-padded UTF-8 bytes
    pub subject: [u8; MAX_SUBJECT_LEN],
    /// Preferred placement, -1 for none
    pub preferred_slot: i32,
    /// Assigned slot after optimization, -1 if unplaced
    pub assigned_slot: i32,
}

impl Default for TimelineTask {
    fn default() -> Self {
        Self {
            id: 0,
            duration_slots: 2,
            priority: 5,
            category: Category::ConceptStudy.code(),
            deadline_slot: WEEK_SLOTS as i32,
            is_locked: false,
            title: [0; MAX_TITLE_LEN],
            subject: [0; MAX_SUBJECT_LEN],
            preferred_slot: -1,
            assigned_slot: -1,
        }
    }
}

impl TimelineTask {
    /// Copy a string into the title buffer, truncating to fit.
    pub fn set_title(&mut self, title: &str) {
        copy_padded(title, &mut self.title);
    }

    /// Copy a string into the subject buffer, truncating to fit.
    pub fn set_subject(&mut self, subject: &str) {
        copy_padded(subject, &mut self.subject);
    }

    /// Title bytes as a string, NUL padding stripped.
    pub fn title_str(&self) -> String {
        padded_to_string(&self.title)
    }

    /// Subject bytes as a string, NUL padding stripped.
    pub fn subject_str(&self) -> String {
        padded_to_string(&self.subject)
    }

    /// Convert to the engine's unit representation.
    ///
    /// Returns `None` for a task the engine must reject (non-positive
    /// duration). Unknown category codes fall back to concept study; an
    /// out-of-grid preferred slot is treated as no preference.
    pub fn to_unit(&self) -> Option<SchedulableUnit> {
        let duration = usize::try_from(self.duration_slots).ok().filter(|&d| d > 0)?;
        let category = Category::from_code(self.category).unwrap_or(Category::ConceptStudy);
        let deadline = self.deadline_slot.clamp(0, WEEK_SLOTS as i32) as usize;

        let mut unit = SchedulableUnit::try_new(self.id, self.title_str(), category, duration)
            .ok()?
            .with_subject(self.subject_str())
            .with_priority(self.priority.clamp(1, 10) as u8)
            .with_deadline(deadline);
        unit.is_locked = self.is_locked;
        unit.preferred_slot = usize::try_from(self.preferred_slot)
            .ok()
            .filter(|&slot| slot < WEEK_SLOTS);
        Some(unit)
    }

    /// Record the optimizer's placement.
    pub fn write_assignment(&mut self, unit: &SchedulableUnit) {
        self.assigned_slot = unit.assigned_slot.map_or(-1, |slot| slot as i32);
    }
}

fn copy_padded(value: &str, buffer: &mut [u8]) {
    buffer.fill(0);
    // Leave at least one NUL so C string reads terminate
    let take = value.len().min(buffer.len() - 1);
    buffer[..take].copy_from_slice(&value.as_bytes()[..take]);
}

fn padded_to_string(buffer: &[u8]) -> String {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end]).into_owned()
}

/// Scheduling constraints and heuristic parameters.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct OptimizationConfig {
    pub sleep_start_slot: i32,
    pub sleep_end_slot: i32,
    pub concept_peak_start: i32,
    pub concept_peak_end: i32,
    pub practice_peak_start: i32,
    pub practice_peak_end: i32,
    pub deep_work_min_slots: i32,
    pub micro_gap_max_slots: i32,
    pub enable_heuristics: bool,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self::from_core(&OptimizeConfig::default())
    }
}

impl OptimizationConfig {
    pub fn from_core(config: &OptimizeConfig) -> Self {
        Self {
            sleep_start_slot: config.sleep_start_slot as i32,
            sleep_end_slot: config.sleep_end_slot as i32,
            concept_peak_start: config.concept_peak_start as i32,
            concept_peak_end: config.concept_peak_end as i32,
            practice_peak_start: config.practice_peak_start as i32,
            practice_peak_end: config.practice_peak_end as i32,
            deep_work_min_slots: config.deep_work_min_slots as i32,
            micro_gap_max_slots: config.micro_gap_max_slots as i32,
            enable_heuristics: config.enable_heuristics,
        }
    }

    /// Convert to the engine's config. Negative fields clamp to zero; range
    /// validation happens inside the engine.
    pub fn to_core(&self) -> OptimizeConfig {
        OptimizeConfig {
            sleep_start_slot: self.sleep_start_slot.max(0) as usize,
            sleep_end_slot: self.sleep_end_slot.max(0) as usize,
            concept_peak_start: self.concept_peak_start.max(0) as usize,
            concept_peak_end: self.concept_peak_end.max(0) as usize,
            practice_peak_start: self.practice_peak_start.max(0) as usize,
            practice_peak_end: self.practice_peak_end.max(0) as usize,
            deep_work_min_slots: self.deep_work_min_slots.max(0) as usize,
            micro_gap_max_slots: self.micro_gap_max_slots.max(0) as usize,
            enable_heuristics: self.enable_heuristics,
        }
    }
}

/// The optimized weekly timeline.
///
/// Returned by `optimize_timeline` as an owned allocation; release it with
/// `free_timeline_memory` exactly once. The `tasks` pointer aliases the
/// caller's input array and is NOT freed with the timeline.
#[repr(C)]
pub struct WeeklyTimeline {
    /// Owner of each slot: task id, [`EMPTY_SLOT`] or [`BLOCKED_SLOT`]
    pub slots: [i32; WEEK_SLOTS],
    pub slot_count: i32,
    pub tasks: *mut TimelineTask,
    pub task_count: i32,
    /// [`STATUS_SUCCESS`], [`STATUS_UNSOLVABLE`] or [`STATUS_TIMEOUT`]
    pub optimization_status: i32,
    /// [`ERR_NONE`] or [`ERR_INVALID_INPUT`]
    pub error_code: i32,
    pub total_gaps_filled: i32,
    pub total_conflicts: i32,
}

impl WeeklyTimeline {
    /// An empty timeline shell pointing at the caller's task array.
    pub(crate) fn empty(tasks: *mut TimelineTask, task_count: i32) -> Self {
        Self {
            slots: [EMPTY_SLOT; WEEK_SLOTS],
            slot_count: WEEK_SLOTS as i32,
            tasks,
            task_count,
            optimization_status: STATUS_SUCCESS,
            error_code: ERR_NONE,
            total_gaps_filled: 0,
            total_conflicts: 0,
        }
    }

    /// Rebuild the engine's grid view from the slot array.
    pub(crate) fn grid(&self) -> WeekGrid {
        WeekGrid::from_codes(&self.slots)
    }
}

/// A gap in the optimized schedule.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ScheduleGap {
    pub start_slot: i32,
    pub end_slot: i32,
    pub duration_slots: i32,
    pub day_index: i32,
    /// 0 = micro, 1 = standard, 2 = deep work
    pub gap_type: i32,
}

impl Default for ScheduleGap {
    fn default() -> Self {
        Self {
            start_slot: 0,
            end_slot: 0,
            duration_slots: 0,
            day_index: 0,
            gap_type: 0,
        }
    }
}

impl ScheduleGap {
    pub(crate) fn from_core(gap: &Gap) -> Self {
        Self {
            start_slot: gap.start_slot as i32,
            end_slot: gap.end_slot as i32,
            duration_slots: gap.duration_slots as i32,
            day_index: gap.day_index as i32,
            gap_type: gap.kind.code(),
        }
    }
}

/// Slots per day, exported for host-side sanity checks.
pub const FFI_SLOTS_PER_DAY: i32 = SLOTS_PER_DAY as i32;

/// Slots per week, exported for host-side sanity checks.
pub const FFI_WEEK_SLOTS: i32 = WEEK_SLOTS as i32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_round_trip() {
        let mut task = TimelineTask::default();
        task.set_title("Revise thermodynamics");
        task.set_subject("THER105");

        assert_eq!(task.title_str(), "Revise thermodynamics");
        assert_eq!(task.subject_str(), "THER105");
    }

    #[test]
    fn test_overlong_title_truncates() {
        let mut task = TimelineTask::default();
        task.set_title(&"x".repeat(500));
        assert_eq!(task.title_str().len(), MAX_TITLE_LEN - 1);
    }

    #[test]
    fn test_to_unit_sanitizes_fields() {
        let mut task = TimelineTask {
            priority: 99,
            category: 42,
            deadline_slot: 1000,
            preferred_slot: 5000,
            ..Default::default()
        };
        task.set_title("Weird task");

        let unit = task.to_unit().unwrap();
        assert_eq!(unit.priority, 10);
        assert_eq!(unit.category, Category::ConceptStudy);
        assert_eq!(unit.deadline_slot, WEEK_SLOTS);
        assert_eq!(unit.preferred_slot, None);
    }

    #[test]
    fn test_to_unit_rejects_zero_duration() {
        let task = TimelineTask {
            duration_slots: 0,
            ..Default::default()
        };
        assert!(task.to_unit().is_none());
    }
}
