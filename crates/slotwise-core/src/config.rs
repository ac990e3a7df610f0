//! Optimization configuration.
//!
//! All routine and heuristic parameters for one optimization call. The
//! config is plain data supplied by the caller and stays immutable for the
//! duration of the call.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::slot::SLOTS_PER_DAY;

/// Constraint and heuristic parameters for one optimization call.
///
/// Window fields are within-day slot indices (0-48). The sleep window may
/// wrap past midnight (`sleep_start_slot > sleep_end_slot`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeConfig {
    /// Slot when sleep begins (23:00 = 46)
    pub sleep_start_slot: usize,
    /// Slot when sleep ends (06:00 = 12)
    pub sleep_end_slot: usize,
    /// Morning concept peak start (08:00 = 16)
    pub concept_peak_start: usize,
    /// Morning concept peak end (12:00 = 24)
    pub concept_peak_end: usize,
    /// Evening practice peak start (16:00 = 32)
    pub practice_peak_start: usize,
    /// Evening practice peak end (20:00 = 40)
    pub practice_peak_end: usize,
    /// Minimum slots for a block to count as deep work (3 = 90 min)
    pub deep_work_min_slots: usize,
    /// Maximum slots for a micro-gap task (1 = 30 min)
    pub micro_gap_max_slots: usize,
    /// Enable energy-based placement scoring
    pub enable_heuristics: bool,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            sleep_start_slot: 46,
            sleep_end_slot: 12,
            concept_peak_start: 16,
            concept_peak_end: 24,
            practice_peak_start: 32,
            practice_peak_end: 40,
            deep_work_min_slots: 3,
            micro_gap_max_slots: 1,
            enable_heuristics: true,
        }
    }
}

impl OptimizeConfig {
    /// Check that every window slot is inside a day and thresholds are sane.
    pub fn validate(&self) -> Result<(), InputError> {
        let windows = [
            ("sleep_start_slot", self.sleep_start_slot),
            ("sleep_end_slot", self.sleep_end_slot),
            ("concept_peak_start", self.concept_peak_start),
            ("concept_peak_end", self.concept_peak_end),
            ("practice_peak_start", self.practice_peak_start),
            ("practice_peak_end", self.practice_peak_end),
        ];
        for (field, value) in windows {
            if value > SLOTS_PER_DAY {
                return Err(InputError::InvalidConfig {
                    field,
                    message: format!("slot {value} exceeds {SLOTS_PER_DAY}"),
                });
            }
        }
        if self.deep_work_min_slots == 0 {
            return Err(InputError::InvalidConfig {
                field: "deep_work_min_slots",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
