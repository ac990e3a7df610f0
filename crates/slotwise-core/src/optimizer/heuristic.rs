//! The heuristic scoring strategy.
//!
//! The performance path: every candidate opening before the deadline is
//! scored and the best one wins. Concept work is pulled toward the morning
//! peak, practice work toward the evening peak, and earlier placement earns
//! a small buffer bonus. A caller-supplied time budget turns an overlong
//! call into a `Timeout` status with a partial result instead of an
//! unbounded search.

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::config::OptimizeConfig;
use crate::error::Result;
use crate::grid::WeekGrid;
use crate::slot::{in_day_range, SLOTS_PER_DAY};
use crate::unit::{Category, SchedulableUnit};

use super::{
    flexible_order, seed_grid, validate_units, OptimizationOutcome, OptimizeStatus, Optimizer,
};

/// Score-driven packer with an optional time budget.
#[derive(Debug, Clone, Default)]
pub struct HeuristicOptimizer {
    time_budget: Option<Duration>,
}

impl HeuristicOptimizer {
    pub fn new() -> Self {
        Self { time_budget: None }
    }

    /// Bound the packing loop; exceeding the budget yields `Timeout`.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Capability probe run once at engine construction.
    ///
    /// Exercises the full packing path on a one-unit input and reports any
    /// panic as an unavailability reason instead of unwinding.
    pub fn probe() -> std::result::Result<Self, String> {
        let optimizer = Self::new();
        let check = panic::catch_unwind(AssertUnwindSafe(|| {
            let unit = SchedulableUnit::new(0, "probe", Category::ConceptStudy, 1);
            optimizer.optimize(&[unit], &OptimizeConfig::default())
        }));
        match check {
            Ok(Ok(_)) => Ok(optimizer),
            Ok(Err(err)) => Err(err.to_string()),
            Err(_) => Err("probe panicked".to_string()),
        }
    }
}

impl Optimizer for HeuristicOptimizer {
    fn optimize(
        &self,
        units: &[SchedulableUnit],
        config: &OptimizeConfig,
    ) -> Result<OptimizationOutcome> {
        config.validate()?;
        validate_units(units)?;

        let start = Instant::now();
        let mut units = units.to_vec();
        let (mut grid, mut placed, mut conflicts) = seed_grid(&mut units, config);

        let order = flexible_order(&units);
        let mut timed_out = false;

        for (pos, &idx) in order.iter().enumerate() {
            if let Some(budget) = self.time_budget {
                if start.elapsed() > budget {
                    tracing::warn!(
                        budget_ms = budget.as_millis() as u64,
                        remaining_units = order.len() - pos,
                        "time budget elapsed, returning partial timeline"
                    );
                    timed_out = true;
                    for &rest in &order[pos..] {
                        units[rest].assigned_slot = None;
                        conflicts += 1;
                    }
                    break;
                }
            }

            let unit = &units[idx];
            match find_best_slot(&grid, unit, config) {
                Some(slot) => {
                    grid.place(unit.id, slot, unit.duration_slots);
                    units[idx].assigned_slot = Some(slot);
                    placed += 1;
                }
                None => {
                    units[idx].assigned_slot = None;
                    conflicts += 1;
                }
            }
        }

        grid.gaps_filled = placed;
        grid.conflicts = conflicts;
        let status = if timed_out {
            OptimizeStatus::Timeout
        } else if conflicts > 0 {
            OptimizeStatus::Unsolvable
        } else {
            OptimizeStatus::Success
        };

        Ok(OptimizationOutcome {
            grid,
            units,
            status,
            gaps_filled: placed,
            conflicts,
        })
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

/// Best-scoring opening before the deadline; a valid preferred slot wins
/// outright. Ties go to the earliest slot.
fn find_best_slot(
    grid: &WeekGrid,
    unit: &SchedulableUnit,
    config: &OptimizeConfig,
) -> Option<usize> {
    let duration = unit.duration_slots;
    let deadline = unit.effective_deadline();
    if deadline < duration {
        return None;
    }

    if let Some(preferred) = unit.preferred_slot {
        if preferred + duration <= deadline && grid.is_open(preferred, duration) {
            return Some(preferred);
        }
    }

    let mut best: Option<(i32, usize)> = None;
    for slot in 0..=deadline - duration {
        if !grid.is_open(slot, duration) {
            continue;
        }
        let score = placement_score(slot, unit, config);
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, slot));
        }
    }
    best.map(|(_, slot)| slot)
}

/// Energy-matching score for starting a unit at `slot`.
fn placement_score(slot: usize, unit: &SchedulableUnit, config: &OptimizeConfig) -> i32 {
    if !config.enable_heuristics {
        return 0;
    }

    let in_concept = in_day_range(slot, config.concept_peak_start, config.concept_peak_end);
    let in_practice = in_day_range(slot, config.practice_peak_start, config.practice_peak_end);

    let mut score = 0;
    match unit.category {
        Category::ConceptStudy => {
            if in_concept {
                score += 20;
            }
            if in_practice {
                score -= 10;
            }
        }
        Category::PracticeStudy => {
            if in_practice {
                score += 20;
            }
            if in_concept {
                score -= 10;
            }
        }
        _ => {}
    }

    // Earlier placement leaves more buffer before the deadline
    let days_before_deadline = (unit.effective_deadline() - slot) / SLOTS_PER_DAY;
    score + days_before_deadline as i32 * 2
}
