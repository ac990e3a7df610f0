//! The first-fit fallback strategy.
//!
//! Always available and always bounded: at most units × slots probes, no
//! time budget, no scoring. Each unit tries its category's preferred window
//! day by day, then the first opening anywhere before its deadline.

use crate::config::OptimizeConfig;
use crate::error::Result;
use crate::grid::WeekGrid;
use crate::slot::{DAYS_PER_WEEK, SLOTS_PER_DAY};
use crate::unit::SchedulableUnit;

use super::{
    flexible_order, seed_grid, validate_units, OptimizationOutcome, OptimizeStatus, Optimizer,
};

/// Greedy first-fit packer.
#[derive(Debug, Clone, Default)]
pub struct FirstFitOptimizer;

impl FirstFitOptimizer {
    pub fn new() -> Self {
        Self
    }
}

impl Optimizer for FirstFitOptimizer {
    fn optimize(
        &self,
        units: &[SchedulableUnit],
        config: &OptimizeConfig,
    ) -> Result<OptimizationOutcome> {
        config.validate()?;
        validate_units(units)?;

        let mut units = units.to_vec();
        let (mut grid, mut placed, mut conflicts) = seed_grid(&mut units, config);

        for idx in flexible_order(&units) {
            let unit = &units[idx];
            match find_first_fit(&grid, unit, config) {
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
        let status = if conflicts > 0 {
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
        "first_fit"
    }
}

/// First opening for the unit: preferred window across the week first, then
/// a whole-grid scan in slot order. An opening means every slot of the range
/// is empty and the unit finishes before its deadline.
fn find_first_fit(
    grid: &WeekGrid,
    unit: &SchedulableUnit,
    config: &OptimizeConfig,
) -> Option<usize> {
    let duration = unit.duration_slots;
    let deadline = unit.effective_deadline();
    if deadline < duration {
        return None;
    }

    if let Some((win_start, win_end)) = unit.category.preferred_window(config) {
        for day in 0..DAYS_PER_WEEK {
            let offset = day * SLOTS_PER_DAY;
            for start in win_start..win_end.min(SLOTS_PER_DAY) {
                let slot = offset + start;
                if slot + duration <= deadline && grid.is_open(slot, duration) {
                    return Some(slot);
                }
            }
        }
    }

    (0..=deadline - duration).find(|&slot| grid.is_open(slot, duration))
}
