//! Optimization strategies and the engine facade.
//!
//! Two packing strategies honor one contract behind the [`Optimizer`]
//! trait: the heuristic scorer (the performance path, with placement
//! scoring and a caller-supplied time budget) and the first-fit fallback
//! (always available, always bounded). The [`Engine`] facade selects a
//! strategy once at construction and transparently falls back to first-fit
//! if the preferred backend misbehaves, so callers never observe a failed
//! request because of backend trouble.

mod first_fit;
mod heuristic;

pub use first_fit::FirstFitOptimizer;
pub use heuristic::HeuristicOptimizer;

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::OptimizeConfig;
use crate::error::{InputError, Result};
use crate::grid::WeekGrid;
use crate::normalize::MAX_UNITS;
use crate::slot::WEEK_SLOTS;
use crate::unit::SchedulableUnit;

/// Terminal status of one optimization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizeStatus {
    /// Every unit was placed
    Success,
    /// At least one unit could not be placed before its deadline
    Unsolvable,
    /// The time budget elapsed before every unit was tried
    Timeout,
}

impl OptimizeStatus {
    /// Stable integer code used across the FFI boundary.
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Unsolvable => -1,
            Self::Timeout => -2,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// Result of one optimization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub grid: WeekGrid,
    /// The input units in input order, with `assigned_slot` filled in
    pub units: Vec<SchedulableUnit>,
    pub status: OptimizeStatus,
    /// Units placed by this call
    pub gaps_filled: u32,
    /// Units left unplaced or displaced by locked placements
    pub conflicts: u32,
}

impl OptimizationOutcome {
    /// Whether every unit found a home.
    pub fn fully_scheduled(&self) -> bool {
        self.conflicts == 0 && self.status.is_success()
    }
}

/// A timeline packing strategy.
///
/// Implementations are deterministic: the same units and config always
/// produce the same assignments and status.
pub trait Optimizer: Send + Sync {
    fn optimize(
        &self,
        units: &[SchedulableUnit],
        config: &OptimizeConfig,
    ) -> Result<OptimizationOutcome>;

    fn name(&self) -> &'static str;
}

/// Reject inputs the packing loops must never see.
fn validate_units(units: &[SchedulableUnit]) -> Result<(), InputError> {
    if units.len() > MAX_UNITS {
        return Err(InputError::TooManyUnits {
            count: units.len(),
            max: MAX_UNITS,
        });
    }
    for unit in units {
        if unit.duration_slots == 0 {
            return Err(InputError::NonPositiveDuration(0));
        }
        if unit.deadline_slot > WEEK_SLOTS {
            return Err(InputError::SlotOutOfRange {
                slot: unit.deadline_slot as i64,
                max: WEEK_SLOTS,
            });
        }
        if let Some(preferred) = unit.preferred_slot {
            if preferred >= WEEK_SLOTS {
                return Err(InputError::SlotOutOfRange {
                    slot: preferred as i64,
                    max: WEEK_SLOTS,
                });
            }
        }
    }
    Ok(())
}

/// Block the sleep window and force-place locked units.
///
/// Locked units land at their preferred slot unconditionally, in input
/// order; whatever they overwrite is evicted and counted as a conflict. A
/// locked unit without a preferred slot has nowhere fixed to go and counts
/// as a conflict itself.
fn seed_grid(units: &mut [SchedulableUnit], config: &OptimizeConfig) -> (WeekGrid, u32, u32) {
    let mut grid = WeekGrid::new();
    grid.block_sleep(config);

    let mut conflicts = 0;
    let mut placed: u32 = 0;

    for idx in 0..units.len() {
        if !units[idx].is_locked {
            continue;
        }
        let id = units[idx].id;
        let duration = units[idx].duration_slots;
        let preferred = units[idx].preferred_slot;
        match preferred {
            Some(slot) if slot + duration <= WEEK_SLOTS => {
                let displaced = grid.place_locked(id, slot, duration);
                units[idx].assigned_slot = Some(slot);
                placed += 1;
                for prior in displaced {
                    if let Some(victim) = units.iter_mut().find(|u| u.id == prior) {
                        victim.assigned_slot = None;
                        placed = placed.saturating_sub(1);
                    }
                    conflicts += 1;
                }
            }
            _ => {
                units[idx].assigned_slot = None;
                conflicts += 1;
            }
        }
    }

    (grid, placed, conflicts)
}

/// Indices of units the packing loop still has to place, in deterministic
/// order: priority descending, deadline ascending, then input order (the
/// sort is stable).
fn flexible_order(units: &[SchedulableUnit]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..units.len())
        .filter(|&idx| !units[idx].is_locked)
        .collect();
    order.sort_by(|&a, &b| {
        units[b]
            .priority
            .cmp(&units[a].priority)
            .then(units[a].deadline_slot.cmp(&units[b].deadline_slot))
    });
    order
}

/// Which strategy an engine is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Heuristic,
    FirstFit,
}

/// The engine facade.
///
/// Construct one per process (or per subsystem) and share it by reference;
/// there is no ambient global. `Engine::new` probes the heuristic backend
/// once and falls back to first-fit if the probe fails. A panic inside the
/// selected backend is caught, logged and transparently retried on the
/// first-fit path, so the caller's request still completes with the same
/// external contract.
pub struct Engine {
    strategy: Box<dyn Optimizer>,
    fallback: FirstFitOptimizer,
    backend: Backend,
}

impl Engine {
    /// Create an engine with the preferred (heuristic) backend.
    pub fn new() -> Self {
        match HeuristicOptimizer::probe() {
            Ok(optimizer) => Self {
                strategy: Box::new(optimizer),
                fallback: FirstFitOptimizer::new(),
                backend: Backend::Heuristic,
            },
            Err(reason) => {
                tracing::warn!(%reason, "heuristic backend unavailable, using first-fit");
                Self::with_backend(Backend::FirstFit)
            }
        }
    }

    /// Create an engine pinned to a specific backend.
    pub fn with_backend(backend: Backend) -> Self {
        let strategy: Box<dyn Optimizer> = match backend {
            Backend::Heuristic => Box::new(HeuristicOptimizer::new()),
            Backend::FirstFit => Box::new(FirstFitOptimizer::new()),
        };
        Self {
            strategy,
            fallback: FirstFitOptimizer::new(),
            backend,
        }
    }

    /// Create an engine whose heuristic backend honors a time budget.
    pub fn with_time_budget(budget: Duration) -> Self {
        Self {
            strategy: Box::new(HeuristicOptimizer::new().with_time_budget(budget)),
            fallback: FirstFitOptimizer::new(),
            backend: Backend::Heuristic,
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Run one optimization call.
    ///
    /// Input errors propagate; a backend panic is caught, logged and the
    /// call re-runs on the first-fit fallback.
    pub fn optimize(
        &self,
        units: &[SchedulableUnit],
        config: &OptimizeConfig,
    ) -> Result<OptimizationOutcome> {
        let attempt =
            panic::catch_unwind(AssertUnwindSafe(|| self.strategy.optimize(units, config)));
        match attempt {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    backend = self.strategy.name(),
                    "optimizer backend panicked, retrying on first-fit fallback"
                );
                self.fallback.optimize(units, config)
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
