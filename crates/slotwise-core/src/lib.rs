//! # Slotwise Core Library
//!
//! This library implements a weekly timeline optimization engine for study
//! scheduling. A week is a grid of 336 half-hour slots; pending work
//! (classes, study sessions, revisions, assignments, lab reports) is
//! normalized into uniform schedulable units and packed into the grid under
//! priority, deadline and daily-routine constraints.
//!
//! ## Architecture
//!
//! - **Slot Model**: the discrete grid and wall-clock conversions
//! - **Normalizer**: heterogeneous work records to scored schedulable units
//! - **Optimizer**: two interchangeable packing strategies (heuristic
//!   scorer, first-fit fallback) behind one trait, fronted by an [`Engine`]
//!   facade that probes and falls back transparently
//! - **Gap Analyzer**: maximal free runs over a completed grid
//! - **Validator**: advisory invariant checks on a finished timeline
//! - **Backward Planner**: deadline-driven redistribution over remaining
//!   days
//!
//! Every call is synchronous and self-contained: grids and unit lists live
//! for one call, nothing is persisted, and concurrent calls need no
//! coordination.
//!
//! ## Key Components
//!
//! - [`Engine`]: facade over the optimization strategies
//! - [`SchedulableUnit`]: a normalized piece of work
//! - [`WeekGrid`]: the per-call slot grid
//! - [`BackwardPlanner`]: "N hours before deadline D" planning

pub mod config;
pub mod energy;
pub mod error;
pub mod gaps;
pub mod grid;
pub mod normalize;
pub mod optimizer;
pub mod planner;
pub mod queue;
pub mod slot;
pub mod unit;
pub mod validate;

pub use config::OptimizeConfig;
pub use energy::{allocate_free_time, EnergyAnchor, EnergyCurve, FreeTimeAllocation, FreeTimeBlock};
pub use error::{EngineError, InputError, Result};
pub use gaps::{day_gaps, find_gaps, Gap, GapKind};
pub use grid::{SlotOwner, WeekGrid};
pub use normalize::{normalize, normalize_all, NormalizedBatch, StudyKind, WorkItem, MAX_UNITS};
pub use optimizer::{
    Backend, Engine, FirstFitOptimizer, HeuristicOptimizer, OptimizationOutcome, OptimizeStatus,
    Optimizer,
};
pub use planner::{
    revision_dates, BackwardPlanner, BlockMeta, DeadlineEvent, EventKind, Plan, PlannedBlock,
    PlannerLimits, REVISION_INTERVALS,
};
pub use queue::{DeadlineQueue, QueuedReport};
pub use slot::{SLOTS_PER_DAY, SLOT_MINUTES, WEEK_SLOTS};
pub use unit::{Category, SchedulableUnit};
pub use validate::{validate, Violation, ViolationKind};
