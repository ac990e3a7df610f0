//! Deadline-driven redistribution.
//!
//! Answers "schedule N hours of preparation before deadline D" against an
//! already-populated week grid: scan each remaining day for gaps, prefer
//! deep-work-suitable gaps close to the deadline, and allocate greedy blocks
//! until the requirement is met or the week runs dry. Also carries the
//! spaced-repetition ladder used to seed revision work.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::OptimizeConfig;
use crate::error::{InputError, Result};
use crate::gaps::{day_gaps, Gap};
use crate::grid::WeekGrid;
use crate::slot::{DAYS_PER_WEEK, SLOT_MINUTES};

/// Default spaced-repetition ladder, in days after first study.
pub const REVISION_INTERVALS: [i64; 5] = [1, 3, 7, 14, 30];

/// Kind of deadline event being prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Test,
    Quiz,
    Assignment,
    LabReport,
    Project,
    Exam,
}

impl EventKind {
    /// Preparation effort the event demands.
    pub fn estimated_hours(self) -> u32 {
        match self {
            Self::Test => 4,
            Self::Quiz => 2,
            Self::Assignment => 3,
            Self::LabReport => 2,
            Self::Project => 6,
            Self::Exam => 8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Quiz => "quiz",
            Self::Assignment => "assignment",
            Self::LabReport => "lab report",
            Self::Project => "project",
            Self::Exam => "exam",
        }
    }
}

/// A dated deadline the plan works backward from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlineEvent {
    pub kind: EventKind,
    pub subject: String,
    pub date: NaiveDate,
}

/// Labels stamped onto planned blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockMeta {
    pub title: String,
    pub subject: String,
}

/// One allocated preparation block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedBlock {
    pub id: String,
    pub day_index: usize,
    pub start_slot: usize,
    /// Wall-clock start, `HH:MM`
    pub start_time: String,
    pub duration_mins: u32,
    pub title: String,
    pub subject: String,
    pub is_deep_work: bool,
}

/// The produced block plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Allocated blocks, ordered by day
    pub blocks: Vec<PlannedBlock>,
    pub requested_mins: u32,
    pub allocated_mins: u32,
    pub fully_scheduled: bool,
    pub days_available: usize,
}

impl Plan {
    /// Blocks landing on a specific day.
    pub fn blocks_for_day(&self, day: usize) -> impl Iterator<Item = &PlannedBlock> {
        self.blocks.iter().filter(move |block| block.day_index == day)
    }
}

/// Block sizing limits for the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerLimits {
    /// Longest single block
    pub max_block_mins: u32,
    /// Shortest block worth scheduling
    pub min_block_mins: u32,
}

impl Default for PlannerLimits {
    fn default() -> Self {
        Self {
            max_block_mins: 120,
            min_block_mins: 30,
        }
    }
}

/// Backward planner over an existing week grid.
pub struct BackwardPlanner {
    config: OptimizeConfig,
    limits: PlannerLimits,
}

impl BackwardPlanner {
    /// Create a planner with default block limits.
    pub fn new(config: OptimizeConfig) -> Self {
        Self {
            config,
            limits: PlannerLimits::default(),
        }
    }

    /// Override the block limits.
    pub fn with_limits(mut self, limits: PlannerLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Plan preparation for a dated event, using its kind's effort estimate.
    pub fn plan_event(
        &self,
        grid: &WeekGrid,
        event: &DeadlineEvent,
        today: NaiveDate,
    ) -> Result<Plan> {
        let days_until = (event.date - today).num_days();
        if days_until < 0 {
            return Err(InputError::DeadlineInPast {
                deadline: event.date,
                today,
            }
            .into());
        }

        let meta = BlockMeta {
            title: format!("Prepare for {}: {}", event.kind.as_str(), event.subject),
            subject: event.subject.clone(),
        };
        self.plan(
            grid,
            (days_until as usize).min(DAYS_PER_WEEK),
            event.kind.estimated_hours() * 60,
            &meta,
        )
    }

    /// Plan `total_mins` of work across the days before `days_available`.
    ///
    /// Candidate gaps are ordered deep-work-suitable first, then by day
    /// descending (closer to the deadline); one block is taken per gap,
    /// capped at the block limits, until the requirement is met.
    pub fn plan(
        &self,
        grid: &WeekGrid,
        days_available: usize,
        total_mins: u32,
        meta: &BlockMeta,
    ) -> Result<Plan> {
        self.config.validate()?;

        let min_slots = (self.limits.min_block_mins / SLOT_MINUTES).max(1) as usize;
        let mut candidates: Vec<Gap> = (0..days_available.min(DAYS_PER_WEEK))
            .flat_map(|day| day_gaps(grid, day, min_slots))
            .collect();

        candidates.sort_by(|a, b| {
            b.suits_deep_work(&self.config)
                .cmp(&a.suits_deep_work(&self.config))
                .then(b.day_index.cmp(&a.day_index))
                .then(a.start_slot.cmp(&b.start_slot))
        });

        let mut blocks = Vec::new();
        let mut remaining = total_mins;

        for gap in &candidates {
            if remaining == 0 {
                break;
            }
            let block_mins = gap
                .duration_minutes()
                .min(remaining)
                .min(self.limits.max_block_mins);
            if block_mins < self.limits.min_block_mins {
                continue;
            }

            blocks.push(PlannedBlock {
                id: uuid::Uuid::new_v4().to_string(),
                day_index: gap.day_index,
                start_slot: gap.start_slot,
                start_time: gap.start_time.clone(),
                duration_mins: block_mins,
                title: meta.title.clone(),
                subject: meta.subject.clone(),
                is_deep_work: block_mins / SLOT_MINUTES >= self.config.deep_work_min_slots as u32,
            });
            remaining -= block_mins;
        }

        blocks.sort_by_key(|block| (block.day_index, block.start_slot));

        Ok(Plan {
            blocks,
            requested_mins: total_mins,
            allocated_mins: total_mins - remaining,
            fully_scheduled: remaining == 0,
            days_available: days_available.min(DAYS_PER_WEEK),
        })
    }
}

/// Revision due dates for material studied on `studied_on`.
///
/// Pass [`REVISION_INTERVALS`] for the default forgetting-curve ladder.
pub fn revision_dates(studied_on: NaiveDate, intervals: &[i64]) -> Vec<NaiveDate> {
    intervals
        .iter()
        .map(|&days| studied_on + chrono::Duration::days(days))
        .collect()
}
