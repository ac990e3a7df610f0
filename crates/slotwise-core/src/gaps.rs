//! Gap detection over a completed week grid.
//!
//! Finds maximal runs of empty slots that can absorb more work. Blocked
//! slots terminate a run without counting as free time.

use serde::{Deserialize, Serialize};

use crate::config::OptimizeConfig;
use crate::grid::WeekGrid;
use crate::slot::{self, SLOTS_PER_DAY, SLOT_MINUTES, WEEK_SLOTS};

/// Size category of a gap.
///
/// These thresholds are presentational; scheduling decisions about deep-work
/// suitability go through [`Gap::suits_deep_work`] and the config threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    /// A single free slot (30 minutes)
    Micro,
    /// Up to four free slots (2 hours)
    Standard,
    /// Anything longer
    DeepWork,
}

impl GapKind {
    /// Categorize a gap by its length in slots.
    pub fn from_slots(duration_slots: usize) -> Self {
        if duration_slots <= 1 {
            Self::Micro
        } else if duration_slots <= 4 {
            Self::Standard
        } else {
            Self::DeepWork
        }
    }

    /// Stable integer code used across the FFI boundary.
    pub fn code(self) -> i32 {
        match self {
            Self::Micro => 0,
            Self::Standard => 1,
            Self::DeepWork => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Standard => "standard",
            Self::DeepWork => "deep_work",
        }
    }
}

/// A maximal run of empty slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gap {
    pub start_slot: usize,
    /// Exclusive end slot
    pub end_slot: usize,
    pub duration_slots: usize,
    pub day_index: usize,
    pub kind: GapKind,
    /// Wall-clock start, `HH:MM`
    pub start_time: String,
    /// Wall-clock end, `HH:MM` (`24:00` at a day boundary)
    pub end_time: String,
}

impl Gap {
    fn new(start_slot: usize, end_slot: usize) -> Self {
        let duration_slots = end_slot - start_slot;
        Self {
            start_slot,
            end_slot,
            duration_slots,
            day_index: slot::day_index(start_slot),
            kind: GapKind::from_slots(duration_slots),
            start_time: slot::format_slot(start_slot),
            end_time: format_gap_end(end_slot),
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_slots as u32 * SLOT_MINUTES
    }

    /// Whether a task of `duration_slots` fits in this gap.
    pub fn can_fit(&self, duration_slots: usize) -> bool {
        self.duration_slots >= duration_slots
    }

    /// Whether this gap is long enough for sustained focus, per the
    /// authoritative config threshold.
    pub fn suits_deep_work(&self, config: &OptimizeConfig) -> bool {
        self.duration_slots >= config.deep_work_min_slots
    }
}

/// A gap ending exactly on a day boundary reads as 24:00, not 00:00.
fn format_gap_end(end_slot: usize) -> String {
    if end_slot > 0 && end_slot % SLOTS_PER_DAY == 0 {
        "24:00".to_string()
    } else {
        slot::format_slot(end_slot)
    }
}

/// Find every maximal empty run of at least `min_duration` slots.
///
/// The produced set is exactly the complement of placed-unit ranges and
/// blocked slots (before the minimum-duration filter).
pub fn find_gaps(grid: &WeekGrid, min_duration: usize) -> Vec<Gap> {
    scan_range(grid, 0, WEEK_SLOTS, min_duration)
}

/// Find gaps within a single day.
pub fn day_gaps(grid: &WeekGrid, day: usize, min_duration: usize) -> Vec<Gap> {
    let start = day * SLOTS_PER_DAY;
    scan_range(grid, start, start + SLOTS_PER_DAY, min_duration)
}

fn scan_range(grid: &WeekGrid, from: usize, to: usize, min_duration: usize) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut run_start: Option<usize> = None;

    for slot in from..to {
        if grid.owner(slot).is_empty() {
            run_start.get_or_insert(slot);
        } else if let Some(start) = run_start.take() {
            if slot - start >= min_duration.max(1) {
                gaps.push(Gap::new(start, slot));
            }
        }
    }
    if let Some(start) = run_start {
        if to - start >= min_duration.max(1) {
            gaps.push(Gap::new(start, to));
        }
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptimizeConfig;

    #[test]
    fn test_gap_kind_classification() {
        assert_eq!(GapKind::from_slots(1), GapKind::Micro);
        assert_eq!(GapKind::from_slots(2), GapKind::Standard);
        assert_eq!(GapKind::from_slots(4), GapKind::Standard);
        assert_eq!(GapKind::from_slots(5), GapKind::DeepWork);
    }

    #[test]
    fn test_empty_grid_is_one_gap() {
        let grid = WeekGrid::new();
        let gaps = find_gaps(&grid, 1);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].start_slot, 0);
        assert_eq!(gaps[0].end_slot, WEEK_SLOTS);
        assert_eq!(gaps[0].kind, GapKind::DeepWork);
        assert_eq!(gaps[0].end_time, "24:00");
    }

    #[test]
    fn test_blocked_slots_terminate_but_are_not_gaps() {
        let mut grid = WeekGrid::new();
        grid.block_sleep(&OptimizeConfig::default());

        let gaps = find_gaps(&grid, 1);
        // One awake window per day: slots 12..46
        assert_eq!(gaps.len(), 7);
        for (day, gap) in gaps.iter().enumerate() {
            assert_eq!(gap.start_slot, day * 48 + 12);
            assert_eq!(gap.end_slot, day * 48 + 46);
            assert_eq!(gap.duration_slots, 34);
            assert_eq!(gap.start_time, "06:00");
            assert_eq!(gap.end_time, "23:00");
        }
    }

    #[test]
    fn test_placement_splits_gaps() {
        let mut grid = WeekGrid::new();
        grid.block_sleep(&OptimizeConfig::default());
        grid.place(1, 16, 4); // 08:00-10:00 on day 0

        let gaps = day_gaps(&grid, 0, 1);
        assert_eq!(gaps.len(), 2);
        assert_eq!((gaps[0].start_slot, gaps[0].end_slot), (12, 16));
        assert_eq!((gaps[1].start_slot, gaps[1].end_slot), (20, 46));
        assert_eq!(gaps[0].kind, GapKind::Standard);
        assert_eq!(gaps[1].kind, GapKind::DeepWork);
    }

    #[test]
    fn test_min_duration_filter() {
        let mut grid = WeekGrid::new();
        grid.block_sleep(&OptimizeConfig::default());
        grid.place(1, 13, 33); // leaves a single free slot at 12 on day 0

        let all = day_gaps(&grid, 0, 1);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].duration_slots, 1);

        let filtered = day_gaps(&grid, 0, 2);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_fully_blocked_day_has_no_deep_work() {
        let mut grid = WeekGrid::new();
        let config = OptimizeConfig {
            sleep_start_slot: 0,
            sleep_end_slot: 48,
            ..Default::default()
        };
        grid.block_sleep(&config);

        let deep: Vec<_> = day_gaps(&grid, 3, 1)
            .into_iter()
            .filter(|gap| gap.kind == GapKind::DeepWork)
            .collect();
        assert!(deep.is_empty());
        assert!(day_gaps(&grid, 3, 1).is_empty());
    }

    #[test]
    fn test_deep_work_suitability_uses_config() {
        let grid = WeekGrid::new();
        let gap = &find_gaps(&grid, 1)[0];

        let strict = OptimizeConfig {
            deep_work_min_slots: 400,
            ..Default::default()
        };
        assert!(gap.suits_deep_work(&OptimizeConfig::default()));
        assert!(!gap.suits_deep_work(&strict));
    }

    #[test]
    fn test_complementarity_with_placements() {
        let mut grid = WeekGrid::new();
        grid.block_sleep(&OptimizeConfig::default());
        grid.place(1, 20, 4);
        grid.place(2, 100, 2);

        let gap_slots: usize = find_gaps(&grid, 1).iter().map(|g| g.duration_slots).sum();
        assert_eq!(gap_slots, grid.free_slots());
    }
}
