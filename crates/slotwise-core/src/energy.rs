//! Daily energy curve.
//!
//! A coarse model of alertness over the day: anchor points at known hours,
//! linear interpolation in between. Scheduling uses it the other way around
//! from the peak windows: low-energy hours are where free time goes, so
//! demanding work keeps the good hours.

use serde::{Deserialize, Serialize};

use crate::gaps::day_gaps;
use crate::grid::WeekGrid;
use crate::slot;

/// Energy level (1-10) at an anchor hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyAnchor {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Energy level (1-10)
    pub level: u8,
}

/// Piecewise-linear energy profile over one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyCurve {
    /// Anchor points, ascending by hour
    anchors: Vec<EnergyAnchor>,
}

impl Default for EnergyCurve {
    fn default() -> Self {
        Self::new(vec![
            EnergyAnchor { hour: 6, level: 5 },
            EnergyAnchor { hour: 8, level: 8 },
            EnergyAnchor { hour: 10, level: 9 },
            EnergyAnchor { hour: 12, level: 7 },
            EnergyAnchor { hour: 14, level: 5 },
            EnergyAnchor { hour: 16, level: 7 },
            EnergyAnchor { hour: 18, level: 6 },
            EnergyAnchor { hour: 20, level: 5 },
            EnergyAnchor { hour: 22, level: 3 },
        ])
    }
}

impl EnergyCurve {
    /// Create a curve from anchor points; they are sorted by hour.
    pub fn new(mut anchors: Vec<EnergyAnchor>) -> Self {
        anchors.sort_by_key(|anchor| anchor.hour);
        Self { anchors }
    }

    /// Interpolated energy level at an hour.
    ///
    /// Hours before the first anchor take the first level, hours after the
    /// last take the last.
    pub fn energy_at(&self, hour: u32) -> u8 {
        let Some(first) = self.anchors.first() else {
            return 5;
        };
        if hour <= first.hour {
            return first.level;
        }

        for pair in self.anchors.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if hour < next.hour {
                let span = (next.hour - prev.hour) as f64;
                let progress = (hour - prev.hour) as f64 / span;
                let level =
                    prev.level as f64 + (next.level as f64 - prev.level as f64) * progress;
                return level.round() as u8;
            }
        }
        self.anchors.last().map(|anchor| anchor.level).unwrap_or(5)
    }

    /// Whether an hour is a low-energy stretch (level 5 or below).
    pub fn is_low_energy(&self, hour: u32) -> bool {
        self.energy_at(hour) <= 5
    }
}

/// A block of allocated free time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeTimeBlock {
    pub day_index: usize,
    pub start_slot: usize,
    /// Wall-clock start, `HH:MM`
    pub start_time: String,
    pub duration_mins: u32,
}

/// Free time placed into a day, with the shortfall visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeTimeAllocation {
    pub blocks: Vec<FreeTimeBlock>,
    pub requested_mins: u32,
    pub allocated_mins: u32,
}

/// Place free time into a day's low-energy gaps.
///
/// Only gaps of at least 30 minutes whose starting hour is low-energy are
/// used, in blocks of up to an hour, until the request is met or the day
/// has no more suitable gaps.
pub fn allocate_free_time(
    grid: &WeekGrid,
    curve: &EnergyCurve,
    day: usize,
    mins_desired: u32,
) -> FreeTimeAllocation {
    let mut blocks = Vec::new();
    let mut remaining = mins_desired;

    for gap in day_gaps(grid, day, 1) {
        if remaining == 0 {
            break;
        }
        let start_hour = (slot::day_slot(gap.start_slot) / 2) as u32;
        if !curve.is_low_energy(start_hour) || gap.duration_minutes() < 30 {
            continue;
        }

        let block_mins = gap.duration_minutes().min(remaining).min(60);
        if block_mins < 30 {
            continue;
        }
        blocks.push(FreeTimeBlock {
            day_index: day,
            start_slot: gap.start_slot,
            start_time: gap.start_time.clone(),
            duration_mins: block_mins,
        });
        remaining -= block_mins;
    }

    FreeTimeAllocation {
        blocks,
        requested_mins: mins_desired,
        allocated_mins: mins_desired - remaining,
    }
}
