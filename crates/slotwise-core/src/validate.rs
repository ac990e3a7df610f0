//! Post-hoc constraint validation.
//!
//! Advisory checks over a completed grid and its unit list: ranges stay in
//! bounds, placed units own every slot of their range, deadlines hold. The
//! validator never mutates the grid; an empty report means the timeline is
//! consistent.

use serde::{Deserialize, Serialize};

use crate::grid::{SlotOwner, WeekGrid};
use crate::slot::WEEK_SLOTS;
use crate::unit::SchedulableUnit;

/// Kind of constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A slot in the unit's range is owned by someone else
    Overlap,
    /// The unit finishes after its deadline
    DeadlineViolation,
    /// The unit's range leaves the weekly grid
    OutOfBounds,
}

/// One detected violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub unit_id: i32,
    /// Offending slot, where one can be named
    pub slot: Option<usize>,
}

/// Check every placed unit against the grid.
///
/// Unplaced units (no assigned slot) are skipped; being unplaced is a
/// scheduling conflict, not an invariant violation.
pub fn validate(grid: &WeekGrid, units: &[SchedulableUnit]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for unit in units {
        let Some(assigned) = unit.assigned_slot else {
            continue;
        };
        let end = assigned + unit.duration_slots;

        if end > WEEK_SLOTS {
            violations.push(Violation {
                kind: ViolationKind::OutOfBounds,
                unit_id: unit.id,
                slot: Some(end - 1),
            });
        }

        for slot in assigned..end.min(WEEK_SLOTS) {
            match grid.owner(slot) {
                SlotOwner::Unit(id) if id == unit.id => {}
                _ => violations.push(Violation {
                    kind: ViolationKind::Overlap,
                    unit_id: unit.id,
                    slot: Some(slot),
                }),
            }
        }

        if end > unit.effective_deadline() {
            violations.push(Violation {
                kind: ViolationKind::DeadlineViolation,
                unit_id: unit.id,
                slot: None,
            });
        }
    }

    violations
}
