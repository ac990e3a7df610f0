//! Property tests over the packing contract.

use proptest::prelude::*;

use slotwise_core::{
    validate, Category, FirstFitOptimizer, HeuristicOptimizer, OptimizeConfig, Optimizer,
    SchedulableUnit, WEEK_SLOTS,
};

fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::ConceptStudy),
        Just(Category::PracticeStudy),
        Just(Category::MicroGap),
        Just(Category::Revision),
        Just(Category::Assignment),
        Just(Category::LabWork),
    ]
}

fn arb_unit(id: i32) -> impl Strategy<Value = SchedulableUnit> {
    (arb_category(), 1usize..8, 1u8..=10, 8usize..=WEEK_SLOTS).prop_map(
        move |(category, duration, priority, deadline)| {
            SchedulableUnit::new(id, format!("Unit {id}"), category, duration)
                .with_priority(priority)
                .with_deadline(deadline)
        },
    )
}

fn arb_units() -> impl Strategy<Value = Vec<SchedulableUnit>> {
    (1usize..20).prop_flat_map(|count| {
        (0..count)
            .map(|pos| arb_unit(pos as i32))
            .collect::<Vec<_>>()
    })
}

proptest! {
    /// Placed units never overlap and never leave the grid.
    #[test]
    fn prop_no_overlap_and_bounds(units in arb_units()) {
        let outcome = FirstFitOptimizer::new()
            .optimize(&units, &OptimizeConfig::default())
            .unwrap();

        let mut seen = vec![false; WEEK_SLOTS];
        for unit in &outcome.units {
            if let Some(start) = unit.assigned_slot {
                prop_assert!(start + unit.duration_slots <= WEEK_SLOTS);
                for slot in start..start + unit.duration_slots {
                    prop_assert!(!seen[slot], "slot {slot} claimed twice");
                    seen[slot] = true;
                }
            }
        }
    }

    /// Every placement honors the deadline bound.
    #[test]
    fn prop_deadline_bound(units in arb_units()) {
        let outcome = HeuristicOptimizer::new()
            .optimize(&units, &OptimizeConfig::default())
            .unwrap();

        for unit in &outcome.units {
            if let Some(start) = unit.assigned_slot {
                prop_assert!(start + unit.duration_slots <= unit.effective_deadline());
            }
        }
    }

    /// The same input always produces the same assignments.
    #[test]
    fn prop_deterministic(units in arb_units()) {
        let config = OptimizeConfig::default();
        let optimizer = HeuristicOptimizer::new();

        let first = optimizer.optimize(&units, &config).unwrap();
        let second = optimizer.optimize(&units, &config).unwrap();

        prop_assert_eq!(first.status, second.status);
        for (a, b) in first.units.iter().zip(second.units.iter()) {
            prop_assert_eq!(a.assigned_slot, b.assigned_slot);
        }
    }

    /// The validator agrees that produced timelines are consistent.
    #[test]
    fn prop_outcome_validates_clean(units in arb_units()) {
        let outcome = FirstFitOptimizer::new()
            .optimize(&units, &OptimizeConfig::default())
            .unwrap();
        prop_assert!(validate(&outcome.grid, &outcome.units).is_empty());
    }
}
