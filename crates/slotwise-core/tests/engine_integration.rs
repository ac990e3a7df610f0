//! End-to-end scenarios through the engine facade.

use slotwise_core::{
    find_gaps, normalize_all, validate, Backend, BackwardPlanner, BlockMeta, Category, Engine,
    GapKind, OptimizeConfig, OptimizeStatus, SchedulableUnit, StudyKind, WorkItem,
};

fn make_unit(id: i32, category: Category, duration: usize) -> SchedulableUnit {
    SchedulableUnit::new(id, format!("Unit {id}"), category, duration)
}

#[test]
fn test_single_concept_unit_lands_in_morning_peak() {
    let engine = Engine::new();
    let units = vec![make_unit(1, Category::ConceptStudy, 4)
        .with_priority(9)
        .with_deadline(48)];

    let outcome = engine.optimize(&units, &OptimizeConfig::default()).unwrap();

    let slot = outcome.units[0].assigned_slot.unwrap();
    assert!(
        (16..24).contains(&slot),
        "expected 08:00-12:00 placement, got slot {slot}"
    );
    assert_eq!(outcome.status, OptimizeStatus::Success);
    assert!(outcome.fully_scheduled());
}

#[test]
fn test_locked_unit_is_respected_by_flexible_work() {
    let engine = Engine::new();
    let units = vec![
        make_unit(1, Category::FixedClass, 2).locked_at(16),
        make_unit(2, Category::ConceptStudy, 2)
            .with_priority(5)
            .with_deadline(336),
    ];

    let outcome = engine.optimize(&units, &OptimizeConfig::default()).unwrap();

    assert_eq!(outcome.units[0].assigned_slot, Some(16));
    let flexible = outcome.units[1].assigned_slot.unwrap();
    assert!(
        flexible + 2 <= 16 || flexible >= 18,
        "flexible unit overlaps the locked class at slot {flexible}"
    );
    assert_eq!(outcome.conflicts, 0);
    assert!(validate(&outcome.grid, &outcome.units).is_empty());
}

#[test]
fn test_overload_reports_unsolvable() {
    let engine = Engine::new();
    // Each unit outgrows the longest awake run (34 slots under the default
    // sleep window), so nothing can ever be placed.
    let units: Vec<_> = (0..3)
        .map(|id| make_unit(id, Category::Assignment, 40))
        .collect();

    let outcome = engine.optimize(&units, &OptimizeConfig::default()).unwrap();

    assert_eq!(outcome.status, OptimizeStatus::Unsolvable);
    assert_eq!(outcome.status.code(), -1);
    assert!(outcome.conflicts > 0);
}

#[test]
fn test_gap_report_complements_placements() {
    let engine = Engine::new();
    let units = vec![
        make_unit(1, Category::ConceptStudy, 4),
        make_unit(2, Category::PracticeStudy, 4),
        make_unit(3, Category::Revision, 1),
    ];

    let outcome = engine.optimize(&units, &OptimizeConfig::default()).unwrap();
    let gaps = find_gaps(&outcome.grid, 1);

    let gap_slots: usize = gaps.iter().map(|gap| gap.duration_slots).sum();
    assert_eq!(gap_slots, outcome.grid.free_slots());

    // No reported gap overlaps a placed unit
    for unit in &outcome.units {
        let start = unit.assigned_slot.unwrap();
        let end = start + unit.duration_slots;
        for gap in &gaps {
            assert!(gap.end_slot <= start || gap.start_slot >= end);
        }
    }
}

#[test]
fn test_fully_blocked_day_yields_no_deep_work_gaps() {
    let engine = Engine::new();
    // Sleep the whole day away
    let config = OptimizeConfig {
        sleep_start_slot: 0,
        sleep_end_slot: 48,
        ..Default::default()
    };

    let outcome = engine.optimize(&[], &config).unwrap();
    let deep_gaps: Vec<_> = find_gaps(&outcome.grid, 1)
        .into_iter()
        .filter(|gap| gap.kind == GapKind::DeepWork)
        .collect();

    assert!(deep_gaps.is_empty());
}

#[test]
fn test_backward_plan_meets_requirement_with_ample_gaps() {
    let engine = Engine::new();
    let outcome = engine.optimize(&[], &OptimizeConfig::default()).unwrap();

    let planner = BackwardPlanner::new(OptimizeConfig::default());
    let meta = BlockMeta {
        title: "Prepare for test: CHEM103".to_string(),
        subject: "CHEM103".to_string(),
    };
    let plan = planner.plan(&outcome.grid, 3, 240, &meta).unwrap();

    assert!(plan.fully_scheduled);
    let total: u32 = plan.blocks.iter().map(|block| block.duration_mins).sum();
    assert_eq!(total, 240);
}

#[test]
fn test_normalized_batch_flows_through_engine() {
    let items = vec![
        WorkItem::Revision {
            id: 1,
            chapter: "Limits".to_string(),
            subject: "MATH101".to_string(),
            credits: 4,
            days_until: 1,
            duration_mins: None,
        },
        WorkItem::LabReport {
            id: 2,
            experiment: "Titration".to_string(),
            subject: "CHEM103".to_string(),
            days_until: 2,
            duration_mins: None,
        },
        WorkItem::Task {
            id: 3,
            title: "Problem set 4".to_string(),
            subject: Some("PHYS102".to_string()),
            kind: StudyKind::Practice,
            days_until: Some(4),
            duration_mins: Some(90),
        },
    ];

    let batch = normalize_all(&items);
    assert_eq!(batch.truncated, 0);

    let engine = Engine::new();
    let outcome = engine
        .optimize(&batch.units, &OptimizeConfig::default())
        .unwrap();

    assert!(outcome.fully_scheduled());
    assert!(validate(&outcome.grid, &outcome.units).is_empty());
    // Deadlines honored end to end
    for unit in &outcome.units {
        let start = unit.assigned_slot.unwrap();
        assert!(start + unit.duration_slots <= unit.effective_deadline());
    }
}

#[test]
fn test_backends_agree_on_schedulability() {
    let config = OptimizeConfig::default();
    let inputs = [
        vec![
            make_unit(1, Category::ConceptStudy, 4).with_priority(9),
            make_unit(2, Category::PracticeStudy, 2).with_priority(7),
            make_unit(3, Category::LabWork, 4).with_deadline(96),
        ],
        vec![make_unit(1, Category::Assignment, 40)],
    ];

    for units in inputs {
        let heuristic = Engine::with_backend(Backend::Heuristic)
            .optimize(&units, &config)
            .unwrap();
        let first_fit = Engine::with_backend(Backend::FirstFit)
            .optimize(&units, &config)
            .unwrap();
        assert_eq!(heuristic.fully_scheduled(), first_fit.fully_scheduled());
    }
}

#[test]
fn test_determinism_across_repeated_calls() {
    let engine = Engine::new();
    let config = OptimizeConfig::default();
    let units = vec![
        make_unit(1, Category::ConceptStudy, 3).with_priority(6),
        make_unit(2, Category::ConceptStudy, 3).with_priority(6),
        make_unit(3, Category::PracticeStudy, 2).with_priority(9),
        make_unit(4, Category::Revision, 1).with_deadline(48),
    ];

    let first = engine.optimize(&units, &config).unwrap();
    for _ in 0..5 {
        let again = engine.optimize(&units, &config).unwrap();
        assert_eq!(again.status, first.status);
        for (a, b) in again.units.iter().zip(first.units.iter()) {
            assert_eq!(a.assigned_slot, b.assigned_slot);
        }
    }
}
