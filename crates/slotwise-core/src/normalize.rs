//! Work-item normalization and priority scoring.
//!
//! Collaborators hand the engine whatever they track: spaced-repetition
//! revisions, lab reports, study goals, plain tasks. Normalization maps each
//! record onto a uniform [`SchedulableUnit`] with a computed priority, a
//! category and a deadline slot, and caps the batch at the per-call unit
//! limit, reporting how many records were dropped rather than losing them
//! silently.

use serde::{Deserialize, Serialize};

use crate::slot::{SLOTS_PER_DAY, SLOT_MINUTES, WEEK_SLOTS};
use crate::unit::{Category, SchedulableUnit};

/// Maximum units accepted by one optimization call.
pub const MAX_UNITS: usize = 100;

/// Priority weights for pending work, highest first.
mod weight {
    pub const OVERDUE: u32 = 100;
    pub const DUE_TODAY: u32 = 90;
    pub const EXAM_PREP: u32 = 85;
    pub const DUE_TOMORROW: u32 = 80;
    pub const URGENT_LAB: u32 = 75;
    pub const TEST_PREP: u32 = 70;
    pub const REVISION_DUE: u32 = 65;
    pub const ASSIGNMENT: u32 = 60;
    pub const LAB_WORK: u32 = 55;
    pub const REGULAR_STUDY: u32 = 50;
    pub const PRACTICE: u32 = 45;
    pub const REVISION_UPCOMING: u32 = 40;
    pub const FREE_TIME: u32 = 10;
}

/// What kind of work a plain task record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyKind {
    Study,
    Practice,
    Assignment,
    ExamPrep,
    TestPrep,
    FreeTime,
}

/// A raw collaborator record awaiting normalization.
///
/// `days_until` is relative to the start of the week grid: 0 means due
/// today, negative means overdue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkItem {
    Revision {
        id: i32,
        chapter: String,
        subject: String,
        credits: u32,
        days_until: i32,
        duration_mins: Option<u32>,
    },
    LabReport {
        id: i32,
        experiment: String,
        subject: String,
        days_until: i32,
        duration_mins: Option<u32>,
    },
    Goal {
        id: i32,
        title: String,
        subject: Option<String>,
        days_until: Option<i32>,
        duration_mins: Option<u32>,
    },
    Task {
        id: i32,
        title: String,
        subject: Option<String>,
        kind: StudyKind,
        days_until: Option<i32>,
        duration_mins: Option<u32>,
    },
}

/// A normalized batch, with the count of records dropped at the cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedBatch {
    pub units: Vec<SchedulableUnit>,
    pub truncated: usize,
}

/// Map one collaborator record onto a schedulable unit.
pub fn normalize(item: &WorkItem) -> SchedulableUnit {
    let score = priority_score(item);
    let mins = item.duration_mins().unwrap_or_else(|| default_duration_mins(item));

    SchedulableUnit::new(item.id(), item.label(), item.category(), mins_to_slots(mins))
        .with_subject(item.subject().unwrap_or_default())
        .with_priority(score_to_priority(score))
        .with_deadline(deadline_slot(item.days_until()))
}

/// Normalize a batch, capping the output at [`MAX_UNITS`].
///
/// Records beyond the cap are dropped in input order and counted in
/// `truncated` so the caller can surface the loss.
pub fn normalize_all(items: &[WorkItem]) -> NormalizedBatch {
    let truncated = items.len().saturating_sub(MAX_UNITS);
    let units = items.iter().take(MAX_UNITS).map(normalize).collect();
    NormalizedBatch { units, truncated }
}

/// Raw priority score (10-100 plus credit bonus) for a record.
fn priority_score(item: &WorkItem) -> u32 {
    match item {
        WorkItem::Revision {
            credits, days_until, ..
        } => {
            let base = if *days_until <= 1 {
                weight::REVISION_DUE
            } else {
                weight::REVISION_UPCOMING
            };
            base + credits * 5
        }
        WorkItem::LabReport { days_until, .. } => match *days_until {
            d if d < 0 => weight::OVERDUE,
            0 => weight::DUE_TODAY,
            1..=2 => weight::URGENT_LAB,
            _ => weight::LAB_WORK,
        },
        WorkItem::Goal { days_until, .. } => match days_until {
            Some(d) if *d <= 1 => weight::DUE_TODAY,
            _ => weight::ASSIGNMENT,
        },
        WorkItem::Task {
            kind, days_until, ..
        } => match days_until {
            Some(d) if *d < 0 => weight::OVERDUE,
            Some(0) => weight::DUE_TODAY,
            Some(1) => weight::DUE_TOMORROW,
            _ => match kind {
                StudyKind::Study => weight::REGULAR_STUDY,
                StudyKind::Practice => weight::PRACTICE,
                StudyKind::Assignment => weight::ASSIGNMENT,
                StudyKind::ExamPrep => weight::EXAM_PREP,
                StudyKind::TestPrep => weight::TEST_PREP,
                StudyKind::FreeTime => weight::FREE_TIME,
            },
        },
    }
}

/// Collapse a weight-table score into the unit's 1-10 priority band.
fn score_to_priority(score: u32) -> u8 {
    (score / 10).clamp(1, 10) as u8
}

fn default_duration_mins(item: &WorkItem) -> u32 {
    match item {
        WorkItem::Revision { .. } => 30,
        WorkItem::LabReport { .. } => 120,
        WorkItem::Goal { .. } | WorkItem::Task { .. } => 60,
    }
}

fn mins_to_slots(mins: u32) -> usize {
    (mins.div_ceil(SLOT_MINUTES) as usize).max(1)
}

/// Deadline at the end of the due day; overdue or open-ended work may use
/// the whole week.
fn deadline_slot(days_until: Option<i32>) -> usize {
    match days_until {
        Some(d) if d >= 0 => (((d as usize) + 1) * SLOTS_PER_DAY).min(WEEK_SLOTS),
        _ => WEEK_SLOTS,
    }
}

impl WorkItem {
    pub fn id(&self) -> i32 {
        match self {
            Self::Revision { id, .. }
            | Self::LabReport { id, .. }
            | Self::Goal { id, .. }
            | Self::Task { id, .. } => *id,
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Revision { chapter, .. } => format!("Revise: {chapter}"),
            Self::LabReport { experiment, .. } => format!("Lab report: {experiment}"),
            Self::Goal { title, .. } | Self::Task { title, .. } => title.clone(),
        }
    }

    fn subject(&self) -> Option<String> {
        match self {
            Self::Revision { subject, .. } | Self::LabReport { subject, .. } => {
                Some(subject.clone())
            }
            Self::Goal { subject, .. } | Self::Task { subject, .. } => subject.clone(),
        }
    }

    fn days_until(&self) -> Option<i32> {
        match self {
            Self::Revision { days_until, .. } | Self::LabReport { days_until, .. } => {
                Some(*days_until)
            }
            Self::Goal { days_until, .. } | Self::Task { days_until, .. } => *days_until,
        }
    }

    fn duration_mins(&self) -> Option<u32> {
        match self {
            Self::Revision { duration_mins, .. }
            | Self::LabReport { duration_mins, .. }
            | Self::Goal { duration_mins, .. }
            | Self::Task { duration_mins, .. } => *duration_mins,
        }
    }

    fn category(&self) -> Category {
        match self {
            Self::Revision { .. } => Category::Revision,
            Self::LabReport { .. } => Category::LabWork,
            Self::Goal { .. } => Category::Assignment,
            Self::Task { kind, .. } => match kind {
                StudyKind::Study | StudyKind::ExamPrep | StudyKind::TestPrep => {
                    Category::ConceptStudy
                }
                StudyKind::Practice => Category::PracticeStudy,
                StudyKind::Assignment => Category::Assignment,
                StudyKind::FreeTime => Category::Break,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: i32, kind: StudyKind, days_until: Option<i32>) -> WorkItem {
        WorkItem::Task {
            id,
            title: format!("Task {id}"),
            subject: Some("MATH101".to_string()),
            kind,
            days_until,
            duration_mins: None,
        }
    }

    #[test]
    fn test_overdue_outranks_everything() {
        let overdue = normalize(&make_task(1, StudyKind::Study, Some(-1)));
        let exam = normalize(&make_task(2, StudyKind::ExamPrep, None));
        let study = normalize(&make_task(3, StudyKind::Study, None));

        assert_eq!(overdue.priority, 10);
        assert!(exam.priority > study.priority);
    }

    #[test]
    fn test_revision_urgency_and_credit_weight() {
        let due = WorkItem::Revision {
            id: 1,
            chapter: "Integrals".to_string(),
            subject: "MATH101".to_string(),
            credits: 4,
            days_until: 1,
            duration_mins: None,
        };
        let upcoming = WorkItem::Revision {
            id: 2,
            chapter: "Vectors".to_string(),
            subject: "PHYS102".to_string(),
            credits: 0,
            days_until: 5,
            duration_mins: None,
        };

        // 65 + 4*5 = 85 -> 8; 40 -> 4
        assert_eq!(normalize(&due).priority, 8);
        assert_eq!(normalize(&upcoming).priority, 4);
        assert_eq!(normalize(&due).category, Category::Revision);
    }

    #[test]
    fn test_lab_report_urgency_ladder() {
        let lab = |id, days_until| WorkItem::LabReport {
            id,
            experiment: "Titration".to_string(),
            subject: "CHEM103".to_string(),
            days_until,
            duration_mins: None,
        };

        assert_eq!(normalize(&lab(1, -1)).priority, 10); // overdue
        assert_eq!(normalize(&lab(2, 0)).priority, 9); // due today
        assert_eq!(normalize(&lab(3, 2)).priority, 7); // urgent
        assert_eq!(normalize(&lab(4, 6)).priority, 5); // routine
    }

    #[test]
    fn test_default_durations() {
        let revision = WorkItem::Revision {
            id: 1,
            chapter: "Ch 3".to_string(),
            subject: "COMP104".to_string(),
            credits: 3,
            days_until: 2,
            duration_mins: None,
        };
        let lab = WorkItem::LabReport {
            id: 2,
            experiment: "Pendulum".to_string(),
            subject: "PHYS102".to_string(),
            days_until: 4,
            duration_mins: None,
        };
        let goal = WorkItem::Goal {
            id: 3,
            title: "Finish problem set".to_string(),
            subject: None,
            days_until: None,
            duration_mins: None,
        };

        assert_eq!(normalize(&revision).duration_slots, 1); // 30 min
        assert_eq!(normalize(&lab).duration_slots, 4); // 120 min
        assert_eq!(normalize(&goal).duration_slots, 2); // 60 min
    }

    #[test]
    fn test_odd_durations_round_up() {
        let task = WorkItem::Task {
            id: 1,
            title: "Sketch report outline".to_string(),
            subject: None,
            kind: StudyKind::Study,
            days_until: None,
            duration_mins: Some(45),
        };
        assert_eq!(normalize(&task).duration_slots, 2);
    }

    #[test]
    fn test_deadline_maps_to_end_of_day() {
        let due_today = normalize(&make_task(1, StudyKind::Study, Some(0)));
        let due_in_three = normalize(&make_task(2, StudyKind::Study, Some(3)));
        let overdue = normalize(&make_task(3, StudyKind::Study, Some(-2)));

        assert_eq!(due_today.deadline_slot, SLOTS_PER_DAY);
        assert_eq!(due_in_three.deadline_slot, 4 * SLOTS_PER_DAY);
        assert_eq!(overdue.deadline_slot, WEEK_SLOTS);
    }

    #[test]
    fn test_batch_truncation_is_reported() {
        let items: Vec<WorkItem> = (0..MAX_UNITS as i32 + 15)
            .map(|id| make_task(id, StudyKind::Study, None))
            .collect();

        let batch = normalize_all(&items);
        assert_eq!(batch.units.len(), MAX_UNITS);
        assert_eq!(batch.truncated, 15);
        // Input order preserved up to the cap
        assert_eq!(batch.units[0].id, 0);
        assert_eq!(batch.units[MAX_UNITS - 1].id, MAX_UNITS as i32 - 1);
    }
}
