//! Schedulable units and their categories.

use serde::{Deserialize, Serialize};

use crate::config::OptimizeConfig;
use crate::error::InputError;
use crate::slot::WEEK_SLOTS;

/// Category of a schedulable unit.
///
/// Categories carry stable integer codes (0-9) for the C ABI and drive the
/// preferred-window lookup: concept study leans on the morning peak,
/// practice study on the evening peak, everything else takes any opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// University lectures and labs (immutable once placed)
    FixedClass,
    /// Conceptual learning, best in the morning peak
    ConceptStudy,
    /// Practice problems, best in the evening peak
    PracticeStudy,
    /// 15-30 minute fillers (flashcards, quick reviews)
    MicroGap,
    /// Rest blocks
    Sleep,
    /// Break periods
    Break,
    /// Meal times
    Meal,
    /// Spaced-repetition reviews
    Revision,
    /// Assignment work
    Assignment,
    /// Lab report work
    LabWork,
}

impl Category {
    /// Stable integer code used across the FFI boundary.
    pub fn code(self) -> i32 {
        match self {
            Self::FixedClass => 0,
            Self::ConceptStudy => 1,
            Self::PracticeStudy => 2,
            Self::MicroGap => 3,
            Self::Sleep => 4,
            Self::Break => 5,
            Self::Meal => 6,
            Self::Revision => 7,
            Self::Assignment => 8,
            Self::LabWork => 9,
        }
    }

    /// Reverse of [`code`](Self::code).
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::FixedClass),
            1 => Some(Self::ConceptStudy),
            2 => Some(Self::PracticeStudy),
            3 => Some(Self::MicroGap),
            4 => Some(Self::Sleep),
            5 => Some(Self::Break),
            6 => Some(Self::Meal),
            7 => Some(Self::Revision),
            8 => Some(Self::Assignment),
            9 => Some(Self::LabWork),
            _ => None,
        }
    }

    /// Preferred within-day placement window, if the category has one.
    pub fn preferred_window(self, config: &OptimizeConfig) -> Option<(usize, usize)> {
        match self {
            Self::ConceptStudy => Some((config.concept_peak_start, config.concept_peak_end)),
            Self::PracticeStudy => Some((config.practice_peak_start, config.practice_peak_end)),
            Self::FixedClass
            | Self::MicroGap
            | Self::Sleep
            | Self::Break
            | Self::Meal
            | Self::Revision
            | Self::Assignment
            | Self::LabWork => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixedClass => "fixed_class",
            Self::ConceptStudy => "concept_study",
            Self::PracticeStudy => "practice_study",
            Self::MicroGap => "micro_gap",
            Self::Sleep => "sleep",
            Self::Break => "break",
            Self::Meal => "meal",
            Self::Revision => "revision",
            Self::Assignment => "assignment",
            Self::LabWork => "lab_work",
        }
    }
}

/// A normalized piece of schedulable work.
///
/// Units are created fresh for every optimization call and discarded when it
/// returns; the engine never stores them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulableUnit {
    pub id: i32,
    pub title: String,
    pub subject: String,
    /// Duration in half-hour slots, always > 0
    pub duration_slots: usize,
    /// 1-10, higher is more important
    pub priority: u8,
    pub category: Category,
    /// Absolute slot by which the unit must have finished (0-336)
    pub deadline_slot: usize,
    /// Locked units are placed at their preferred slot and never moved
    pub is_locked: bool,
    pub preferred_slot: Option<usize>,
    /// Filled in by the optimizer; `None` means the unit could not be placed
    pub assigned_slot: Option<usize>,
}

impl SchedulableUnit {
    /// Create a new unit.
    ///
    /// # Panics
    /// Panics if `duration_slots` is zero. Use [`try_new`](Self::try_new)
    /// for a non-panicking version.
    pub fn new(id: i32, title: impl Into<String>, category: Category, duration_slots: usize) -> Self {
        Self::try_new(id, title, category, duration_slots)
            .expect("SchedulableUnit::new: duration_slots must be positive")
    }

    /// Create a new unit, returning a Result.
    ///
    /// # Errors
    /// Returns an error if `duration_slots` is zero.
    pub fn try_new(
        id: i32,
        title: impl Into<String>,
        category: Category,
        duration_slots: usize,
    ) -> Result<Self, InputError> {
        if duration_slots == 0 {
            return Err(InputError::NonPositiveDuration(0));
        }
        Ok(Self {
            id,
            title: title.into(),
            subject: String::new(),
            duration_slots,
            priority: 5,
            category,
            deadline_slot: WEEK_SLOTS,
            is_locked: false,
            preferred_slot: None,
            assigned_slot: None,
        })
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the priority, clamped to 1-10.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority.clamp(1, 10);
        self
    }

    pub fn with_deadline(mut self, deadline_slot: usize) -> Self {
        self.deadline_slot = deadline_slot.min(WEEK_SLOTS);
        self
    }

    /// Lock the unit to a fixed starting slot.
    pub fn locked_at(mut self, slot: usize) -> Self {
        self.is_locked = true;
        self.preferred_slot = Some(slot);
        self
    }

    pub fn with_preferred_slot(mut self, slot: usize) -> Self {
        self.preferred_slot = Some(slot);
        self
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_slots as u32 * crate::slot::SLOT_MINUTES
    }

    /// Effective deadline, never past the end of the week.
    pub fn effective_deadline(&self) -> usize {
        self.deadline_slot.min(WEEK_SLOTS)
    }
}
