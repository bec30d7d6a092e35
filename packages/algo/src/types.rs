//! Common Types and Constants
//!
//! Progress records, grades and the values shared by all scheduler modules.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};

// ==================== Constants ====================

/// Easiness factor of a never-studied item
pub const DEFAULT_EASINESS_FACTOR: f64 = 2.5;

/// Lower bound of the easiness factor
pub const MIN_EASINESS_FACTOR: f64 = 1.3;

/// Interval (days) of a new or lapsed item
pub const DEFAULT_INTERVAL_DAYS: i64 = 1;

/// Interval (days) after the second consecutive easy recall
pub const SECOND_INTERVAL_DAYS: i64 = 6;

/// Easy recalls needed before an item leaves the active pool
pub const DEFAULT_MASTERY_THRESHOLD: i64 = 10;

/// Maximum number of non-mastered items in learning at once
pub const DEFAULT_POOL_LIMIT: usize = 50;

/// New items per session under the fixed-quota policy
pub const DEFAULT_NEW_PER_SESSION: usize = 10;

pub const MS_PER_MINUTE: i64 = 60 * 1000;
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// ==================== Grade ====================

/// Recall quality reported by the learner after seeing the answer.
///
/// Only four SM-2 qualities are used; anything else is rejected at the
/// boundary through [`Grade::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Grade {
    /// Complete blackout
    Forgot = 0,
    /// Recalled with serious difficulty
    Hard = 3,
    /// Recalled after hesitation
    Good = 4,
    /// Perfect recall
    Easy = 5,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Forgot, Grade::Hard, Grade::Good, Grade::Easy];

    pub fn value(self) -> i64 {
        self as i64
    }

    pub fn is_easy(self) -> bool {
        self == Grade::Easy
    }

    /// Near-term delay of the learning loop; `None` for the day-based easy path.
    pub fn learning_step_ms(self) -> Option<i64> {
        match self {
            Grade::Forgot => Some(MS_PER_MINUTE),
            Grade::Hard => Some(5 * MS_PER_MINUTE),
            Grade::Good => Some(20 * MS_PER_MINUTE),
            Grade::Easy => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Forgot => "forgot",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }

    /// Map a button label onto a grade.
    ///
    /// Accepts the English labels (`again` is an alias of `forgot`) and the
    /// Spanish ones of the original flashcard UI, with or without accents.
    pub fn from_label(label: &str) -> SchedulerResult<Self> {
        match label.trim().to_lowercase().as_str() {
            "forgot" | "again" | "olvidé" | "olvide" => Ok(Grade::Forgot),
            "hard" | "difícil" | "dificil" => Ok(Grade::Hard),
            "good" | "bien" => Ok(Grade::Good),
            "easy" | "fácil" | "facil" => Ok(Grade::Easy),
            _ => Err(SchedulerError::UnknownGradeLabel(label.to_string())),
        }
    }
}

impl TryFrom<i64> for Grade {
    type Error = SchedulerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Grade::Forgot),
            3 => Ok(Grade::Hard),
            4 => Ok(Grade::Good),
            5 => Ok(Grade::Easy),
            other => Err(SchedulerError::InvalidGrade(other)),
        }
    }
}

impl TryFrom<u8> for Grade {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Grade::try_from(i64::from(value))
    }
}

impl From<Grade> for i64 {
    fn from(grade: Grade) -> i64 {
        grade.value()
    }
}

impl FromStr for Grade {
    type Err = SchedulerError;

    /// Numeric qualities first, then labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(value) => Grade::try_from(value),
            Err(_) => Grade::from_label(s),
        }
    }
}

// ==================== Progress Model ====================

/// Informational status; selection never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    #[default]
    #[serde(alias = "new", alias = "review")]
    Learning,
    Graduated,
}

/// Per-item review state.
///
/// Numeric fields are signed so that corrupted values survive
/// deserialization and can be reset by [`crate::sanitize`] instead of
/// failing the whole map. Legacy field names of the browser app are
/// accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(alias = "wordId")]
    pub item_id: String,
    /// Days until the next review once graduated
    pub interval: i64,
    /// Consecutive easy recalls since the last lapse
    pub repetition: i64,
    #[serde(alias = "efactor")]
    pub easiness_factor: f64,
    /// Epoch milliseconds
    #[serde(alias = "nextReviewDate")]
    pub due_at: i64,
    /// Total easy recalls, minus one per lapse
    #[serde(default, alias = "easyCounter")]
    pub mastery_count: i64,
    #[serde(default)]
    pub status: ProgressStatus,
}

impl ProgressRecord {
    /// Zero state of an item that has never been graded.
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            interval: DEFAULT_INTERVAL_DAYS,
            repetition: 0,
            easiness_factor: DEFAULT_EASINESS_FACTOR,
            due_at: 0,
            mastery_count: 0,
            status: ProgressStatus::Learning,
        }
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        self.due_at <= now_ms
    }

    pub fn is_mastered(&self, mastery_threshold: i64) -> bool {
        self.mastery_count >= mastery_threshold
    }
}

/// Item identifier -> progress. Absent key means never studied.
pub type ProgressMap = HashMap<String, ProgressRecord>;
