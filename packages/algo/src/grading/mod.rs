//! Grading & Interval Update
//!
//! SM-2 variant with two regimes:
//! - Easy (5): day-based ladder 1 -> 6 -> round(interval * EF), EF grows
//! - Forgot / Hard / Good (0, 3, 4): short learning loop of 1 / 5 / 20 minutes,
//!   ladder restarts at day 1, EF untouched
//!
//! A lapse (0) takes one point off the mastery count instead of clearing it,
//! so mastered items fall out of mastery gradually.

use crate::error::SchedulerResult;
use crate::sanitize::sanitize_record;
use crate::types::{
    Grade, ProgressRecord, ProgressStatus, DEFAULT_INTERVAL_DAYS, MIN_EASINESS_FACTOR,
    MS_PER_DAY, SECOND_INTERVAL_DAYS,
};

/// Compute the record that replaces `prev` after a graded recall.
///
/// `prev == None` is a never-studied item. A malformed `prev` is reset to the
/// zero state first. The result's `due_at` is never before `now_ms`.
pub fn advance(
    prev: Option<&ProgressRecord>,
    grade: Grade,
    item_id: &str,
    now_ms: i64,
) -> ProgressRecord {
    let base = match prev {
        Some(record) => sanitize_record(record),
        None => ProgressRecord::new(item_id),
    };

    let mut interval = base.interval;
    let mut repetition = base.repetition;
    let mut easiness_factor = base.easiness_factor;
    let mut mastery_count = base.mastery_count;

    let delay_ms = match grade.learning_step_ms() {
        None => {
            interval = match repetition {
                0 => DEFAULT_INTERVAL_DAYS,
                1 => SECOND_INTERVAL_DAYS,
                _ => scale_interval(interval, easiness_factor),
            };
            repetition = repetition.saturating_add(1);
            easiness_factor = next_easiness_factor(easiness_factor, grade);
            mastery_count = mastery_count.saturating_add(1);
            interval.saturating_mul(MS_PER_DAY)
        }
        Some(step_ms) => {
            repetition = 0;
            interval = DEFAULT_INTERVAL_DAYS;
            if grade == Grade::Forgot {
                mastery_count = (mastery_count - 1).max(0);
            }
            step_ms
        }
    };

    let status = if grade.is_easy() && repetition > 1 {
        ProgressStatus::Graduated
    } else {
        ProgressStatus::Learning
    };

    let record = ProgressRecord {
        item_id: item_id.to_string(),
        interval,
        repetition,
        easiness_factor,
        due_at: now_ms.saturating_add(delay_ms),
        mastery_count,
        status,
    };

    tracing::debug!(
        item_id,
        grade = grade.value(),
        interval = record.interval,
        repetition = record.repetition,
        mastery_count = record.mastery_count,
        due_at = record.due_at,
        "progress advanced"
    );

    record
}

/// [`advance`] for a raw quality value; anything outside {0, 3, 4, 5} is
/// rejected.
pub fn advance_quality(
    prev: Option<&ProgressRecord>,
    quality: i64,
    item_id: &str,
    now_ms: i64,
) -> SchedulerResult<ProgressRecord> {
    let grade = Grade::try_from(quality)?;
    Ok(advance(prev, grade, item_id, now_ms))
}

/// Outcome of every grade, in [`Grade::ALL`] order, without committing any.
pub fn preview(prev: Option<&ProgressRecord>, item_id: &str, now_ms: i64) -> [ProgressRecord; 4] {
    Grade::ALL.map(|grade| advance(prev, grade, item_id, now_ms))
}

/// SM-2 easiness update, floored at 1.3.
pub fn next_easiness_factor(easiness_factor: f64, grade: Grade) -> f64 {
    let q = (5 - grade.value()) as f64;
    let next = easiness_factor + (0.1 - q * (0.08 + q * 0.02));
    next.max(MIN_EASINESS_FACTOR)
}

fn scale_interval(interval: i64, easiness_factor: f64) -> i64 {
    // float -> int `as` saturates
    round_half_up(interval as f64 * easiness_factor) as i64
}

/// Rounds .5 toward positive infinity, like JavaScript's `Math.round`.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
