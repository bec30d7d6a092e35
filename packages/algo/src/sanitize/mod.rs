//! Data Sanitization
//!
//! Progress records come back from storage the caller controls, so their
//! numbers cannot be trusted. A record that breaks an invariant is replaced by
//! the zero state of its item rather than fed into the interval arithmetic.
//!
//! Functions:
//! - Invariant check for a single record
//! - Reset of malformed records (single record or whole map)
//! - Effective mastery / due values used by session selection

use crate::types::{ProgressMap, ProgressRecord, MIN_EASINESS_FACTOR};

/// Reason a record was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedRecord {
    #[error("negative interval {0}")]
    NegativeInterval(i64),
    #[error("zero interval after {0} repetitions")]
    ZeroInterval(i64),
    #[error("negative repetition {0}")]
    NegativeRepetition(i64),
    #[error("negative mastery count {0}")]
    NegativeMasteryCount(i64),
    #[error("non-finite easiness factor")]
    NonFiniteEasiness,
    #[error("easiness factor {0} below floor")]
    EasinessBelowFloor(f64),
    #[error("negative due timestamp {0}")]
    NegativeDueAt(i64),
}

/// Check every invariant of a progress record.
pub fn check_record(record: &ProgressRecord) -> Result<(), MalformedRecord> {
    if record.interval < 0 {
        return Err(MalformedRecord::NegativeInterval(record.interval));
    }
    if record.repetition < 0 {
        return Err(MalformedRecord::NegativeRepetition(record.repetition));
    }
    // interval 0 only makes sense before the first successful review
    if record.interval == 0 && record.repetition > 0 {
        return Err(MalformedRecord::ZeroInterval(record.repetition));
    }
    if record.mastery_count < 0 {
        return Err(MalformedRecord::NegativeMasteryCount(record.mastery_count));
    }
    if !record.easiness_factor.is_finite() {
        return Err(MalformedRecord::NonFiniteEasiness);
    }
    if record.easiness_factor < MIN_EASINESS_FACTOR {
        return Err(MalformedRecord::EasinessBelowFloor(record.easiness_factor));
    }
    if record.due_at < 0 {
        return Err(MalformedRecord::NegativeDueAt(record.due_at));
    }
    Ok(())
}

/// Return the record itself if valid, otherwise the zero state of its item.
pub fn sanitize_record(record: &ProgressRecord) -> ProgressRecord {
    match check_record(record) {
        Ok(()) => record.clone(),
        Err(reason) => {
            tracing::warn!(item_id = %record.item_id, %reason, "resetting malformed progress record");
            ProgressRecord::new(record.item_id.clone())
        }
    }
}

/// Repair a whole map in place, returning the ids that were reset (sorted).
pub fn sanitize_map(progress: &mut ProgressMap) -> Vec<String> {
    let mut reset = Vec::new();
    for (id, record) in progress.iter_mut() {
        if let Err(reason) = check_record(record) {
            tracing::warn!(item_id = %id, %reason, "resetting malformed progress record");
            *record = ProgressRecord::new(id.clone());
            reset.push(id.clone());
        }
    }
    reset.sort();
    reset
}

/// Mastery count as selection sees it: 0 for a malformed record.
pub fn effective_mastery(record: &ProgressRecord) -> i64 {
    if check_record(record).is_ok() {
        record.mastery_count
    } else {
        0
    }
}

/// Due timestamp as selection sees it: a malformed record is due immediately.
pub fn effective_due(record: &ProgressRecord) -> i64 {
    if check_record(record).is_ok() {
        record.due_at
    } else {
        0
    }
}
