//! Progress statistics for the home screen

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::sanitize::effective_mastery;
use crate::types::ProgressMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    /// Items graded at least once
    pub total_seen: usize,
    pub mastered: usize,
    /// Items occupying a pool slot
    pub active: usize,
    /// `None` under the fixed-quota policy
    pub pool_limit: Option<usize>,
}

impl ProgressStats {
    /// Share of the pool in use; may exceed 1.0 if the limit was lowered.
    pub fn pool_usage(&self) -> Option<f64> {
        self.pool_limit
            .filter(|limit| *limit > 0)
            .map(|limit| self.active as f64 / limit as f64)
    }
}

pub fn stats(progress: &ProgressMap, config: &SchedulerConfig) -> ProgressStats {
    let total_seen = progress.len();
    let mastered = progress
        .values()
        .filter(|record| effective_mastery(record) >= config.mastery_threshold)
        .count();

    ProgressStats {
        total_seen,
        mastered,
        active: total_seen - mastered,
        pool_limit: config.policy.pool_limit(),
    }
}

/// Mastered items in vocabulary order.
pub fn mastered_ids<I>(all_ids: I, progress: &ProgressMap, mastery_threshold: i64) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    all_ids
        .into_iter()
        .filter_map(|id| {
            let id = id.as_ref();
            let record = progress.get(id)?;
            (effective_mastery(record) >= mastery_threshold && seen.insert(id.to_string()))
                .then(|| id.to_string())
        })
        .collect()
}
