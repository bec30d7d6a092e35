//! Scheduler configuration

use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};
use crate::types::{DEFAULT_MASTERY_THRESHOLD, DEFAULT_NEW_PER_SESSION, DEFAULT_POOL_LIMIT};

/// How new items are admitted into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionPolicy {
    /// Non-mastered items are capped at `pool_limit`; new items only fill
    /// the free slots. A limit of 0 admits nothing new and serves due items only.
    #[serde(rename_all = "camelCase")]
    ActivePool { pool_limit: usize },
    /// No pool ceiling; at most `new_per_session` new items per session.
    #[serde(rename_all = "camelCase")]
    NewQuota { new_per_session: usize },
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::ActivePool {
            pool_limit: DEFAULT_POOL_LIMIT,
        }
    }
}

impl SelectionPolicy {
    pub fn pool_limit(&self) -> Option<usize> {
        match self {
            SelectionPolicy::ActivePool { pool_limit } => Some(*pool_limit),
            SelectionPolicy::NewQuota { .. } => None,
        }
    }

    pub fn new_quota() -> Self {
        SelectionPolicy::NewQuota {
            new_per_session: DEFAULT_NEW_PER_SESSION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Easy recalls after which an item stops occupying a pool slot
    pub mastery_threshold: i64,
    pub policy: SelectionPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            mastery_threshold: DEFAULT_MASTERY_THRESHOLD,
            policy: SelectionPolicy::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn with_pool_limit(pool_limit: usize) -> Self {
        Self {
            policy: SelectionPolicy::ActivePool { pool_limit },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SchedulerResult<()> {
        if self.mastery_threshold <= 0 {
            return Err(SchedulerError::InvalidConfig(format!(
                "mastery threshold must be positive, got {}",
                self.mastery_threshold
            )));
        }
        match self.policy {
            SelectionPolicy::NewQuota { new_per_session: 0 } => Err(
                SchedulerError::InvalidConfig("new items per session must be at least 1".to_string()),
            ),
            _ => Ok(()),
        }
    }
}
