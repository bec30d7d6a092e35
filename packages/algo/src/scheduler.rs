//! Scheduler facade
//!
//! Binds a [`SchedulerConfig`] to a [`Clock`] so callers do not pass "now"
//! around. Holds no progress state: every call takes the caller's map.

use crate::clock::{Clock, SystemClock};
use crate::config::SchedulerConfig;
use crate::error::SchedulerResult;
use crate::grading;
use crate::session::{self, SessionPlan};
use crate::stats::{self, ProgressStats};
use crate::types::{Grade, ProgressMap, ProgressRecord};

#[derive(Debug, Clone)]
pub struct Scheduler<C = SystemClock> {
    config: SchedulerConfig,
    clock: C,
}

impl Scheduler<SystemClock> {
    pub fn with_defaults() -> Self {
        Self {
            config: SchedulerConfig::default(),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Scheduler<C> {
    pub fn new(config: SchedulerConfig, clock: C) -> SchedulerResult<Self> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn advance(&self, prev: Option<&ProgressRecord>, grade: Grade, item_id: &str) -> ProgressRecord {
        grading::advance(prev, grade, item_id, self.clock.now_ms())
    }

    pub fn advance_quality(
        &self,
        prev: Option<&ProgressRecord>,
        quality: i64,
        item_id: &str,
    ) -> SchedulerResult<ProgressRecord> {
        grading::advance_quality(prev, quality, item_id, self.clock.now_ms())
    }

    /// Grade `item_id` and merge the new record into the caller's map.
    pub fn grade_into(&self, progress: &mut ProgressMap, item_id: &str, grade: Grade) -> ProgressRecord {
        let next = self.advance(progress.get(item_id), grade, item_id);
        progress.insert(item_id.to_string(), next.clone());
        next
    }

    pub fn preview(&self, prev: Option<&ProgressRecord>, item_id: &str) -> [ProgressRecord; 4] {
        grading::preview(prev, item_id, self.clock.now_ms())
    }

    pub fn select_session<I>(&self, all_ids: I, progress: &ProgressMap) -> SessionPlan
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        session::select_session(all_ids, progress, self.clock.now_ms(), &self.config)
    }

    pub fn due_count<I>(&self, all_ids: I, progress: &ProgressMap) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        session::due_count(all_ids, progress, self.clock.now_ms(), &self.config)
    }

    pub fn stats(&self, progress: &ProgressMap) -> ProgressStats {
        stats::stats(progress, &self.config)
    }

    pub fn mastered_ids<I>(&self, all_ids: I, progress: &ProgressMap) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        stats::mastered_ids(all_ids, progress, self.config.mastery_threshold)
    }
}
