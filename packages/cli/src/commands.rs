//! Command implementations
//!
//! Each command loads the progress file and vocabulary fresh, calls the
//! scheduler, and (for `grade`) writes the full map back.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use wortschatz_srs::session::{build_queue_seeded, SessionPlan};
use wortschatz_srs::{Clock, Grade, ProgressRecord, ProgressStats, Scheduler, MS_PER_DAY, MS_PER_MINUTE};

use crate::config::Config;
use crate::error::CliResult;
use crate::store::ProgressStore;
use crate::vocabulary::load_vocabulary;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: ProgressStats,
    pub due_now: usize,
}

pub struct App<C: Clock> {
    scheduler: Scheduler<C>,
    store: ProgressStore,
    vocabulary_path: PathBuf,
}

impl<C: Clock> App<C> {
    pub fn new(config: &Config, clock: C) -> CliResult<Self> {
        Ok(Self {
            scheduler: Scheduler::new(config.scheduler_config(), clock)?,
            store: ProgressStore::new(&config.progress_path),
            vocabulary_path: config.vocabulary_path.clone(),
        })
    }

    pub fn scheduler(&self) -> &Scheduler<C> {
        &self.scheduler
    }

    /// Next session queue. `shuffle` without a seed seeds from the clock.
    pub fn session(&self, shuffle: bool, seed: Option<u64>) -> CliResult<Vec<String>> {
        let vocabulary = load_vocabulary(&self.vocabulary_path)?;
        let progress = self.store.load()?;
        let plan = self.scheduler.select_session(&vocabulary, &progress);

        tracing::info!(
            due_active = plan.due_active.len(),
            due_mastered = plan.due_mastered.len(),
            new_items = plan.new_items.len(),
            "session planned"
        );

        if shuffle {
            let seed = seed.unwrap_or_else(|| self.scheduler.clock().now_ms() as u64);
            Ok(build_queue_seeded(plan, &vocabulary, seed))
        } else {
            Ok(known_only(plan, &vocabulary))
        }
    }

    pub fn grade(&self, item_id: &str, grade: Grade) -> CliResult<ProgressRecord> {
        let vocabulary = load_vocabulary(&self.vocabulary_path)?;
        if !vocabulary.iter().any(|id| id == item_id) {
            tracing::warn!(item_id, "grading an item that is not in the vocabulary");
        }

        let mut progress = self.store.load()?;
        let record = self.scheduler.grade_into(&mut progress, item_id, grade);
        self.store.save(&progress)?;

        tracing::info!(item_id, grade = grade.label(), due_at = record.due_at, "item graded");
        Ok(record)
    }

    pub fn preview(&self, item_id: &str) -> CliResult<[ProgressRecord; 4]> {
        let progress = self.store.load()?;
        Ok(self.scheduler.preview(progress.get(item_id), item_id))
    }

    pub fn stats(&self) -> CliResult<StatsReport> {
        let vocabulary = load_vocabulary(&self.vocabulary_path)?;
        let progress = self.store.load()?;
        Ok(StatsReport {
            stats: self.scheduler.stats(&progress),
            due_now: self.scheduler.due_count(&vocabulary, &progress),
        })
    }

    pub fn mastered(&self) -> CliResult<Vec<String>> {
        let vocabulary = load_vocabulary(&self.vocabulary_path)?;
        let progress = self.store.load()?;
        Ok(self.scheduler.mastered_ids(&vocabulary, &progress))
    }
}

fn known_only(plan: SessionPlan, vocabulary: &[String]) -> Vec<String> {
    let known: HashSet<&str> = vocabulary.iter().map(String::as_str).collect();
    plan.into_ids()
        .into_iter()
        .filter(|id| known.contains(id.as_str()))
        .collect()
}

// ==================== Rendering ====================

pub fn render_preview(outcomes: &[ProgressRecord; 4], now_ms: i64) -> String {
    let mut out = String::new();
    for (grade, record) in Grade::ALL.iter().zip(outcomes) {
        let _ = writeln!(
            out,
            "{:<7} {:>2}  in {:<6} {}  (mastery {})",
            grade.label(),
            grade.value(),
            format_delay(record.due_at.saturating_sub(now_ms)),
            format_timestamp(record.due_at),
            record.mastery_count,
        );
    }
    out
}

pub fn render_stats(report: &StatsReport) -> String {
    let stats = &report.stats;
    let mut out = String::new();
    let _ = writeln!(out, "seen:     {}", stats.total_seen);
    let _ = writeln!(out, "mastered: {}", stats.mastered);
    match stats.pool_limit {
        Some(limit) => {
            let _ = writeln!(out, "active:   {} / {}", stats.active, limit);
        }
        None => {
            let _ = writeln!(out, "active:   {}", stats.active);
        }
    }
    let _ = writeln!(out, "due now:  {}", report.due_now);
    out
}

/// "1m", "20m", "6d"
pub fn format_delay(ms: i64) -> String {
    if ms >= MS_PER_DAY {
        format!("{}d", ms / MS_PER_DAY)
    } else {
        format!("{}m", ms / MS_PER_MINUTE)
    }
}

fn format_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}
