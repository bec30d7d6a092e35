//! Session Selection
//!
//! Decides which items make up the next study session.
//!
//! Items with progress are split into active (mastery below the threshold)
//! and mastered. Active items occupy slots of a bounded pool; mastered ones
//! never do but still come back for maintenance reviews when due. New items
//! (no progress yet) are admitted in vocabulary order to fill the free slots,
//! so the pool refills exactly to capacity as items graduate out.
//!
//! The plan defines membership only. Presentation order is the caller's
//! business; [`build_queue`] shuffles it the way the flashcard UI does.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{SchedulerConfig, SelectionPolicy};
use crate::sanitize::{effective_due, effective_mastery};
use crate::types::ProgressMap;

/// Items chosen for one session, in three disjoint groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPlan {
    /// Due non-mastered items, by (due_at, id)
    pub due_active: Vec<String>,
    /// Due mastered items, by (due_at, id)
    pub due_mastered: Vec<String>,
    /// Never-studied items admitted this session, in vocabulary order
    pub new_items: Vec<String>,
}

impl SessionPlan {
    pub fn len(&self) -> usize {
        self.due_active.len() + self.due_mastered.len() + self.new_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.due_active
            .iter()
            .chain(&self.due_mastered)
            .chain(&self.new_items)
            .map(String::as_str)
    }

    /// Flat sequence: due-active, due-mastered, new.
    pub fn into_ids(self) -> Vec<String> {
        let mut ids = self.due_active;
        ids.extend(self.due_mastered);
        ids.extend(self.new_items);
        ids
    }
}

/// Select the next session.
///
/// `all_ids` is the vocabulary in its natural order; duplicate ids are
/// admitted once. Records whose id is not in `all_ids` still count toward the
/// pool and are returned when due.
pub fn select_session<I>(
    all_ids: I,
    progress: &ProgressMap,
    now_ms: i64,
    config: &SchedulerConfig,
) -> SessionPlan
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut due_active: Vec<(i64, &str)> = Vec::new();
    let mut due_mastered: Vec<(i64, &str)> = Vec::new();
    let mut active_count = 0usize;

    for (id, record) in progress {
        let due_at = effective_due(record);
        let is_due = due_at <= now_ms;
        if effective_mastery(record) < config.mastery_threshold {
            active_count += 1;
            if is_due {
                due_active.push((due_at, id.as_str()));
            }
        } else if is_due {
            due_mastered.push((due_at, id.as_str()));
        }
    }

    let slots = match config.policy {
        SelectionPolicy::ActivePool { pool_limit } => pool_limit.saturating_sub(active_count),
        SelectionPolicy::NewQuota { new_per_session } => new_per_session,
    };
    let new_items = admit_new_items(all_ids, progress, slots);

    due_active.sort_unstable();
    due_mastered.sort_unstable();

    let plan = SessionPlan {
        due_active: into_owned_ids(due_active),
        due_mastered: into_owned_ids(due_mastered),
        new_items,
    };

    tracing::debug!(
        active = active_count,
        slots,
        due_active = plan.due_active.len(),
        due_mastered = plan.due_mastered.len(),
        new_items = plan.new_items.len(),
        "session selected"
    );

    plan
}

/// [`select_session`] flattened to an id sequence.
pub fn select_session_ids<I>(
    all_ids: I,
    progress: &ProgressMap,
    now_ms: i64,
    config: &SchedulerConfig,
) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    select_session(all_ids, progress, now_ms, config).into_ids()
}

/// Number of items the next session would present.
pub fn due_count<I>(all_ids: I, progress: &ProgressMap, now_ms: i64, config: &SchedulerConfig) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    select_session(all_ids, progress, now_ms, config).len()
}

/// Presentation queue: keeps only ids present in the vocabulary, shuffled.
pub fn build_queue<I, R>(plan: SessionPlan, known_ids: I, rng: &mut R) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    R: Rng + ?Sized,
{
    let known: HashSet<String> = known_ids
        .into_iter()
        .map(|id| id.as_ref().to_string())
        .collect();

    let mut queue: Vec<String> = plan
        .into_ids()
        .into_iter()
        .filter(|id| known.contains(id))
        .collect();
    queue.shuffle(rng);
    queue
}

/// [`build_queue`] with a reproducible ChaCha8 shuffle.
pub fn build_queue_seeded<I>(plan: SessionPlan, known_ids: I, seed: u64) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    build_queue(plan, known_ids, &mut rng)
}

fn admit_new_items<I>(all_ids: I, progress: &ProgressMap, slots: usize) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    if slots == 0 {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut admitted = Vec::new();
    for id in all_ids {
        let id = id.as_ref();
        if progress.contains_key(id) || !seen.insert(id.to_string()) {
            continue;
        }
        admitted.push(id.to_string());
        if admitted.len() == slots {
            break;
        }
    }
    admitted
}

fn into_owned_ids(entries: Vec<(i64, &str)>) -> Vec<String> {
    entries.into_iter().map(|(_, id)| id.to_string()).collect()
}
