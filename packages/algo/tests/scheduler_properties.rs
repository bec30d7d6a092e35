//! Property-Based Tests for the review scheduler
//!
//! Tests the following invariants:
//! - Easy ladder: interval non-decreasing, mastery +1 per easy recall
//! - Lapse: repetition 0, interval 1, due in one minute, mastery floored at 0
//! - Easiness factor never below 1.3
//! - Due date never before the grading instant
//! - Pool capacity: active items after admission never exceed the limit
//! - Mastered items are always selected when due

use proptest::prelude::*;

use wortschatz_srs::{
    advance, select_session, Grade, ProgressMap, ProgressRecord, ProgressStatus,
    SchedulerConfig, MIN_EASINESS_FACTOR, MS_PER_DAY,
};

const NOW: i64 = 1_700_000_000_000;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_grade() -> impl Strategy<Value = Grade> {
    prop_oneof![
        Just(Grade::Forgot),
        Just(Grade::Hard),
        Just(Grade::Good),
        Just(Grade::Easy),
    ]
}

fn arb_record() -> impl Strategy<Value = ProgressRecord> {
    (
        1i64..=400,                  // interval
        0i64..=30,                   // repetition
        (130u32..=400u32),           // easiness * 100
        0i64..=30,                   // mastery_count
        (NOW - 30 * MS_PER_DAY)..=(NOW + 30 * MS_PER_DAY), // due_at
    )
        .prop_map(|(interval, repetition, ef, mastery_count, due_at)| ProgressRecord {
            item_id: "w".to_string(),
            interval,
            repetition,
            easiness_factor: ef as f64 / 100.0,
            due_at,
            mastery_count,
            status: ProgressStatus::Learning,
        })
}

fn arb_progress() -> impl Strategy<Value = ProgressMap> {
    prop::collection::vec(arb_record(), 0..120).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let id = format!("w{i}");
                (
                    id.clone(),
                    ProgressRecord {
                        item_id: id,
                        ..record
                    },
                )
            })
            .collect()
    })
}

fn vocabulary(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("w{i}")).collect()
}

// ============================================================================
// Grading
// ============================================================================

proptest! {
    #[test]
    fn prop_easy_sequence_grows(prev in proptest::option::of(arb_record()), steps in 1usize..15) {
        let mut current = prev;
        let mut last_interval: Option<i64> = None;
        for _ in 0..steps {
            let before = current.as_ref().map(|r| r.mastery_count).unwrap_or(0);
            let next = advance(current.as_ref(), Grade::Easy, "w", NOW);
            prop_assert_eq!(next.mastery_count, before + 1);
            prop_assert!(next.interval >= 1);
            if let Some(last) = last_interval {
                // after the first easy recall the ladder only climbs
                if current.as_ref().map(|r| r.repetition >= 1).unwrap_or(false) {
                    prop_assert!(next.interval >= last);
                }
            }
            last_interval = Some(next.interval);
            current = Some(next);
        }
    }

    #[test]
    fn prop_forgot_resets(prev in proptest::option::of(arb_record())) {
        let next = advance(prev.as_ref(), Grade::Forgot, "w", NOW);
        let before = prev.as_ref().map(|r| r.mastery_count).unwrap_or(0);
        prop_assert_eq!(next.repetition, 0);
        prop_assert_eq!(next.interval, 1);
        prop_assert_eq!(next.due_at - NOW, 60_000);
        prop_assert_eq!(next.mastery_count, (before - 1).max(0));
        prop_assert_eq!(next.status, ProgressStatus::Learning);
    }

    #[test]
    fn prop_easiness_floor(prev in proptest::option::of(arb_record()), grades in prop::collection::vec(arb_grade(), 1..40)) {
        let mut current = prev;
        for grade in grades {
            let next = advance(current.as_ref(), grade, "w", NOW);
            prop_assert!(next.easiness_factor >= MIN_EASINESS_FACTOR);
            prop_assert!(next.mastery_count >= 0);
            prop_assert!(next.interval >= 1);
            prop_assert!(next.due_at >= NOW);
            current = Some(next);
        }
    }

    #[test]
    fn prop_not_easy_keeps_easiness(prev in arb_record(), grade in prop_oneof![Just(Grade::Hard), Just(Grade::Good)]) {
        let next = advance(Some(&prev), grade, "w", NOW);
        prop_assert_eq!(next.easiness_factor, prev.easiness_factor);
        prop_assert_eq!(next.mastery_count, prev.mastery_count);
    }
}

// ============================================================================
// Session selection
// ============================================================================

proptest! {
    #[test]
    fn prop_pool_capacity(progress in arb_progress(), limit in 1usize..80, extra in 0usize..100) {
        let config = SchedulerConfig::with_pool_limit(limit);
        let all = vocabulary(progress.len() + extra);
        let plan = select_session(&all, &progress, NOW, &config);

        let active_before = progress
            .values()
            .filter(|r| r.mastery_count < config.mastery_threshold)
            .count();
        prop_assert!(plan.new_items.len() <= limit.saturating_sub(active_before));
        if active_before <= limit {
            prop_assert!(active_before + plan.new_items.len() <= limit);
        }
    }

    #[test]
    fn prop_groups_are_disjoint_and_correct(progress in arb_progress(), extra in 0usize..100) {
        let config = SchedulerConfig::default();
        let all = vocabulary(progress.len() + extra);
        let plan = select_session(&all, &progress, NOW, &config);

        for id in &plan.due_active {
            let record = &progress[id];
            prop_assert!(record.due_at <= NOW);
            prop_assert!(record.mastery_count < config.mastery_threshold);
        }
        for id in &plan.due_mastered {
            let record = &progress[id];
            prop_assert!(record.due_at <= NOW);
            prop_assert!(record.mastery_count >= config.mastery_threshold);
        }
        for id in &plan.new_items {
            prop_assert!(!progress.contains_key(id));
        }

        let mut ids: Vec<&str> = plan.iter().collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    #[test]
    fn prop_due_mastered_always_selected(progress in arb_progress(), limit in 1usize..10) {
        let config = SchedulerConfig::with_pool_limit(limit);
        let all = vocabulary(progress.len() + 20);
        let plan = select_session(&all, &progress, NOW, &config);

        let expected = progress
            .values()
            .filter(|r| r.mastery_count >= config.mastery_threshold && r.due_at <= NOW)
            .count();
        prop_assert_eq!(plan.due_mastered.len(), expected);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_sixty_new_items_pool_of_fifty() {
    let all = vocabulary(60);
    let plan = select_session(&all, &ProgressMap::new(), NOW, &SchedulerConfig::default());
    assert_eq!(plan.into_ids(), all[..50].to_vec());
}

#[test]
fn scenario_unseen_item_graded_hard() {
    let next = advance(None, Grade::Hard, "w1", NOW);
    assert_eq!(next.interval, 1);
    assert_eq!(next.repetition, 0);
    assert_eq!(next.easiness_factor, 2.5);
    assert_eq!(next.mastery_count, 0);
    assert_eq!(next.due_at, NOW + 300_000);
}

#[test]
fn scenario_ninth_mastery_leaves_active_partition() {
    let prev = ProgressRecord {
        mastery_count: 9,
        repetition: 3,
        interval: 16,
        easiness_factor: 2.8,
        ..ProgressRecord::new("w1")
    };
    let next = advance(Some(&prev), Grade::Easy, "w1", NOW);
    assert_eq!(next.mastery_count, 10);

    let mut progress = ProgressMap::new();
    progress.insert("w1".to_string(), next);
    // pool of one: the only slot is free again, w2 gets admitted
    let plan = select_session(
        ["w1", "w2"],
        &progress,
        NOW,
        &SchedulerConfig::with_pool_limit(1),
    );
    assert!(plan.due_active.is_empty());
    assert_eq!(plan.new_items, vec!["w2"]);
}

#[test]
fn scenario_easy_after_six_day_interval() {
    let prev = ProgressRecord {
        repetition: 2,
        interval: 6,
        easiness_factor: 2.5,
        ..ProgressRecord::new("w1")
    };
    let next = advance(Some(&prev), Grade::Easy, "w1", NOW);
    assert_eq!(next.interval, 15);
    assert_eq!(next.repetition, 3);
    assert_eq!(next.due_at, NOW + 15 * 86_400_000);
}
