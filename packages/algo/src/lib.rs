//! # wortschatz-srs - vocabulary review scheduler
//!
//! Pure spaced-repetition core of the Wortschatz flashcard trainer:
//!
//! - **Grading** - SM-2 variant: day-based ladder on an easy recall, a short
//!   minute-based learning loop otherwise
//! - **Session Selection** - due items plus new items, bounded by an active
//!   learning pool; mastered items free their slot but keep being reviewed
//!
//! ## Design
//!
//! - **No hidden state** - the progress map belongs to the caller and is
//!   passed into every call; results are returned, never stored
//! - **Injected time** - each call reads "now" once, from an explicit
//!   timestamp or a [`Clock`]
//! - **Defensive input** - corrupted records are reset, not propagated
//!
//! ## Modules
//!
//! - [`types`] - progress record, grades, constants
//! - [`grading`] - `advance` / `preview`
//! - [`session`] - `select_session`, queue shuffling
//! - [`sanitize`] - invariant checks and record reset
//! - [`stats`] - pool statistics
//! - [`config`] - selection policy and thresholds
//! - [`clock`] - time source
//! - [`scheduler`] - config + clock facade
//!
//! ## Example
//!
//! ```rust
//! use wortschatz_srs::{FixedClock, Grade, ProgressMap, Scheduler, SchedulerConfig};
//!
//! let scheduler = Scheduler::new(SchedulerConfig::default(), FixedClock(0)).unwrap();
//! let vocabulary = ["haus", "baum", "katze"];
//! let mut progress = ProgressMap::new();
//!
//! let plan = scheduler.select_session(vocabulary, &progress);
//! assert_eq!(plan.new_items, vec!["haus", "baum", "katze"]);
//!
//! let record = scheduler.grade_into(&mut progress, "haus", Grade::Hard);
//! assert_eq!(record.due_at, 5 * 60 * 1000);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod clock;
pub mod config;
pub mod error;
pub mod grading;
pub mod sanitize;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

pub use types::*;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{SchedulerConfig, SelectionPolicy};
pub use error::{SchedulerError, SchedulerResult};
pub use grading::{advance, advance_quality, preview};
pub use sanitize::MalformedRecord;
pub use scheduler::Scheduler;
pub use session::{
    build_queue, build_queue_seeded, due_count, select_session, select_session_ids, SessionPlan,
};
pub use stats::{mastered_ids, stats, ProgressStats};
