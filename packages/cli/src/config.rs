use std::path::PathBuf;
use std::str::FromStr;

use wortschatz_srs::{
    SchedulerConfig, SelectionPolicy, DEFAULT_MASTERY_THRESHOLD, DEFAULT_NEW_PER_SESSION,
    DEFAULT_POOL_LIMIT,
};

/// Session selection variant as named on the command line / in the env.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyKind {
    /// Bounded active pool
    Pool,
    /// Fixed number of new items per session
    Quota,
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pool" => Ok(PolicyKind::Pool),
            "quota" => Ok(PolicyKind::Quota),
            other => Err(format!("unknown policy: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub progress_path: PathBuf,
    pub vocabulary_path: PathBuf,
    pub policy: PolicyKind,
    pub pool_limit: usize,
    pub new_per_session: usize,
    pub mastery_threshold: i64,
    pub log_level: String,
    /// Set when file logging is enabled
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let progress_path = lookup("WORTSCHATZ_PROGRESS")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./progress.json"));

        let vocabulary_path = lookup("WORTSCHATZ_VOCABULARY")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./vocabulary.txt"));

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let file_logs = lookup("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let log_dir = file_logs.then(|| {
            lookup("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./logs"))
        });

        Self {
            progress_path,
            vocabulary_path,
            policy: parse_or(&lookup, "WORTSCHATZ_POLICY", PolicyKind::Pool),
            pool_limit: parse_or(&lookup, "WORTSCHATZ_POOL_LIMIT", DEFAULT_POOL_LIMIT),
            new_per_session: parse_or(&lookup, "WORTSCHATZ_NEW_PER_SESSION", DEFAULT_NEW_PER_SESSION),
            mastery_threshold: parse_or(
                &lookup,
                "WORTSCHATZ_MASTERY_THRESHOLD",
                DEFAULT_MASTERY_THRESHOLD,
            ),
            log_level,
            log_dir,
        }
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        let policy = match self.policy {
            PolicyKind::Pool => SelectionPolicy::ActivePool {
                pool_limit: self.pool_limit,
            },
            PolicyKind::Quota => SelectionPolicy::NewQuota {
                new_per_session: self.new_per_session,
            },
        };
        SchedulerConfig {
            mastery_threshold: self.mastery_threshold,
            policy,
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}
