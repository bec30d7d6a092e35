//! Vocabulary id lists
//!
//! Accepted formats:
//! - JSON array of ids: `["haus", "baum"]`
//! - JSON array of word objects with an `id` field (other fields ignored)
//! - plain text, one id per line; blank lines and `#` comments skipped

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CliError, CliResult};

#[derive(Deserialize)]
#[serde(untagged)]
enum VocabularyEntry {
    Id(String),
    Word { id: String },
}

impl VocabularyEntry {
    fn into_id(self) -> String {
        match self {
            VocabularyEntry::Id(id) | VocabularyEntry::Word { id } => id,
        }
    }
}

pub fn load_vocabulary(path: &Path) -> CliResult<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|err| CliError::io(path, err))?;
    let ids = parse_vocabulary(&text).map_err(|err| CliError::json(path, err))?;
    tracing::debug!(path = %path.display(), items = ids.len(), "vocabulary loaded");
    Ok(ids)
}

/// Ids in file order.
pub fn parse_vocabulary(text: &str) -> serde_json::Result<Vec<String>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        let entries: Vec<VocabularyEntry> = serde_json::from_str(trimmed)?;
        return Ok(entries.into_iter().map(VocabularyEntry::into_id).collect());
    }

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
