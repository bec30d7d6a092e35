//! JSON progress file
//!
//! The whole map is written on every save (temp file + rename), so a crash
//! never leaves one record stale while others are current. There is no
//! locking: two processes grading at once resolve last-writer-wins.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use wortschatz_srs::sanitize::sanitize_map;
use wortschatz_srs::{ProgressMap, ProgressRecord};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or empty file is an empty map. Records that fail to decode or
    /// break an invariant are reset; only a file that is not a JSON object
    /// is an error.
    pub fn load(&self) -> CliResult<ProgressMap> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no progress file yet");
                return Ok(ProgressMap::new());
            }
            Err(err) => return Err(CliError::io(&self.path, err)),
        };
        if text.trim().is_empty() {
            return Ok(ProgressMap::new());
        }

        let raw: HashMap<String, Value> =
            serde_json::from_str(&text).map_err(|err| CliError::json(&self.path, err))?;

        let mut progress = ProgressMap::with_capacity(raw.len());
        let mut unreadable = Vec::new();
        for (id, value) in raw {
            let record = match decode_record(&id, value) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(item_id = %id, error = %err, "resetting unreadable progress record");
                    unreadable.push(id.clone());
                    ProgressRecord::new(id.clone())
                }
            };
            progress.insert(id, record);
        }

        let reset = sanitize_map(&mut progress);
        let reset_count = reset.len() + unreadable.len();
        if reset_count > 0 {
            unreadable.sort();
            tracing::warn!(
                count = reset_count,
                ids = ?reset,
                unreadable = ?unreadable,
                "malformed progress records reset on load"
            );
        }

        tracing::debug!(path = %self.path.display(), records = progress.len(), "progress loaded");
        Ok(progress)
    }

    pub fn save(&self, progress: &ProgressMap) -> CliResult<()> {
        let ordered: BTreeMap<&String, &ProgressRecord> = progress.iter().collect();
        let json =
            serde_json::to_string_pretty(&ordered).map_err(|err| CliError::json(&self.path, err))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| CliError::io(parent, err))?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|err| CliError::io(&tmp, err))?;
        fs::rename(&tmp, &self.path).map_err(|err| CliError::io(&self.path, err))?;

        tracing::debug!(path = %self.path.display(), records = progress.len(), "progress saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "progress.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// The map key is authoritative for the item id.
fn decode_record(id: &str, mut value: Value) -> serde_json::Result<ProgressRecord> {
    if let Value::Object(fields) = &mut value {
        fields.remove("wordId");
        fields.insert("itemId".to_string(), Value::String(id.to_string()));
    }
    serde_json::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_is_sibling() {
        let store = ProgressStore::new("/data/progress.json");
        assert_eq!(store.temp_path(), PathBuf::from("/data/progress.json.tmp"));
    }

    #[test]
    fn test_decode_record_takes_id_from_key() {
        let value = serde_json::json!({
            "wordId": "other", "interval": 1, "repetition": 0,
            "efactor": 2.5, "nextReviewDate": 0
        });
        let record = decode_record("haus", value).unwrap();
        assert_eq!(record.item_id, "haus");
    }

    #[test]
    fn test_decode_record_rejects_null_easiness() {
        let value = serde_json::json!({
            "itemId": "haus", "interval": 1, "repetition": 0,
            "easinessFactor": null, "dueAt": 0
        });
        assert!(decode_record("haus", value).is_err());
    }
}
