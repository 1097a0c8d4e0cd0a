//! Snapshot storage
//!
//! The two snapshot files ("current" and "previous") are flat JSON arrays of
//! ad records. Loading is deliberately tolerant: a missing file or content
//! that fails to deserialize yields an empty set, never an error, so a fresh
//! or corrupted state file just means every ad looks new on the next cycle.
//! Saving overwrites the whole file and propagates I/O errors.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::ad::AdSet;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to serialize ads: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Load a snapshot, defaulting to an empty set on any problem.
pub fn load(path: &Path) -> AdSet {
    info!("loading ads from {}", path.display());
    match fs::read_to_string(path) {
        Ok(raw) if raw.trim().is_empty() => AdSet::new(),
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(ads) => ads,
            Err(e) => {
                error!("undecodable snapshot {}: {e}", path.display());
                AdSet::new()
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("snapshot {} not found, starting empty", path.display());
            AdSet::new()
        }
        Err(e) => {
            error!("failed to read snapshot {}: {e}", path.display());
            AdSet::new()
        }
    }
}

/// Persist a snapshot as pretty-printed JSON, overwriting the file.
/// serde_json emits non-ASCII characters verbatim.
pub fn save(path: &Path, ads: &AdSet) -> Result<(), StoreError> {
    info!("saving {} ads to {}", ads.len(), path.display());
    let json = serde_json::to_string_pretty(ads)?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ad::AdRecord;

    fn sample() -> AdSet {
        vec![
            AdRecord {
                title: Some("Stan Trešnjevka, 54 m²".to_string()),
                size: Some("54 m2".to_string()),
                location: Some("Zagreb, Trešnjevka".to_string()),
                price: Some("650€/mj".to_string()),
                link: Some("https://www.njuskalo.hr/nekretnine/123".to_string()),
                ..Default::default()
            },
            AdRecord::default(),
        ]
    }

    #[test]
    fn save_then_load_round_trips_including_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ads.json");

        let ads = sample();
        save(&path, &ads).unwrap();
        assert_eq!(load(&path), ads);

        // Non-ASCII must be stored verbatim, not \u-escaped.
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Trešnjevka"));
        assert!(raw.contains("m²"));
    }

    #[test]
    fn round_trips_the_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ads.json");

        save(&path, &AdSet::new()).unwrap();
        assert!(load(&path).is_empty());
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("nope.json")).is_empty());
    }

    #[test]
    fn corrupt_content_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ads.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load(&path).is_empty());
    }

    #[test]
    fn blank_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ads.json");
        fs::write(&path, "  \n").unwrap();
        assert!(load(&path).is_empty());
    }

    #[test]
    fn save_overwrites_rather_than_merges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ads.json");

        save(&path, &sample()).unwrap();
        let replacement = vec![AdRecord {
            title: Some("B".to_string()),
            ..Default::default()
        }];
        save(&path, &replacement).unwrap();

        assert_eq!(load(&path), replacement);
    }

    #[test]
    fn save_to_unwritable_path_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("ads.json");
        assert!(matches!(
            save(&path, &AdSet::new()),
            Err(StoreError::Io { .. })
        ));
    }
}
