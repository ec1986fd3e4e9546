//! Save/load of the index artifact.
//!
//! The artifact is a directory holding `manifest.json` and `records.json`.
//! Saves are staged into a sibling directory and swapped into place, so a
//! failure mid-save leaves any prior artifact untouched.

use chrono::{DateTime, Utc};
use pdfrag_core::{DistanceMetric, IndexError, VectorRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::FlatIndex;

const MANIFEST_FILE: &str = "manifest.json";
const RECORDS_FILE: &str = "records.json";
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    format_version: u32,
    dimension: usize,
    metric: DistanceMetric,
    embedding_model: String,
    segment_count: u64,
    created_at: DateTime<Utc>,
}

impl FlatIndex {
    /// Serialize the index to `path`, replacing any existing artifact.
    ///
    /// Concurrent writers to the same path are not coordinated; the last
    /// writer wins.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let staging = sibling(path, "staging");
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;

        let manifest = Manifest {
            format_version: FORMAT_VERSION,
            dimension: self.dimension(),
            metric: self.metric(),
            embedding_model: self.embedding_model().to_string(),
            segment_count: self.len() as u64,
            created_at: self.created_at(),
        };

        fs::write(
            staging.join(MANIFEST_FILE),
            serde_json::to_vec_pretty(&manifest)?,
        )?;
        fs::write(staging.join(RECORDS_FILE), serde_json::to_vec(self.records())?)?;

        swap_into_place(&staging, path)?;

        info!("Saved index ({} segments) to {:?}", self.len(), path);
        Ok(())
    }

    /// Load a previously saved index from `path`.
    ///
    /// Fails with [`IndexError::NotFound`] when `path` holds no manifest and
    /// [`IndexError::Corrupt`] when the stored artifact is inconsistent.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let manifest_path = path.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(IndexError::NotFound(path.to_path_buf()));
        }

        let manifest: Manifest = serde_json::from_slice(&fs::read(&manifest_path)?)
            .map_err(|e| IndexError::Corrupt(format!("manifest: {e}")))?;

        if manifest.format_version != FORMAT_VERSION {
            return Err(IndexError::Corrupt(format!(
                "unsupported format version {}",
                manifest.format_version
            )));
        }

        let records_path = path.join(RECORDS_FILE);
        if !records_path.is_file() {
            return Err(IndexError::Corrupt("records file missing".to_string()));
        }
        let records: Vec<VectorRecord> = serde_json::from_slice(&fs::read(&records_path)?)
            .map_err(|e| IndexError::Corrupt(format!("records: {e}")))?;

        if records.is_empty() {
            return Err(IndexError::Corrupt("empty record set".to_string()));
        }
        if records.len() as u64 != manifest.segment_count {
            return Err(IndexError::Corrupt(format!(
                "manifest says {} segments, found {}",
                manifest.segment_count,
                records.len()
            )));
        }
        for (i, record) in records.iter().enumerate() {
            if record.vector.len() != manifest.dimension {
                return Err(IndexError::Corrupt(format!(
                    "record {i} has dimension {}, manifest says {}",
                    record.vector.len(),
                    manifest.dimension
                )));
            }
        }

        debug!("Loaded index ({} segments) from {:?}", records.len(), path);
        Ok(Self::from_parts(
            records,
            manifest.dimension,
            manifest.metric,
            manifest.embedding_model,
            manifest.created_at,
        ))
    }
}

/// Path of a scratch directory next to the artifact.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| "index".to_string(), |n| n.to_string_lossy().to_string());
    name.push('.');
    name.push_str(suffix);
    path.with_file_name(name)
}

/// Move the staged artifact over the destination.
fn swap_into_place(staging: &Path, dest: &Path) -> Result<(), IndexError> {
    if dest.exists() {
        let retired = sibling(dest, "old");
        if retired.exists() {
            fs::remove_dir_all(&retired)?;
        }
        fs::rename(dest, &retired)?;
        match fs::rename(staging, dest) {
            Ok(()) => {
                let _ = fs::remove_dir_all(&retired);
                Ok(())
            }
            Err(e) => {
                // Put the prior artifact back before surfacing the failure
                let _ = fs::rename(&retired, dest);
                Err(e.into())
            }
        }
    } else {
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::rename(staging, dest)?;
        Ok(())
    }
}
