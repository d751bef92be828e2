//! Run reports for upload operations.
//!
//! A report records which export was uploaded (by path and SHA-256), what
//! the parser found in it, and the identifiers the backend generated.

use crate::error::{LoaderError, Result};
use crate::ingest::Export;
use crate::upload::{UploadSummary, UploadedBusiness};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Identity of the export file a run consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path as given on the command line or environment.
    pub path: PathBuf,
    /// SHA-256 hash of the file content.
    pub sha256: String,
    /// Byte count of the file.
    pub bytes: u64,
}

impl SourceFile {
    /// Hash the file at `path`.
    pub fn digest(path: &Path) -> Result<Self> {
        let content = fs::read(path).map_err(|e| LoaderError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            sha256: compute_hash(&content),
            bytes: content.len() as u64,
        })
    }
}

/// Record of one upload run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier for this run.
    pub operation_id: String,
    /// When the run started (RFC 3339).
    pub started_at: String,
    /// When the upload finished (RFC 3339).
    pub finished_at: Option<String>,
    /// The export that was parsed.
    pub source: SourceFile,
    /// Businesses found in the export.
    pub businesses_parsed: usize,
    /// Review lines found in the export, orphans included.
    pub reviews_parsed: usize,
    /// Reviews that preceded any business and were not uploaded.
    pub orphaned_reviews: usize,
    /// Businesses and reviews as created on the backend.
    pub uploaded: Vec<UploadedBusiness>,
}

impl RunReport {
    /// Start a report for `source`. A v4 UUID is used when no id is given.
    pub fn new(operation_id: Option<String>, source: SourceFile) -> Self {
        RunReport {
            operation_id: operation_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            started_at: now(),
            finished_at: None,
            source,
            businesses_parsed: 0,
            reviews_parsed: 0,
            orphaned_reviews: 0,
            uploaded: Vec::new(),
        }
    }

    /// Record parser counts.
    pub fn record_export(&mut self, export: &Export) {
        self.businesses_parsed = export.businesses.len();
        self.reviews_parsed = export.reviews_parsed;
        self.orphaned_reviews = export.orphaned_reviews;
    }

    /// Record a completed upload and stamp the finish time.
    pub fn record_upload(&mut self, summary: &UploadSummary) {
        self.uploaded = summary.businesses.clone();
        self.finished_at = Some(now());
    }

    /// Write the report as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LoaderError::Other(format!("Failed to serialize report: {}", e)))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LoaderError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, json).map_err(|e| LoaderError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load a report from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| LoaderError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&json)
            .map_err(|e| LoaderError::Other(format!("Failed to parse report: {}", e)))
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Compute SHA-256 hash of bytes.
fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Business;
    use tempfile::TempDir;

    #[test]
    fn test_digest_known_content() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("export.txt");
        fs::write(&path, b"hello world").expect("Failed to write export");

        let source = SourceFile::digest(&path).expect("Failed to hash");
        assert_eq!(source.bytes, 11);
        assert_eq!(
            source.sha256,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_digest_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = SourceFile::digest(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }

    #[test]
    fn test_report_save_and_load() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let source = SourceFile {
            path: PathBuf::from("export.txt"),
            sha256: "abc123".to_string(),
            bytes: 42,
        };

        let mut report = RunReport::new(Some("run-1".to_string()), source);
        let export = Export {
            businesses: vec![Business::new("Joe's Cafe", 4.5, 120)],
            reviews_parsed: 3,
            orphaned_reviews: 1,
        };
        report.record_export(&export);
        report.record_upload(&UploadSummary {
            businesses: vec![UploadedBusiness {
                id: "b-1".to_string(),
                name: "Joe's Cafe".to_string(),
                review_ids: vec!["r-1".to_string(), "r-2".to_string()],
            }],
            reviews: 2,
            links: 2,
        });

        let path = dir.path().join("reports/run-1.json");
        report.save(&path).expect("Failed to save report");

        let loaded = RunReport::load(&path).expect("Failed to load report");
        assert_eq!(loaded.operation_id, "run-1");
        assert_eq!(loaded.businesses_parsed, 1);
        assert_eq!(loaded.reviews_parsed, 3);
        assert_eq!(loaded.orphaned_reviews, 1);
        assert_eq!(loaded.uploaded[0].review_ids, vec!["r-1", "r-2"]);
        assert!(loaded.finished_at.is_some());
    }

    #[test]
    fn test_generated_operation_id_is_uuid() {
        let source = SourceFile {
            path: PathBuf::from("x"),
            sha256: String::new(),
            bytes: 0,
        };
        let report = RunReport::new(None, source);
        assert!(uuid::Uuid::parse_str(&report.operation_id).is_ok());
    }
}
