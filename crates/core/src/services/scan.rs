//! Batch classification of every file under a directory.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::model::{Category, Classification};
use crate::services::upload::{UploadClassifier, UploadError, UploadResult};

/// One file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative_path: String,
    pub size_bytes: u64,
    pub media_type: String,
    pub classification: Classification,
}

/// Counts per final label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total: usize,
    pub by_label: BTreeMap<String, usize>,
}

/// Recursively classify every regular file under `root`.
///
/// Entries are visited depth-first with siblings in file-name order. Symlinks
/// are not followed. JSON files over the size limit do not abort the scan;
/// they are recorded as JSON with no shape.
pub fn scan_dir(root: &Path, classifier: &UploadClassifier) -> UploadResult<Vec<ScannedFile>> {
    let skip_hidden = classifier.config.skip_hidden;
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        // The root itself is never filtered, even when its own name is hidden.
        .filter_entry(|e| e.depth() == 0 || !(skip_hidden && is_hidden(e)));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            UploadError::Io { path, source: io::Error::from(err) }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        files.push(scan_file(root, entry.path(), classifier)?);
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn scan_file(
    root: &Path,
    path: &Path,
    classifier: &UploadClassifier,
) -> UploadResult<ScannedFile> {
    let relative_path = path.strip_prefix(root).unwrap_or(path).to_string_lossy().to_string();

    match classifier.classify_path(path, None) {
        Ok(upload) => Ok(ScannedFile {
            path: upload.path,
            relative_path,
            size_bytes: upload.size_bytes,
            media_type: upload.descriptor.media_type,
            classification: upload.classification,
        }),
        Err(UploadError::ContentTooLarge { size, limit, .. }) => {
            warn!(
                path = %path.display(),
                size,
                limit,
                "skipping shape inference for oversized JSON"
            );
            let descriptor = classifier.descriptor_for(path, None);
            Ok(ScannedFile {
                path: path.to_path_buf(),
                relative_path,
                size_bytes: size,
                media_type: descriptor.media_type,
                classification: Classification::new(Category::Json),
            })
        }
        Err(err) => Err(err),
    }
}

/// Tally scanned files by their final label.
pub fn summarize(files: &[ScannedFile]) -> ScanSummary {
    let mut summary = ScanSummary { total: files.len(), ..ScanSummary::default() };
    for file in files {
        *summary.by_label.entry(file.classification.label().to_string()).or_insert(0) += 1;
    }
    summary
}
