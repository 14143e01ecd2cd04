use anyhow::{anyhow, Context, Result};
use chrono::{SecondsFormat, Utc};
use filekind_core::services::scan::{scan_dir, summarize, ScanSummary, ScannedFile};
use filekind_core::services::upload::UploadClassifier;
use filekind_core::ClassifierConfig;
use serde::Serialize;
use tracing::info;

use crate::canonicalize_or_current;

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub root: String,
    pub scanned_at: String,
    pub files: Vec<ScannedFile>,
    pub summary: ScanSummary,
}

/// Classify every file under `root` and build a report.
pub fn build_scan_report(root: &str, config: &ClassifierConfig) -> Result<ScanReport> {
    let root_path = canonicalize_or_current(root)?;
    if !root_path.is_dir() {
        return Err(anyhow!("Scan root is not a directory: {}", root_path.display()));
    }

    let classifier = UploadClassifier::new(config.clone());
    let files = scan_dir(&root_path, &classifier)
        .with_context(|| format!("Failed to scan {}", root_path.display()))?;
    let summary = summarize(&files);
    info!(root = %root_path.display(), total = summary.total, "scan complete");

    Ok(ScanReport {
        root: root_path.display().to_string(),
        scanned_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        files,
        summary,
    })
}

/// Scan a directory and print each file's label plus per-label totals.
pub fn scan_command(root: &str, config: &ClassifierConfig, json: bool) -> Result<()> {
    let report = build_scan_report(root, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Scanned {} ({} files):", report.root, report.summary.total);
    if report.files.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for file in &report.files {
        println!("  - {} [{}]", file.relative_path, file.classification.label());
    }
    println!("Totals:");
    for (label, count) in &report.summary.by_label {
        println!("  {label}: {count}");
    }

    Ok(())
}
