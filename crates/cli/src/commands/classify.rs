use std::path::Path;

use anyhow::{anyhow, Context, Result};
use filekind_core::services::upload::{read_json_text, UploadClassifier};
use filekind_core::{classify_category, classify_json_shape, Category, ClassifierConfig, JsonShape};
use serde::{Deserialize, Serialize};

use crate::{canonicalize_or_current, sha256_file};

/// Everything known about one classified file, as printed by `classify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub name: String,
    pub path: String,
    pub size_bytes: u64,
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_shape: Option<JsonShape>,
    pub label: String,
}

/// Classify a bare name/media-type pair.
pub fn category_command(name: &str, media_type: Option<&str>, json: bool) -> Result<()> {
    let category = classify_category(name, media_type.unwrap_or_default());

    if json {
        let body = serde_json::json!({ "name": name, "category": category });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", category);
    }

    Ok(())
}

/// Infer the data shape of JSON text given inline or read from a file.
///
/// Either source is refused when it is larger than `config.max_json_bytes`.
pub fn json_shape_command(
    path: Option<&str>,
    text: Option<&str>,
    config: &ClassifierConfig,
    json: bool,
) -> Result<()> {
    let limit = config.max_json_bytes;
    let content = match (path, text) {
        (Some(p), None) => read_json_text(Path::new(p), limit)
            .with_context(|| format!("Failed to read JSON from {}", p))?,
        (None, Some(t)) => {
            if t.len() as u64 > limit {
                return Err(anyhow!(
                    "Inline JSON is {} bytes, over the {} byte limit",
                    t.len(),
                    limit
                ));
            }
            t.to_string()
        }
        _ => return Err(anyhow!("Specify exactly one of --path or --text")),
    };

    let shape = classify_json_shape(&content);

    if json {
        let body = serde_json::json!({ "json_shape": shape });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", shape);
    }

    Ok(())
}

/// Build a [`FileReport`] for a file on disk.
pub fn build_file_report(
    path: &Path,
    media_type: Option<&str>,
    config: &ClassifierConfig,
    skip_hash: bool,
) -> Result<FileReport> {
    let classifier = UploadClassifier::new(config.clone());
    let upload = classifier
        .classify_path(path, media_type)
        .with_context(|| format!("Failed to classify {}", path.display()))?;

    let sha256 = if skip_hash { None } else { Some(sha256_file(path)?) };

    Ok(FileReport {
        name: upload.descriptor.name,
        path: upload.path.display().to_string(),
        size_bytes: upload.size_bytes,
        media_type: upload.descriptor.media_type,
        sha256,
        category: upload.classification.category,
        json_shape: upload.classification.json_shape,
        label: upload.classification.label().to_string(),
    })
}

/// Classify a file on disk and print its report.
pub fn classify_command(
    path: &str,
    media_type: Option<&str>,
    config: &ClassifierConfig,
    skip_hash: bool,
    json: bool,
) -> Result<()> {
    let abs_path = canonicalize_or_current(path)?;
    if !abs_path.is_file() {
        return Err(anyhow!("File does not exist: {}", abs_path.display()));
    }

    let report = build_file_report(&abs_path, media_type, config, skip_hash)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Classified file:");
    println!("  Name: {}", report.name);
    println!("  Path: {}", report.path);
    println!("  Size: {} bytes", report.size_bytes);
    println!(
        "  Media type: {}",
        if report.media_type.is_empty() { "(none)" } else { report.media_type.as_str() }
    );
    println!("  SHA-256: {}", report.sha256.as_deref().unwrap_or("(skipped)"));
    println!("  Category: {}", report.category);
    if let Some(shape) = report.json_shape {
        println!("  JSON shape: {}", shape);
    }
    println!("  Label: {}", report.label);

    Ok(())
}
