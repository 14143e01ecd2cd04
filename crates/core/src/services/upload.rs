//! Upload-side composition of the two classifiers.
//!
//! The category classifier always runs; the JSON shape classifier only runs
//! when the category is [`Category::Json`], and its label then becomes the
//! final, more specific classification.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::classify::{classify_descriptor_category, classify_json_shape};
use crate::config::ClassifierConfig;
use crate::model::{Category, Classification, FileDescriptor};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON content over the configured limit is not handed to the parser.
    #[error("JSON content at {path} is {size} bytes, over the {limit} byte limit")]
    ContentTooLarge { path: PathBuf, size: u64, limit: u64 },
}

pub type UploadResult<T> = Result<T, UploadError>;

/// Classify a descriptor, using `content` for JSON shape inference.
///
/// When the category is JSON but no content is supplied, the shape is left
/// unset rather than guessed.
pub fn classify_descriptor(descriptor: &FileDescriptor, content: Option<&str>) -> Classification {
    let category = classify_descriptor_category(descriptor);
    let shape = match (category, content) {
        (Category::Json, Some(text)) => Some(classify_json_shape(text)),
        _ => None,
    };
    Classification::new(category).with_json_shape(shape)
}

/// Pick the media type for `name`: the declared one if present and non-empty,
/// else a guess from the extension when `guess` is set, else empty.
pub fn resolve_media_type(name: &str, declared: Option<&str>, guess: bool) -> String {
    match declared {
        Some(mt) if !mt.is_empty() => mt.to_string(),
        _ if guess => mime_guess::from_path(name).first_raw().unwrap_or_default().to_string(),
        _ => String::new(),
    }
}

/// A file on disk together with how it was classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedUpload {
    pub path: PathBuf,
    pub descriptor: FileDescriptor,
    pub size_bytes: u64,
    pub classification: Classification,
}

/// Classifies files on disk according to a [`ClassifierConfig`].
#[derive(Debug, Clone, Default)]
pub struct UploadClassifier {
    pub config: ClassifierConfig,
}

impl UploadClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Build the descriptor for `path` from its file name and the (possibly
    /// guessed) media type. Does not touch the filesystem.
    pub fn descriptor_for(&self, path: &Path, media_type: Option<&str>) -> FileDescriptor {
        let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        let media_type = resolve_media_type(&name, media_type, self.config.guess_media_type);
        FileDescriptor::new(name, media_type)
    }

    /// Classify the file at `path`. Content is only read for JSON files.
    pub fn classify_path(
        &self,
        path: &Path,
        media_type: Option<&str>,
    ) -> UploadResult<ClassifiedUpload> {
        let descriptor = self.descriptor_for(path, media_type);
        let size_bytes = fs::metadata(path)
            .map_err(|source| UploadError::Io { path: path.to_path_buf(), source })?
            .len();

        let category = classify_descriptor_category(&descriptor);
        let classification = if category == Category::Json {
            let text = read_json_text(path, self.config.max_json_bytes)?;
            Classification::new(category).with_json_shape(Some(classify_json_shape(&text)))
        } else {
            Classification::new(category)
        };

        debug!(path = %path.display(), label = classification.label(), "classified upload");
        Ok(ClassifiedUpload { path: path.to_path_buf(), descriptor, size_bytes, classification })
    }
}

/// Read at most `limit` bytes of JSON text from `path`.
///
/// Files whose reported size is over the limit are refused before reading,
/// and the read itself is capped so a file that grows in the meantime is
/// refused too. Invalid UTF-8 becomes replacement characters, which then
/// fail to parse.
pub fn read_json_text(path: &Path, limit: u64) -> UploadResult<String> {
    let io_err = |source| UploadError::Io { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(io_err)?;
    let size = file.metadata().map_err(io_err)?.len();
    if size > limit {
        return Err(UploadError::ContentTooLarge { path: path.to_path_buf(), size, limit });
    }

    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1)).read_to_end(&mut bytes).map_err(io_err)?;
    let read = bytes.len() as u64;
    if read > limit {
        return Err(UploadError::ContentTooLarge { path: path.to_path_buf(), size: read, limit });
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
