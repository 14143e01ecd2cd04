//! Core data model: file descriptors and the closed label sets produced by
//! the classifiers.
//!
//! Labels serialize exactly as they are spelled in user-facing output
//! (`Image`, `JSON`, `SQLJSON`, ...) so downstream routing can match on them
//! without a translation table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input to the category classifier: a file name plus its declared media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name as uploaded. May be empty or lack an extension.
    pub name: String,
    /// Declared content type (e.g., `image/png`). May be empty.
    #[serde(default)]
    pub media_type: String,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self { name: name.into(), media_type: media_type.into() }
    }

    /// Lower-cased extension of `name`; empty if there is no `.`.
    pub fn extension(&self) -> String {
        extension_of(&self.name)
    }
}

/// Lower-cased substring after the final `.` in `name`, or an empty string.
///
/// A trailing dot (`"archive."`) yields an empty extension, and a leading dot
/// (`".bashrc"`) yields everything after it, matching a plain last-segment split.
/// Lower-casing is Unicode-aware, so `KELVIN SIGN` folds to an ASCII `k`.
pub fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Coarse file-kind label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Image,
    Video,
    Audio,
    Document,
    Archive,
    Text,
    Code,
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "SQL")]
    Sql,
    General,
}

impl Category {
    /// Every category, in the order the classifier's rules consider them.
    pub const ALL: [Category; 10] = [
        Category::Image,
        Category::Video,
        Category::Audio,
        Category::Document,
        Category::Archive,
        Category::Text,
        Category::Code,
        Category::Json,
        Category::Sql,
        Category::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Image => "Image",
            Category::Video => "Video",
            Category::Audio => "Audio",
            Category::Document => "Document",
            Category::Archive => "Archive",
            Category::Text => "Text",
            Category::Code => "Code",
            Category::Json => "JSON",
            Category::Sql => "SQL",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Inferred structure of a JSON payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JsonShape {
    /// Tabular / relational data (tables, rows, schema).
    #[serde(rename = "SQLJSON")]
    Sql,
    /// Document-oriented data. Also the default when no markers are found.
    #[serde(rename = "NoSQLJSON")]
    NoSql,
    /// Content did not parse as JSON.
    #[serde(rename = "CorruptedJSON")]
    Corrupted,
}

impl JsonShape {
    pub const ALL: [JsonShape; 3] = [JsonShape::Sql, JsonShape::NoSql, JsonShape::Corrupted];

    pub fn as_str(self) -> &'static str {
        match self {
            JsonShape::Sql => "SQLJSON",
            JsonShape::NoSql => "NoSQLJSON",
            JsonShape::Corrupted => "CorruptedJSON",
        }
    }
}

impl fmt::Display for JsonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JsonShape {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JsonShape::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Returned when parsing a label that is not part of the closed label sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown label '{0}'")]
pub struct UnknownLabel(pub String);

/// Final result of classifying one upload.
///
/// `json_shape` is only ever set when `category` is [`Category::Json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_shape: Option<JsonShape>,
}

impl Classification {
    pub fn new(category: Category) -> Self {
        Self { category, json_shape: None }
    }

    /// Builder-style helper to attach a JSON shape.
    pub fn with_json_shape(mut self, shape: Option<JsonShape>) -> Self {
        self.json_shape = shape;
        self
    }

    /// The most specific label available: the JSON shape when known,
    /// otherwise the category.
    pub fn label(&self) -> &'static str {
        match self.json_shape {
            Some(shape) => shape.as_str(),
            None => self.category.as_str(),
        }
    }
}
