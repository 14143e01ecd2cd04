//! Category classification by file name and declared media type.
//!
//! Rules are an ordered table evaluated first-match-wins. Media-type prefix
//! checks and extension sets overlap (an `image/*` upload named `clip.mp4` is
//! an image), so the order of [`CATEGORY_RULES`] is observable behavior.

pub mod json_shape;

pub use json_shape::classify_json_shape;

use tracing::debug;

use crate::model::{extension_of, Category, FileDescriptor};

/// One entry of the category rule table.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    /// Matches when the media type starts with this prefix.
    pub media_prefix: Option<&'static str>,
    /// Matches when the lower-cased extension is one of these.
    pub extensions: &'static [&'static str],
    pub category: Category,
}

impl CategoryRule {
    const fn new(
        media_prefix: Option<&'static str>,
        extensions: &'static [&'static str],
        category: Category,
    ) -> Self {
        Self { media_prefix, extensions, category }
    }

    /// Either condition is independently sufficient.
    pub fn matches(&self, media_type: &str, extension: &str) -> bool {
        let by_media = self.media_prefix.is_some_and(|prefix| media_type.starts_with(prefix));
        by_media || self.extensions.contains(&extension)
    }
}

/// Ordered category rules. Anything matching none of them is [`Category::General`].
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule::new(
        Some("image/"),
        &["png", "jpg", "jpeg", "gif", "svg", "webp"],
        Category::Image,
    ),
    CategoryRule::new(Some("video/"), &["mp4", "mkv", "mov", "avi"], Category::Video),
    CategoryRule::new(Some("audio/"), &["mp3", "wav", "aac", "flac"], Category::Audio),
    CategoryRule::new(None, &["pdf"], Category::Document),
    CategoryRule::new(None, &["zip", "rar", "7z", "tar", "gz"], Category::Archive),
    CategoryRule::new(None, &["txt", "md", "csv", "log"], Category::Text),
    // Source-like extensions: json and sql get their own labels, the rest are code.
    CategoryRule::new(None, &["json"], Category::Json),
    CategoryRule::new(None, &["sql"], Category::Sql),
    CategoryRule::new(None, &["html", "css", "js", "ts", "jsx", "tsx"], Category::Code),
];

/// Classify a file by `name` and declared `media_type`.
///
/// Total over all inputs: empty or extension-less names and empty media types
/// are fine, and anything unrecognized falls back to [`Category::General`].
pub fn classify_category(name: &str, media_type: &str) -> Category {
    let category = category_for(media_type, &extension_of(name));
    debug!(file = name, media_type, %category, "classified category");
    category
}

/// Same as [`classify_category`], for a [`FileDescriptor`].
pub fn classify_descriptor_category(descriptor: &FileDescriptor) -> Category {
    let category = category_for(&descriptor.media_type, &descriptor.extension());
    debug!(
        file = %descriptor.name,
        media_type = %descriptor.media_type,
        %category,
        "classified category"
    );
    category
}

fn category_for(media_type: &str, extension: &str) -> Category {
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(media_type, extension))
        .map(|rule| rule.category)
        .unwrap_or(Category::General)
}
