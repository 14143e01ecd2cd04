pub mod scan;
pub mod upload;

pub use scan::{scan_dir, summarize, ScanSummary, ScannedFile};
pub use upload::{
    classify_descriptor, read_json_text, resolve_media_type, ClassifiedUpload, UploadClassifier,
    UploadError, UploadResult,
};
