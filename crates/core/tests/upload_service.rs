use filekind_core::config::ClassifierConfig;
use filekind_core::services::upload::{
    classify_descriptor, read_json_text, UploadClassifier, UploadError,
};
use filekind_core::{Category, FileDescriptor, JsonShape};
use tempfile::tempdir;

#[test]
fn json_descriptor_uses_shape_as_final_label() {
    let descriptor = FileDescriptor::new("export.json", "application/json");
    let result = classify_descriptor(&descriptor, Some(r#"{"tables": []}"#));
    assert_eq!(result.category, Category::Json);
    assert_eq!(result.json_shape, Some(JsonShape::Sql));
    assert_eq!(result.label(), "SQLJSON");
}

#[test]
fn json_descriptor_without_content_keeps_category_label() {
    let descriptor = FileDescriptor::new("export.json", "");
    let result = classify_descriptor(&descriptor, None);
    assert_eq!(result.json_shape, None);
    assert_eq!(result.label(), "JSON");
}

#[test]
fn non_json_descriptor_ignores_content() {
    let descriptor = FileDescriptor::new("notes.txt", "text/plain");
    let result = classify_descriptor(&descriptor, Some(r#"{"tables": []}"#));
    assert_eq!(result.category, Category::Text);
    assert_eq!(result.json_shape, None);
}

#[test]
fn classify_path_reads_json_content() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("records.json");
    std::fs::write(&path, r#"[{"collection": "users"}]"#).unwrap();

    let upload = UploadClassifier::default().classify_path(&path, None).expect("classify");
    assert_eq!(upload.descriptor.name, "records.json");
    assert_eq!(upload.classification.json_shape, Some(JsonShape::NoSql));
    assert_eq!(upload.size_bytes, 25);
}

#[test]
fn classify_path_reports_corrupted_and_non_utf8_json() {
    let temp = tempdir().unwrap();
    let broken = temp.path().join("broken.json");
    std::fs::write(&broken, "{ not: json").unwrap();
    let binary = temp.path().join("binary.json");
    std::fs::write(&binary, [0xff_u8, 0xfe, 0x00]).unwrap();

    let classifier = UploadClassifier::default();
    for path in [broken, binary] {
        let upload = classifier.classify_path(&path, None).unwrap();
        assert_eq!(upload.classification.label(), "CorruptedJSON");
    }
}

#[test]
fn classify_path_guesses_media_type_when_enabled() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("clip.mp4");
    std::fs::write(&path, b"not really a video").unwrap();

    let config = ClassifierConfig { guess_media_type: true, ..ClassifierConfig::default() };
    let upload = UploadClassifier::new(config).classify_path(&path, None).unwrap();
    assert_eq!(upload.descriptor.media_type, "video/mp4");
    assert_eq!(upload.classification.category, Category::Video);

    let declared = UploadClassifier::default().classify_path(&path, Some("image/png")).unwrap();
    assert_eq!(declared.classification.category, Category::Image);
}

#[test]
fn classify_path_rejects_oversized_json() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("big.json");
    std::fs::write(&path, "[1, 2, 3, 4, 5]").unwrap();

    let config = ClassifierConfig { max_json_bytes: 4, ..ClassifierConfig::default() };
    match UploadClassifier::new(config).classify_path(&path, None) {
        Err(UploadError::ContentTooLarge { size, limit, .. }) => {
            assert_eq!(size, 15);
            assert_eq!(limit, 4);
        }
        other => panic!("expected ContentTooLarge, got {other:?}"),
    }
}

#[test]
fn classify_path_errors_for_missing_file() {
    let temp = tempdir().unwrap();
    let err = UploadClassifier::default()
        .classify_path(&temp.path().join("missing.png"), None)
        .unwrap_err();
    assert!(matches!(err, UploadError::Io { .. }));
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn read_json_text_accepts_content_at_the_limit() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("five.json");
    std::fs::write(&path, "[1,2]").unwrap();

    assert_eq!(read_json_text(&path, 5).unwrap(), "[1,2]");
    assert!(matches!(
        read_json_text(&path, 4),
        Err(UploadError::ContentTooLarge { size: 5, limit: 4, .. })
    ));
}

#[cfg(unix)]
#[test]
fn read_json_text_caps_reads_when_reported_size_is_wrong() {
    // Character devices report a size of zero but never end.
    let path = std::path::Path::new("/dev/zero");
    match read_json_text(path, 16) {
        Err(UploadError::ContentTooLarge { size, limit, .. }) => {
            assert_eq!(size, 17);
            assert_eq!(limit, 16);
        }
        other => panic!("expected ContentTooLarge, got {other:?}"),
    }
}
