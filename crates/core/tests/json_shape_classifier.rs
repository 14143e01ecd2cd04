use filekind_core::{classify_json_shape, JsonShape};

#[test]
fn unparseable_content_is_corrupted() {
    assert_eq!(classify_json_shape("not json"), JsonShape::Corrupted);
    assert_eq!(classify_json_shape(""), JsonShape::Corrupted);
    assert_eq!(classify_json_shape("{\"tables\": [}"), JsonShape::Corrupted);
}

#[test]
fn top_level_relational_keys_are_sql() {
    assert_eq!(classify_json_shape(r#"{"tables": []}"#), JsonShape::Sql);
    assert_eq!(classify_json_shape(r#"{"schema": {"users": ["id"]}}"#), JsonShape::Sql);
}

#[test]
fn first_record_keys_decide_array_shape() {
    assert_eq!(classify_json_shape(r#"[{"collection": "x"}]"#), JsonShape::NoSql);
    assert_eq!(classify_json_shape(r#"[{"document": {}}]"#), JsonShape::NoSql);
    assert_eq!(classify_json_shape(r#"[{"table": "x", "rows": []}]"#), JsonShape::Sql);
    assert_eq!(classify_json_shape(r#"[{"rows": [1, 2]}]"#), JsonShape::Sql);
}

#[test]
fn only_the_first_record_is_inspected() {
    assert_eq!(classify_json_shape(r#"[{"foo": 1}, {"table": "t"}]"#), JsonShape::NoSql);
    assert_eq!(classify_json_shape(r#"[{"table": "t"}, {"collection": "c"}]"#), JsonShape::Sql);
}

#[test]
fn unmarked_values_default_to_nosql() {
    assert_eq!(classify_json_shape(r#"[{"foo": 1}]"#), JsonShape::NoSql);
    assert_eq!(classify_json_shape("[]"), JsonShape::NoSql);
    assert_eq!(classify_json_shape(r#"{"name": "x"}"#), JsonShape::NoSql);
    assert_eq!(classify_json_shape("42"), JsonShape::NoSql);
    assert_eq!(classify_json_shape("null"), JsonShape::NoSql);
}

#[test]
fn arrays_with_non_object_elements_skip_record_markers() {
    assert_eq!(classify_json_shape(r#"[{"table": "t"}, null]"#), JsonShape::NoSql);
    assert_eq!(classify_json_shape(r#"[{"table": "t"}, 3]"#), JsonShape::NoSql);
}

#[test]
fn shape_inference_is_repeatable() {
    let content = r#"[{"table": "users", "rows": [[1, "a"]]}]"#;
    let first = classify_json_shape(content);
    for _ in 0..5 {
        assert_eq!(classify_json_shape(content), first);
    }
}

#[test]
fn out_of_range_numbers_are_valid_json() {
    assert_eq!(classify_json_shape(r#"{"tables": 1e400}"#), JsonShape::Sql);
    assert_eq!(classify_json_shape(r#"[{"rows": -1e999}]"#), JsonShape::Sql);
    assert_eq!(classify_json_shape("[1e400, 2]"), JsonShape::NoSql);
}

#[test]
fn deep_nesting_is_valid_json() {
    let depth = 10_000;
    let nested = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert_eq!(classify_json_shape(&format!(r#"{{"schema": {nested}}}"#)), JsonShape::Sql);
    assert_eq!(classify_json_shape(&format!(r#"[{{"document": {nested}}}]"#)), JsonShape::NoSql);
    assert_eq!(classify_json_shape(&nested), JsonShape::NoSql);

    let unbalanced = format!("{}{}", "[".repeat(depth), "]".repeat(depth - 1));
    assert_eq!(classify_json_shape(&unbalanced), JsonShape::Corrupted);
}

#[test]
fn lone_surrogate_escapes_are_valid_json() {
    assert_eq!(classify_json_shape(r#"{"tables": "\ud800"}"#), JsonShape::Sql);
    assert_eq!(classify_json_shape(r#"[{"\udc00": 1, "table": "t"}]"#), JsonShape::Sql);
    assert_eq!(classify_json_shape(r#""\ud800""#), JsonShape::NoSql);
}

#[test]
fn escaped_keys_are_matched_after_decoding() {
    assert_eq!(classify_json_shape(r#"{"t\u0061bles": []}"#), JsonShape::Sql);
    assert_eq!(classify_json_shape(r#"[{"collecti\u006fn": "x"}]"#), JsonShape::NoSql);
    assert_eq!(classify_json_shape(r#"{"sch\u0065ma": {}, "x": "\ud800"}"#), JsonShape::Sql);
}

#[test]
fn grammar_errors_stay_corrupted() {
    // A byte-order mark is not JSON whitespace.
    assert_eq!(classify_json_shape("\u{feff}{\"tables\": []}"), JsonShape::Corrupted);
    assert_eq!(classify_json_shape(r#"{"tables": "\x"}"#), JsonShape::Corrupted);
    assert_eq!(classify_json_shape(r#"{"tables": [] } extra"#), JsonShape::Corrupted);
    assert_eq!(classify_json_shape("{'tables': []}"), JsonShape::Corrupted);
    assert_eq!(classify_json_shape(r#"[{"table": 01}]"#), JsonShape::Corrupted);
}
