use stencil_core::errors::*;

#[test]
fn error_codes_are_stable() {
    assert_eq!(
        StencilError::missing_input("data/x.jsonl").error_code(),
        "MISSING_INPUT"
    );
    assert_eq!(StencilError::empty("ingest").error_code(), "EMPTY_RESULT");
    let malformed = StencilError::MalformedRecord {
        line: 3,
        reason: "missing sender".into(),
    };
    assert_eq!(malformed.error_code(), "MALFORMED_RECORD");
    let config: StencilError = ConfigError::FileNotFound {
        path: "stencil.toml".into(),
    }
    .into();
    assert_eq!(config.error_code(), "CONFIG_ERROR");
}

#[test]
fn tagged_message_includes_code_and_path() {
    let err = StencilError::missing_input("data/export.txt");
    assert_eq!(err.tagged(), "[MISSING_INPUT] input not found: data/export.txt");
}

#[test]
fn loaded_collects_skips() {
    let mut loaded = Loaded::new(vec![1, 2, 3]);
    assert!(loaded.is_clean());
    loaded.skip(7, "bad json");
    assert_eq!(loaded.skipped_count(), 1);
    assert!(!loaded.is_clean());
    assert_eq!(loaded.records, vec![1, 2, 3]);
}
