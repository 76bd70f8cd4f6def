use serde_json::json;

use super::*;

#[test]
fn absent_configuration_uses_defaults() {
    let cfg = Configuration::from_value(None).unwrap();
    assert_eq!(cfg, Configuration::default());
    assert_eq!(cfg.export.video.format, VideoFormat::Mp4);
    assert!(!cfg.export.video.segments);

    let cfg = Configuration::from_value(Some(&Value::Null)).unwrap();
    assert_eq!(cfg, Configuration::default());
}

#[test]
fn parses_export_block_and_ignores_unknown_keys() {
    let raw = json!({
        "theme": "dark",
        "export": {
            "filename": "/tmp/out",
            "video": { "format": "mov", "segments": true, "quality": 0.9 },
            "serialization": { "enabled": true, "exportType": "fileURL", "filename": "/tmp/state" }
        }
    });
    let cfg = Configuration::from_value(Some(&raw)).unwrap();
    assert_eq!(cfg.export.filename.as_deref(), Some("/tmp/out"));
    assert_eq!(cfg.export.video.format, VideoFormat::Mov);
    assert!(cfg.export.video.segments);

    let policy = cfg
        .serialization_policy(&SerializationPolicy::disabled())
        .unwrap();
    assert!(policy.enabled);
    assert_eq!(policy.target, ExportTarget::FileUrl);
    assert_eq!(policy.export_path, Some(PathBuf::from("/tmp/state")));
}

#[test]
fn malformed_configuration_is_a_config_error() {
    let raw = json!({ "export": { "video": { "format": "avi" } } });
    let err = Configuration::from_value(Some(&raw)).unwrap_err();
    assert!(matches!(err, BridgeError::Config(_)));
}

#[test]
fn request_without_serialization_block_uses_fallback() {
    let fallback = SerializationPolicy {
        enabled: true,
        target: ExportTarget::InMemory,
        export_path: None,
    };
    let cfg = Configuration::default();
    assert_eq!(cfg.serialization_policy(&fallback).unwrap(), fallback);
}

#[test]
fn export_type_defaults_to_object() {
    let opts: SerializationOptions = serde_json::from_value(json!({ "enabled": true })).unwrap();
    assert_eq!(opts.export_type, ExportTarget::InMemory);
}

#[cfg(unix)]
#[test]
fn file_urls_and_paths_are_both_accepted() {
    let opts = SerializationOptions {
        enabled: true,
        export_type: ExportTarget::FileUrl,
        filename: Some("file:///var/state.json".to_string()),
    };
    let policy = SerializationPolicy::from_options(&opts).unwrap();
    assert_eq!(policy.export_path, Some(PathBuf::from("/var/state.json")));

    let opts = SerializationOptions {
        filename: Some("https://example.com/state".to_string()),
        ..opts
    };
    assert!(SerializationPolicy::from_options(&opts).is_err());
}

#[test]
fn file_path_appends_json_extension() {
    let id = SessionId::generate();
    let policy = SerializationPolicy {
        enabled: true,
        target: ExportTarget::FileUrl,
        export_path: Some(PathBuf::from("out/state")),
    };
    assert_eq!(policy.file_path(id), PathBuf::from("out/state.json"));

    let policy = SerializationPolicy {
        export_path: Some(PathBuf::from("out/state.bin")),
        ..policy
    };
    assert_eq!(policy.file_path(id), PathBuf::from("out/state.bin"));

    let policy = SerializationPolicy::disabled();
    let p = policy.file_path(id);
    assert!(p.starts_with(std::env::temp_dir()));
    assert!(p.to_string_lossy().ends_with(&format!("{id}.json")));
}
