use serde_json::json;

use super::*;

#[test]
fn method_names_are_parsed() {
    assert_eq!(Method::parse("openEditor"), Some(Method::OpenEditor));
    assert_eq!(Method::parse("unlock"), Some(Method::Unlock));
    assert_eq!(Method::parse("release"), Some(Method::Release));
    assert_eq!(Method::parse("openPhotoEditor"), None);
}

#[test]
fn method_call_arguments_default_to_null() {
    let call: MethodCall = serde_json::from_value(json!({ "method": "release" })).unwrap();
    assert_eq!(call.arguments, Value::Null);
}

#[test]
fn description_precedence() {
    let args: VideoArgs = serde_json::from_value(json!({
        "videos": ["a"],
        "video": "b",
        "size": { "width": 1, "height": 1 }
    }))
    .unwrap();
    assert_eq!(
        args.description(),
        Some(AssetDescription::SourceList(vec!["a".to_string()]))
    );

    let args: VideoArgs = serde_json::from_value(json!({
        "segments": [{ "videoUri": "a", "startTime": 1.0 }],
        "video": "b"
    }))
    .unwrap();
    let Some(AssetDescription::SegmentList(segments)) = args.description() else {
        panic!("expected segment list");
    };
    assert_eq!(segments[0].start_time, Some(1.0));
    assert_eq!(segments[0].end_time, None);

    let args: VideoArgs = serde_json::from_value(json!({ "video": "b" })).unwrap();
    assert_eq!(
        args.description(),
        Some(AssetDescription::SingleSource("b".to_string()))
    );

    let args: VideoArgs =
        serde_json::from_value(json!({ "size": { "width": 1, "height": 1 } })).unwrap();
    assert_eq!(args.description(), Some(AssetDescription::SizeOnly));

    let args: VideoArgs = serde_json::from_value(json!({ "size": null })).unwrap();
    assert_eq!(args.description(), None);
}

#[test]
fn malformed_list_entries_are_dropped() {
    let args: VideoArgs = serde_json::from_value(json!({
        "videos": ["clip.mp4", 5, null, { "videoUri": "x" }]
    }))
    .unwrap();
    assert_eq!(
        args.description(),
        Some(AssetDescription::SourceList(vec!["clip.mp4".to_string()]))
    );

    let args: VideoArgs = serde_json::from_value(json!({
        "segments": [
            { "videoUri": "clip.mp4", "startTime": 2, "endTime": "late" },
            { "videoUri": null },
            { "startTime": 1.0 },
            "intro.mov"
        ]
    }))
    .unwrap();
    assert_eq!(
        args.description(),
        Some(AssetDescription::SegmentList(vec![SegmentSpec {
            video_uri: "clip.mp4".to_string(),
            start_time: Some(2.0),
            end_time: None,
        }]))
    );
}

#[test]
fn null_open_editor_arguments_parse_as_empty() {
    let args = parse_args::<Option<OpenEditorArgs>>(Value::Null)
        .unwrap()
        .unwrap_or_default();
    assert_eq!(args, OpenEditorArgs::default());
}

#[test]
fn ill_typed_arguments_are_rejected() {
    let err = parse_args::<OpenEditorArgs>(json!({ "video": { "videos": "not-a-list" } }))
        .unwrap_err();
    assert!(matches!(err, BridgeError::InvalidArguments(_)));

    let err = parse_args::<UnlockArgs>(json!({})).unwrap_err();
    assert!(matches!(err, BridgeError::InvalidArguments(_)));
}

#[test]
fn editor_result_wire_shape() {
    let result = EditorResult {
        video: "file:///out.mp4".to_string(),
        has_changes: true,
        serialization: Value::Null,
        video_size: CanvasSize {
            width: 1280.0,
            height: 720.0,
        },
        identifier: "id".to_string(),
        segments: None,
    };
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "video": "file:///out.mp4",
            "hasChanges": true,
            "serialization": null,
            "videoSize": { "width": 1280.0, "height": 720.0 },
            "identifier": "id"
        })
    );
}
