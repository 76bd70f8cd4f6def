use std::collections::BTreeMap;

use serde_json::json;
use url::Url;

use super::*;

fn resolver() -> AssetResolver {
    let mut m = BTreeMap::new();
    m.insert(
        "clip.mp4".to_string(),
        Url::parse("file:///bundle/clip.mp4").unwrap(),
    );
    m.insert(
        "intro.mov".to_string(),
        Url::parse("file:///bundle/intro.mov").unwrap(),
    );
    AssetResolver::new(m)
}

fn build(
    desc: Option<AssetDescription>,
    size: Option<Value>,
) -> Result<VideoComposition, ValidationError> {
    let r = resolver();
    VideoCompositionBuilder::new(&r).build(desc.as_ref(), size.as_ref())
}

fn hd() -> Value {
    json!({ "width": 1920, "height": 1080 })
}

#[test]
fn size_spec_distinguishes_absent_from_invalid() {
    assert_eq!(SizeSpec::parse(None), SizeSpec::Unspecified);
    assert_eq!(SizeSpec::parse(Some(&Value::Null)), SizeSpec::Unspecified);
    assert_eq!(
        SizeSpec::parse(Some(&hd())),
        SizeSpec::Concrete(CanvasSize {
            width: 1920.0,
            height: 1080.0
        })
    );
    assert_eq!(
        SizeSpec::parse(Some(&json!({ "width": 0, "height": 1080 }))),
        SizeSpec::Invalid
    );
    assert_eq!(
        SizeSpec::parse(Some(&json!({ "width": "wide", "height": 1080 }))),
        SizeSpec::Invalid
    );
    assert_eq!(
        SizeSpec::parse(Some(&json!({ "width": 10 }))),
        SizeSpec::Invalid
    );
    assert_eq!(SizeSpec::parse(Some(&json!([1, 2]))), SizeSpec::Invalid);
}

#[test]
fn nothing_at_all_is_missing_description() {
    assert_eq!(
        build(None, None),
        Err(ValidationError::MissingVideoDescription)
    );
}

#[test]
fn size_only_requires_concrete_size() {
    let comp = build(None, Some(hd())).unwrap();
    assert!(comp.is_blank());
    assert_eq!(comp.size().unwrap().width, 1920.0);

    assert_eq!(
        build(None, Some(json!({ "width": 0, "height": 1080 }))),
        Err(ValidationError::InvalidCanvasSize)
    );
    assert_eq!(
        build(Some(AssetDescription::SizeOnly), None),
        Err(ValidationError::MissingVideoDescription)
    );
}

#[test]
fn source_list_drops_unresolved_entries() {
    let comp = build(
        Some(AssetDescription::SourceList(vec![
            "clip.mp4".to_string(),
            "bad-uri".to_string(),
            "intro.mov".to_string(),
        ])),
        None,
    )
    .unwrap();
    let urls: Vec<_> = comp.segments().iter().map(|s| s.url.as_str()).collect();
    assert_eq!(urls, ["file:///bundle/clip.mp4", "file:///bundle/intro.mov"]);
    assert_eq!(comp.size(), None);
    assert!(comp.segments().iter().all(|s| s.start_time.is_none()));
}

#[test]
fn source_list_all_unresolved_needs_size() {
    let desc = AssetDescription::SourceList(vec!["bad-uri-1".into(), "bad-uri-2".into()]);
    assert_eq!(
        build(Some(desc.clone()), None),
        Err(ValidationError::MissingCompositionSize)
    );
    assert_eq!(
        build(
            Some(desc.clone()),
            Some(json!({ "width": -1, "height": 1 }))
        ),
        Err(ValidationError::MissingCompositionSize)
    );
    let comp = build(Some(desc), Some(hd())).unwrap();
    assert!(comp.is_blank());
}

#[test]
fn non_empty_list_with_invalid_size_fails() {
    assert_eq!(
        build(
            Some(AssetDescription::SourceList(vec!["clip.mp4".into()])),
            Some(json!({ "width": 100, "height": 0 }))
        ),
        Err(ValidationError::InvalidCanvasSize)
    );
}

#[test]
fn segment_list_carries_trims_and_drops_unresolved() {
    let comp = build(
        Some(AssetDescription::SegmentList(vec![
            SegmentSpec {
                video_uri: "clip.mp4".into(),
                start_time: Some(1.5),
                end_time: Some(4.0),
            },
            SegmentSpec {
                video_uri: "missing".into(),
                start_time: Some(0.0),
                end_time: Some(1.0),
            },
            SegmentSpec {
                video_uri: "intro.mov".into(),
                start_time: None,
                end_time: Some(2.0),
            },
        ])),
        Some(hd()),
    )
    .unwrap();
    assert_eq!(comp.segments().len(), 2);
    assert_eq!(comp.segments()[0].start_time, Some(1.5));
    assert_eq!(comp.segments()[0].end_time, Some(4.0));
    assert_eq!(comp.segments()[1].start_time, None);
    assert_eq!(comp.segments()[1].end_time, Some(2.0));
    assert!(comp.size().is_some());
}

#[test]
fn inverted_trims_are_kept() {
    let comp = build(
        Some(AssetDescription::SegmentList(vec![SegmentSpec {
            video_uri: "clip.mp4".into(),
            start_time: Some(5.0),
            end_time: Some(1.0),
        }])),
        None,
    )
    .unwrap();
    assert_eq!(comp.segments()[0].start_time, Some(5.0));
}

#[test]
fn single_source_failure_is_fatal() {
    assert_eq!(
        build(
            Some(AssetDescription::SingleSource("nope".into())),
            Some(hd())
        ),
        Err(ValidationError::UnresolvableSource("nope".into()))
    );
}

#[test]
fn single_source_uses_explicit_size_when_given() {
    let comp = build(Some(AssetDescription::SingleSource("clip.mp4".into())), None).unwrap();
    assert_eq!(comp.segments().len(), 1);
    assert_eq!(comp.size(), None);

    let comp = build(
        Some(AssetDescription::SingleSource("clip.mp4".into())),
        Some(hd()),
    )
    .unwrap();
    assert_eq!(comp.size().unwrap().height, 1080.0);

    assert_eq!(
        build(
            Some(AssetDescription::SingleSource("clip.mp4".into())),
            Some(json!({ "width": 0, "height": 0 }))
        ),
        Err(ValidationError::InvalidCanvasSize)
    );
}

#[test]
fn build_is_deterministic() {
    let desc = Some(AssetDescription::SourceList(vec![
        "clip.mp4".into(),
        "x".into(),
    ]));
    assert_eq!(build(desc.clone(), None), build(desc, None));
}

#[test]
fn blank_composition_cannot_be_sizeless() {
    assert_eq!(
        VideoComposition::new(Vec::new(), None),
        Err(ValidationError::MissingCompositionSize)
    );
}
